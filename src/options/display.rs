use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::visualization::{ColorScheme, VisualizationStyle};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Initial look of the viewer.
pub struct DisplayOptions {
    /// Representation used when a structure is loaded.
    #[schemars(title = "Style")]
    pub style: VisualizationStyle,
    /// Coloring used when a structure is loaded.
    #[schemars(title = "Color Scheme")]
    pub color_scheme: ColorScheme,
    /// Viewer background, CSS color syntax.
    #[schemars(title = "Background")]
    pub background_color: String,
    /// Zoom factor applied after fitting a new model.
    #[schemars(title = "Initial Zoom", range(min = 0.5, max = 3.0), extend("step" = 0.1))]
    pub initial_zoom: f32,
    /// Duration of the post-load zoom animation.
    #[schemars(title = "Zoom Duration (ms)", range(min = 0, max = 5000))]
    pub zoom_duration_ms: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            style: VisualizationStyle::Cartoon,
            color_scheme: ColorScheme::Spectrum,
            background_color: "rgb(10, 10, 26)".into(),
            initial_zoom: 1.2,
            zoom_duration_ms: 800,
        }
    }
}
