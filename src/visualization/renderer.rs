use glam::DVec3;

use super::style::{RepresentationSpec, Selector, SurfaceSpec};
use crate::error::MolscopeError;
use crate::measurement::AtomSelection;

/// Format of the structure text passed to [`MolecularRenderer::load_model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// Legacy PDB format.
    Pdb,
    /// PDBx/mmCIF.
    Cif,
}

/// Opaque handle for a label added to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelHandle(pub u64);

/// Placement and look of a text label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelOptions {
    /// World-space anchor in Ångströms.
    pub position: DVec3,
    /// CSS-style font color.
    pub font_color: String,
    /// CSS-style background color.
    pub background_color: String,
    /// Font size in points.
    pub font_size: f32,
}

impl LabelOptions {
    /// Default look for distance labels, anchored at `position`.
    #[must_use]
    pub fn measurement(position: DVec3) -> Self {
        Self {
            position,
            font_color: "white".into(),
            background_color: "rgba(0, 0, 0, 0.7)".into(),
            font_size: 12.0,
        }
    }
}

/// The capability set molscope needs from a molecular graphics engine.
///
/// Everything is a black-box side effect; molscope never inspects the
/// renderer's internal state. Any engine (a WebGL viewer behind a bridge,
/// a native GPU renderer, a recording fake) can implement it.
pub trait MolecularRenderer {
    /// Replace the displayed model with `text`.
    fn load_model(
        &mut self,
        text: &str,
        format: ModelFormat,
    ) -> Result<(), MolscopeError>;

    /// Apply a representation to the selected atoms. A `None` spec hides
    /// them.
    fn set_style(
        &mut self,
        selector: &Selector,
        spec: Option<&RepresentationSpec>,
    );

    /// Add a molecular surface.
    fn add_surface(&mut self, surface: &SurfaceSpec);

    /// Remove every surface.
    fn remove_all_surfaces(&mut self);

    /// Set the viewport background, CSS color syntax.
    fn set_background_color(&mut self, color: &str);

    /// Redraw.
    fn render(&mut self);

    /// Fit the camera to the model.
    fn zoom_to(&mut self);

    /// Animated zoom by `factor` over `duration_ms`.
    fn zoom(&mut self, factor: f32, duration_ms: u32);

    /// Enable or disable atom picking for the selected atoms.
    fn set_clickable(&mut self, selector: &Selector, enabled: bool);

    /// The clickable atom under the screen position, if any.
    fn pick_atom(&mut self, x: f32, y: f32) -> Option<AtomSelection>;

    /// Add a text label.
    fn add_label(&mut self, text: &str, options: &LabelOptions) -> LabelHandle;

    /// Remove a label added earlier.
    fn remove_label(&mut self, handle: LabelHandle);

    /// Encoded PNG of the current frame.
    fn png_snapshot(&mut self) -> Result<Vec<u8>, MolscopeError>;
}
