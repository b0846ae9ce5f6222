use serde::{Deserialize, Serialize};

/// App-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML configs stay readable:
/// ```toml
/// [keybindings.bindings]
/// cycle_style = "s"
/// toggle_measure = "m"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Move focus to the structure search box.
    FocusSearch,
    /// Close the current dialog or go back.
    Back,
    /// Fit the camera to the model again.
    ResetCamera,
    /// Advance to the next visualization style.
    CycleStyle,
    /// Advance to the next color scheme.
    CycleColorScheme,
    /// Export the current view as PNG.
    ExportImage,
    /// Toggle distance measurement mode.
    ToggleMeasure,
    /// Show the shortcut reference.
    ShowShortcuts,
    /// Switch between light and dark theme.
    ToggleTheme,
}

/// Grouping used by the shortcut reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    /// Moving around the app.
    Navigation,
    /// Acting on the 3D view.
    Visualization,
    /// Everything else.
    General,
}

impl KeyAction {
    /// Every action, in reference-sheet order.
    pub const ALL: [Self; 9] = [
        Self::FocusSearch,
        Self::Back,
        Self::ResetCamera,
        Self::CycleStyle,
        Self::CycleColorScheme,
        Self::ExportImage,
        Self::ToggleMeasure,
        Self::ShowShortcuts,
        Self::ToggleTheme,
    ];

    /// Human-readable description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::FocusSearch => "Focus search",
            Self::Back => "Close dialog / Go back",
            Self::ResetCamera => "Reset camera view",
            Self::CycleStyle => "Cycle visualization styles",
            Self::CycleColorScheme => "Cycle color schemes",
            Self::ExportImage => "Export current view",
            Self::ToggleMeasure => "Toggle distance measurement",
            Self::ShowShortcuts => "Show keyboard shortcuts",
            Self::ToggleTheme => "Toggle theme",
        }
    }

    /// Reference-sheet category.
    #[must_use]
    pub fn category(self) -> ShortcutCategory {
        match self {
            Self::FocusSearch | Self::Back => ShortcutCategory::Navigation,
            Self::ResetCamera
            | Self::CycleStyle
            | Self::CycleColorScheme
            | Self::ExportImage
            | Self::ToggleMeasure => ShortcutCategory::Visualization,
            Self::ShowShortcuts | Self::ToggleTheme => ShortcutCategory::General,
        }
    }

    /// Actions in `category`, in reference-sheet order.
    pub fn in_category(
        category: ShortcutCategory,
    ) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |a| a.category() == category)
    }
}
