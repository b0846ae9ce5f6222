use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How atoms are drawn.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationStyle {
    /// Secondary-structure ribbons.
    #[default]
    Cartoon,
    /// Thin sticks for bonds.
    Stick,
    /// Scaled van der Waals spheres.
    Sphere,
    /// Molecular surface over thin sticks.
    Surface,
    /// Wireframe lines.
    Line,
}

impl VisualizationStyle {
    /// Every style in cycle order.
    pub const ALL: [Self; 5] = [
        Self::Cartoon,
        Self::Stick,
        Self::Sphere,
        Self::Surface,
        Self::Line,
    ];

    /// Lowercase name, used in filenames and the CLI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cartoon => "cartoon",
            Self::Stick => "stick",
            Self::Sphere => "sphere",
            Self::Surface => "surface",
            Self::Line => "line",
        }
    }

    /// The style after this one, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// How atoms are colored.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Rainbow gradient along the chain.
    #[default]
    Spectrum,
    /// By secondary structure type.
    Secondary,
    /// One color per chain.
    Chain,
    /// By temperature factor.
    Bfactor,
    /// By amino acid properties.
    Residue,
}

/// Display information for one [`ColorScheme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSchemeDefinition {
    /// The scheme.
    pub id: ColorScheme,
    /// Short menu label.
    pub label: &'static str,
    /// One-line explanation.
    pub description: &'static str,
}

/// Available color schemes, in cycle order.
pub const COLOR_SCHEMES: [ColorSchemeDefinition; 5] = [
    ColorSchemeDefinition {
        id: ColorScheme::Spectrum,
        label: "Spectrum",
        description:
            "Rainbow gradient from N-terminus (blue) to C-terminus (red)",
    },
    ColorSchemeDefinition {
        id: ColorScheme::Secondary,
        label: "Secondary Structure",
        description: "Color by secondary structure: helices, sheets, and loops",
    },
    ColorSchemeDefinition {
        id: ColorScheme::Chain,
        label: "Chain",
        description: "Different color for each protein chain",
    },
    ColorSchemeDefinition {
        id: ColorScheme::Bfactor,
        label: "B-Factor",
        description: "Color by temperature factor (blue = rigid, red = flexible)",
    },
    ColorSchemeDefinition {
        id: ColorScheme::Residue,
        label: "Residue Type",
        description: "Color by amino acid properties (Jmol standard)",
    },
];

impl ColorScheme {
    /// Stable identifier (`"spectrum"`, `"bfactor"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spectrum => "spectrum",
            Self::Secondary => "secondary",
            Self::Chain => "chain",
            Self::Bfactor => "bfactor",
            Self::Residue => "residue",
        }
    }

    /// Parse an identifier; unknown ids fall back to the first scheme.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        COLOR_SCHEMES
            .iter()
            .find(|d| d.id.as_str() == id)
            .map_or(COLOR_SCHEMES[0].id, |d| d.id)
    }

    /// This scheme's display information.
    #[must_use]
    pub fn definition(self) -> &'static ColorSchemeDefinition {
        COLOR_SCHEMES
            .iter()
            .find(|d| d.id == self)
            .unwrap_or(&COLOR_SCHEMES[0])
    }

    /// The scheme after this one, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = COLOR_SCHEMES.iter().position(|d| d.id == self).unwrap_or(0);
        COLOR_SCHEMES[(idx + 1) % COLOR_SCHEMES.len()].id
    }
}
