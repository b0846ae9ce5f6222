//! Style specifications handed to the renderer.
//!
//! Built from a ([`ColorScheme`], [`VisualizationStyle`]) pair and
//! serialized into the JSON shape molecular renderers consume, e.g.
//! `{"stick": {"colorscheme": "Jmol", "radius": 0.15}}`.

use serde_json::{json, Map, Value};

use super::scheme::{ColorScheme, VisualizationStyle};

/// Surface opacity used by the surface style.
pub const SURFACE_OPACITY: f32 = 0.85;

/// Atom subset a style or clickability applies to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    /// Every atom.
    #[default]
    All,
    /// Atoms of one chain.
    Chain(String),
    /// Specific atom serials.
    Serials(Vec<u32>),
}

impl Selector {
    /// Renderer JSON form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::All => json!({}),
            Self::Chain(chain) => json!({ "chain": chain }),
            Self::Serials(serials) => json!({ "serial": serials }),
        }
    }
}

/// Coloring clause of a style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coloring {
    /// A named color or color function (`"spectrum"`).
    Color(&'static str),
    /// A named per-atom color scheme (`"Jmol"`, `"chain"`).
    Scheme(&'static str),
    /// Gradient over a numeric atom property.
    Gradient {
        /// Atom property (`"b"` for temperature factor).
        prop: &'static str,
        /// Gradient name.
        gradient: &'static str,
    },
}

impl Coloring {
    fn write_into(&self, map: &mut Map<String, Value>) {
        let (key, value) = match self {
            Self::Color(color) => ("color", json!(color)),
            Self::Scheme(scheme) => ("colorscheme", json!(scheme)),
            Self::Gradient { prop, gradient } => (
                "colorscheme",
                json!({ "prop": prop, "gradient": gradient }),
            ),
        };
        drop(map.insert(key.to_owned(), value));
    }
}

/// Coloring used for each scheme.
#[must_use]
pub fn coloring_for(scheme: ColorScheme) -> Coloring {
    match scheme {
        ColorScheme::Spectrum => Coloring::Color("spectrum"),
        ColorScheme::Secondary => Coloring::Scheme("ssBased"),
        ColorScheme::Chain => Coloring::Scheme("chain"),
        ColorScheme::Bfactor => Coloring::Gradient {
            prop: "b",
            gradient: "roygb",
        },
        ColorScheme::Residue => Coloring::Scheme("Jmol"),
    }
}

/// Geometric representation drawn for atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Ribbon cartoon.
    Cartoon,
    /// Bond sticks.
    Stick,
    /// Atom spheres.
    Sphere,
    /// Wireframe.
    Line,
}

impl Representation {
    fn key(self) -> &'static str {
        match self {
            Self::Cartoon => "cartoon",
            Self::Stick => "stick",
            Self::Sphere => "sphere",
            Self::Line => "line",
        }
    }
}

/// One representation with its coloring and size parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RepresentationSpec {
    /// What to draw.
    pub representation: Representation,
    /// How to color it.
    pub coloring: Coloring,
    /// Stick radius, when set.
    pub radius: Option<f32>,
    /// Sphere scale, when set.
    pub scale: Option<f32>,
}

impl RepresentationSpec {
    /// Renderer JSON form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut inner = Map::new();
        self.coloring.write_into(&mut inner);
        if let Some(radius) = self.radius {
            drop(inner.insert("radius".into(), json!(radius)));
        }
        if let Some(scale) = self.scale {
            drop(inner.insert("scale".into(), json!(scale)));
        }
        let mut outer = Map::new();
        drop(
            outer.insert(self.representation.key().into(), Value::Object(inner)),
        );
        Value::Object(outer)
    }
}

/// Molecular surface algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Van der Waals surface.
    Vdw,
    /// Solvent-accessible surface.
    Sas,
    /// Solvent-excluded (molecular) surface.
    Ms,
}

/// Surface overlay parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSpec {
    /// Surface algorithm.
    pub kind: SurfaceKind,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Surface coloring.
    pub coloring: Coloring,
}

impl SurfaceSpec {
    /// Renderer JSON form of the surface options.
    #[must_use]
    pub fn options_json(&self) -> Value {
        let mut map = Map::new();
        drop(map.insert("opacity".into(), json!(self.opacity)));
        self.coloring.write_into(&mut map);
        Value::Object(map)
    }
}

/// Everything the renderer needs to show one style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSpec {
    /// Atom representation.
    pub representation: RepresentationSpec,
    /// Optional surface drawn over it.
    pub surface: Option<SurfaceSpec>,
}

/// Style for a scheme/style pair.
#[must_use]
pub fn build_style_spec(
    scheme: ColorScheme,
    style: VisualizationStyle,
) -> StyleSpec {
    let coloring = coloring_for(scheme);
    let plain = |representation| RepresentationSpec {
        representation,
        coloring: coloring.clone(),
        radius: None,
        scale: None,
    };
    match style {
        VisualizationStyle::Cartoon => StyleSpec {
            representation: plain(Representation::Cartoon),
            surface: None,
        },
        VisualizationStyle::Stick => StyleSpec {
            representation: RepresentationSpec {
                radius: Some(0.15),
                ..plain(Representation::Stick)
            },
            surface: None,
        },
        VisualizationStyle::Sphere => StyleSpec {
            representation: RepresentationSpec {
                scale: Some(0.3),
                ..plain(Representation::Sphere)
            },
            surface: None,
        },
        VisualizationStyle::Surface => StyleSpec {
            representation: RepresentationSpec {
                radius: Some(0.1),
                ..plain(Representation::Stick)
            },
            surface: Some(SurfaceSpec {
                kind: SurfaceKind::Vdw,
                opacity: SURFACE_OPACITY,
                coloring: coloring.clone(),
            }),
        },
        VisualizationStyle::Line => StyleSpec {
            representation: plain(Representation::Line),
            surface: None,
        },
    }
}
