//! Visualization styles, color schemes and the renderer-facing viewer.
//!
//! [`build_style_spec`] turns a style/scheme pair into renderer JSON;
//! [`Viewer`] drives any [`MolecularRenderer`] and keeps distance labels in
//! sync with the measurement session.

mod renderer;
mod scheme;
mod style;
mod viewer;

pub use renderer::{LabelHandle, LabelOptions, MolecularRenderer, ModelFormat};
pub use scheme::{
    ColorScheme, ColorSchemeDefinition, VisualizationStyle, COLOR_SCHEMES,
};
pub use style::{
    build_style_spec, coloring_for, Coloring, Representation,
    RepresentationSpec, Selector, StyleSpec, SurfaceKind, SurfaceSpec,
    SURFACE_OPACITY,
};
#[cfg(test)]
pub(crate) use viewer::recording;
pub use viewer::{ClickOutcome, Viewer};
