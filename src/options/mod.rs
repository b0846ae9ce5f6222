//! Application options with TOML file support.
//!
//! Cache limits, repository endpoints, viewer defaults, the chat backend and
//! keybindings are consolidated here. Options serialize to/from TOML; the
//! CLI reads them from `--config` or the platform config directory.

mod cache;
mod chat;
mod display;
mod keybindings;
mod repository;

use std::path::Path;

pub use cache::CacheOptions;
pub use chat::ChatOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use repository::RepositoryOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MolscopeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[cache]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Structure cache limits.
    pub cache: CacheOptions,
    /// Remote structure repository endpoints.
    pub repository: RepositoryOptions,
    /// Initial viewer look.
    pub display: DisplayOptions,
    /// Chat assistant backend.
    pub chat: ChatOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, MolscopeError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| MolscopeError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MolscopeError> {
        let content =
            std::fs::read_to_string(path).map_err(MolscopeError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MolscopeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolscopeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolscopeError::Io)?;
        }
        std::fs::write(path, content).map_err(MolscopeError::Io)
    }
}
