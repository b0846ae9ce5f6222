//! Crate-level error types.

use std::fmt;

/// Errors produced by the molscope crate.
#[derive(Debug)]
pub enum MolscopeError {
    /// The requested identifier has no corresponding remote resource.
    NotFound(String),
    /// Transport-level failure talking to a remote service.
    Network(String),
    /// Local cache storage unavailable or corrupt.
    ///
    /// Never crosses the [`StructureCache`](crate::cache::StructureCache)
    /// boundary; the cache degrades to miss behavior instead.
    Cache(String),
    /// Missing or invalid configuration (e.g. chat credentials).
    Configuration(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    Thread(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Image or CSV export failure.
    Export(String),
}

impl fmt::Display for MolscopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "{msg}"),
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Cache(msg) => write!(f, "cache error: {msg}"),
            Self::Configuration(msg) => {
                write!(f, "configuration error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Thread(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Export(msg) => write!(f, "export error: {msg}"),
        }
    }
}

impl std::error::Error for MolscopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::Thread(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MolscopeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for MolscopeError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Cache(e.to_string())
    }
}
