//! Data fetch orchestration.
//!
//! [`ProteinDataLoader`] resolves an identifier to a structure file and
//! metadata record, cache first, and exposes the result as a
//! [`FetchState`]. Each identifier change starts a new generation; results
//! of older generations are never committed.

mod loader;
mod state;

pub use loader::ProteinDataLoader;
pub use state::{CancelToken, FetchState};
