use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::metadata::ProteinMetadata;

/// What the loader currently exposes to the rendering surface.
///
/// Loading and error are mutually exclusive. `data` and `metadata` are
/// either both present (a successful cycle) or both absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchState {
    /// Identifier this state belongs to; `None` when idle.
    pub id: Option<String>,
    /// Structure file text.
    pub data: Option<String>,
    /// Descriptive record.
    pub metadata: Option<ProteinMetadata>,
    /// A cycle for `id` is in flight.
    pub is_loading: bool,
    /// User-visible failure message of the last cycle.
    pub error: Option<String>,
}

impl FetchState {
    /// Fresh loading state for `id`.
    #[must_use]
    pub fn loading(id: &str) -> Self {
        Self {
            id: Some(id.to_owned()),
            is_loading: true,
            ..Self::default()
        }
    }

    /// No identifier requested.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.id.is_none()
    }

    /// Both items are available.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.data.is_some() && self.metadata.is_some()
    }
}

/// Generation snapshot taken when a cycle starts.
///
/// The cycle is cancelled as soon as the loader moves to a newer
/// generation. Nothing is interrupted; holders check and back off.
#[derive(Debug, Clone)]
pub struct CancelToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl CancelToken {
    /// Token for `generation`, following the shared `current` counter.
    #[must_use]
    pub fn new(generation: u64, current: Arc<AtomicU64>) -> Self {
        Self {
            generation,
            current,
        }
    }

    /// Generation this token was issued for.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a newer request has superseded this one.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_cancelled_by_newer_generation() {
        let current = Arc::new(AtomicU64::new(3));
        let token = CancelToken::new(3, Arc::clone(&current));
        assert!(!token.is_cancelled());
        current.store(4, Ordering::Release);
        assert!(token.is_cancelled());
        assert_eq!(token.generation(), 3);
    }

    #[test]
    fn loading_state_has_no_data_or_error() {
        let state = FetchState::loading("4INS");
        assert!(state.is_loading);
        assert!(state.error.is_none());
        assert!(!state.is_ready());
        assert!(!state.is_idle());
        assert!(FetchState::default().is_idle());
    }
}
