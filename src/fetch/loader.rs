use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::ScopedJoinHandle;
use std::time::Duration;

use web_time::Instant;

use self::Source::{Cached, Fresh};
use super::state::{CancelToken, FetchState};
use crate::cache::{cache_key, StructureCache};
use crate::error::MolscopeError;
use crate::metadata::ProteinMetadata;
use crate::repository::StructureRepository;

type Loaded = (String, ProteinMetadata);

/// Message from a finished (or abandoned) fetch cycle.
struct CycleResult {
    generation: u64,
    /// `None` when the worker noticed it was superseded and backed off.
    outcome: Option<Result<Loaded, String>>,
}

/// Resolves identifiers to structure data on background threads.
///
/// Owned by one thread (the UI loop or the CLI); workers report back over a
/// channel and the owner commits results in [`poll`](Self::poll),
/// [`wait`](Self::wait) or [`recv_next`](Self::recv_next).
pub struct ProteinDataLoader {
    cache: Arc<StructureCache>,
    repository: Arc<dyn StructureRepository>,
    generation: Arc<AtomicU64>,
    result_tx: mpsc::Sender<CycleResult>,
    result_rx: mpsc::Receiver<CycleResult>,
    state: FetchState,
}

impl ProteinDataLoader {
    /// Loader over a shared cache and repository.
    #[must_use]
    pub fn new(
        cache: Arc<StructureCache>,
        repository: Arc<dyn StructureRepository>,
    ) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        Self {
            cache,
            repository,
            generation: Arc::new(AtomicU64::new(0)),
            result_tx,
            result_rx,
            state: FetchState::default(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// The shared cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<StructureCache> {
        &self.cache
    }

    /// Switch to `id`, or to idle when `None` or blank.
    ///
    /// Any cycle still in flight is superseded. Idle is entered
    /// immediately with no cache or network activity.
    ///
    /// # Errors
    ///
    /// Returns [`MolscopeError::Thread`] if the worker thread fails to
    /// spawn; the state then carries the failure as its error.
    pub fn request(&mut self, id: Option<&str>) -> Result<(), MolscopeError> {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let Some(id) = id.map(cache_key).filter(|id| !id.is_empty()) else {
            log::debug!("fetch generation {generation}: idle");
            self.state = FetchState::default();
            return Ok(());
        };

        log::debug!("fetch generation {generation}: {id}");
        self.state = FetchState::loading(&id);

        let token = CancelToken::new(generation, Arc::clone(&self.generation));
        let cache = Arc::clone(&self.cache);
        let repository = Arc::clone(&self.repository);
        let tx = self.result_tx.clone();
        let worker_id = id.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("fetch-{id}"))
            .spawn(move || {
                let outcome =
                    run_cycle(&cache, repository.as_ref(), &worker_id, &token);
                let _ = tx.send(CycleResult {
                    generation: token.generation(),
                    outcome,
                });
            });

        if let Err(e) = spawned {
            self.state.is_loading = false;
            self.state.error = Some(format!("failed to spawn fetch thread: {e}"));
            return Err(MolscopeError::Thread(e));
        }
        Ok(())
    }

    /// Commit every result that has already arrived. Returns whether the
    /// state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.result_rx.try_recv() {
            changed |= self.apply(result);
        }
        changed
    }

    /// Block until the current cycle commits or `timeout` elapses. Returns
    /// whether the state is settled (not loading).
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.state.is_loading {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.result_rx.recv_timeout(remaining) {
                Ok(result) => {
                    let _ = self.apply(result);
                }
                Err(_) => return false,
            }
        }
        true
    }

    /// Block for the next cycle message of any generation and apply it.
    ///
    /// Returns `None` on timeout, otherwise whether the state changed
    /// (`Some(false)` for a discarded superseded cycle).
    pub fn recv_next(&mut self, timeout: Duration) -> Option<bool> {
        self.result_rx
            .recv_timeout(timeout)
            .ok()
            .map(|result| self.apply(result))
    }

    fn apply(&mut self, result: CycleResult) -> bool {
        let current = self.generation.load(Ordering::Acquire);
        if result.generation != current {
            log::debug!(
                "discarding fetch generation {} (current {current})",
                result.generation
            );
            return false;
        }
        let Some(outcome) = result.outcome else {
            return false;
        };
        self.state.is_loading = false;
        match outcome {
            Ok((data, metadata)) => {
                self.state.data = Some(data);
                self.state.metadata = Some(metadata);
                self.state.error = None;
            }
            Err(message) => {
                self.state.data = None;
                self.state.metadata = None;
                self.state.error = Some(message);
            }
        }
        true
    }
}

/// Where a cycle got one of its two items from.
enum Source<T> {
    Cached(T),
    Fresh(T),
}

impl<T> Source<T> {
    fn into_inner(self) -> T {
        match self {
            Cached(v) | Fresh(v) => v,
        }
    }
}

type Task<'scope, T> =
    std::io::Result<ScopedJoinHandle<'scope, Result<T, MolscopeError>>>;

/// Resolve one half of a cycle: the cached value when no task was spawned,
/// otherwise the task's result. A panicked task becomes a network error so
/// the cycle still settles.
fn settle<T>(
    id: &str,
    what: &str,
    task: Option<Task<'_, T>>,
    cached: Option<T>,
) -> Result<Source<T>, MolscopeError> {
    match task {
        None => cached.map(Cached).ok_or_else(|| {
            MolscopeError::Cache(format!("{id}: cached {what} vanished"))
        }),
        Some(Ok(handle)) => handle.join().map_or_else(
            |_| {
                Err(MolscopeError::Network(format!(
                    "{id}: {what} fetch panicked"
                )))
            },
            |r| r.map(Fresh),
        ),
        Some(Err(e)) => Err(MolscopeError::Thread(e)),
    }
}

/// One fetch cycle. `None` means the cycle was superseded and backed off.
fn run_cycle(
    cache: &StructureCache,
    repository: &dyn StructureRepository,
    id: &str,
    token: &CancelToken,
) -> Option<Result<Loaded, String>> {
    let cached_file = cache.get_structure_file(id);
    let cached_metadata = cache.get_metadata(id);
    if let (Some(data), Some(metadata)) = (&cached_file, &cached_metadata) {
        log::debug!("{id}: served from cache");
        return Some(Ok((data.clone(), metadata.clone())));
    }

    if token.is_cancelled() {
        return None;
    }

    let (file, metadata) = std::thread::scope(|scope| {
        let file_task = match &cached_file {
            Some(_) => None,
            None => Some(
                std::thread::Builder::new()
                    .name(format!("fetch-{id}-file"))
                    .spawn_scoped(scope, || repository.fetch_structure_file(id)),
            ),
        };
        let metadata_task = match &cached_metadata {
            Some(_) => None,
            None => Some(
                std::thread::Builder::new()
                    .name(format!("fetch-{id}-metadata"))
                    .spawn_scoped(scope, || repository.fetch_metadata(id)),
            ),
        };
        (
            settle(id, "structure file", file_task, cached_file),
            settle(id, "metadata", metadata_task, cached_metadata),
        )
    });

    if token.is_cancelled() {
        return None;
    }

    // Freshly fetched halves are cached even when the other half failed.
    if let Ok(Fresh(data)) = &file {
        cache.set_structure_file(id, data);
    }
    if let Ok(Fresh(record)) = &metadata {
        cache.set_metadata(id, record);
    }

    Some(match (file, metadata) {
        (Ok(file), Ok(metadata)) => Ok((file.into_inner(), metadata.into_inner())),
        (Err(e), _) | (_, Err(e)) => {
            log::debug!("{id}: fetch failed: {e}");
            Err(e.to_string())
        }
    })
}
