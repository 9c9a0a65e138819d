//! Superseding fetch handle: one outstanding request per parameter
//! set, last parameter set wins.
//!
//! [`QueryHandle`] is the stateful counterpart of the raw
//! [`DataSource`] call. Each [`refetch`](QueryHandle::refetch) bumps a
//! generation counter and resets the result slot to the loading
//! sentinel; when a fetch resolves, its result is applied only if its
//! generation is still current, so a slow response for an abandoned
//! parameter set can never overwrite the latest one.
//!
//! Fetch failures never propagate to the reader: the slot stays at the
//! sentinel, the condition is reported via `tracing`, and the caller
//! keeps rendering its default. Callers that want to handle errors
//! themselves use [`DataSource::fetch_rows`] directly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use covdash_core::row::AreaRow;

use crate::query::DataQuery;
use crate::source::DataSource;

/// Shared state between the handle and its in-flight fetch tasks.
struct HandleState {
    /// Incremented on every refetch; a resolving fetch applies its
    /// result only when its own generation is still current.
    generation: AtomicU64,
    /// `None` is the loading sentinel. Held only for non-awaiting
    /// critical sections.
    slot: Mutex<Option<Vec<AreaRow>>>,
}

impl HandleState {
    /// Lock the slot, recovering from poisoning (a panicked fetch task
    /// leaves the slot contents intact).
    fn slot(&self) -> MutexGuard<'_, Option<Vec<AreaRow>>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A query slot that always reflects the most recent parameter set.
pub struct QueryHandle {
    source: Arc<dyn DataSource>,
    state: Arc<HandleState>,
}

impl QueryHandle {
    /// Create a handle over the given source. No fetch is issued until
    /// the first [`refetch`](Self::refetch).
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            state: Arc::new(HandleState {
                generation: AtomicU64::new(0),
                slot: Mutex::new(None),
            }),
        }
    }

    /// Issue a fetch for a new parameter set, superseding any fetch
    /// still in flight.
    ///
    /// The result slot is reset to the loading sentinel before the
    /// fetch starts, so readers never observe data belonging to the
    /// previous parameter set. The returned join handle is only needed
    /// by callers that want to await completion (tests do; rendering
    /// code does not).
    pub fn refetch(&self, query: DataQuery) -> tokio::task::JoinHandle<()> {
        let generation = self.state.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.slot() = None;

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            let result = source.fetch_rows(&query).await;

            // The generation must be re-read under the slot lock: a
            // refetch bumps it before taking the lock, so a stale task
            // that passed an earlier check cannot slip its write in
            // between the newer task's write and a reader's snapshot.
            let mut slot = state.slot();
            if state.generation.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, "Discarding superseded fetch result");
                return;
            }

            match result {
                Ok(rows) => {
                    *slot = Some(rows);
                }
                Err(e) => {
                    tracing::warn!(generation, error = %e, "Data fetch failed; keeping default response");
                }
            }
        })
    }

    /// Current result: `None` until a fetch for the latest parameter
    /// set has resolved successfully.
    pub fn snapshot(&self) -> Option<Vec<AreaRow>> {
        self.state.slot().clone()
    }

    /// Current result, falling back to the caller's default while
    /// loading (or after a failed fetch).
    pub fn snapshot_or(&self, default: Vec<AreaRow>) -> Vec<AreaRow> {
        self.snapshot().unwrap_or(default)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
