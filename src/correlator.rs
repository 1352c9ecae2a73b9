//! Request/response correlation
//!
//! Outbound requests carry monotonically increasing ids; the clearnode echoes
//! the id in its response. Responses are matched here, never by arrival
//! order. Each pending entry resolves at most once; duplicate or late
//! responses for an unknown id are no-ops.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::debug;

use crate::error::{ClearnodeError, Result};

/// A request awaiting its correlated response.
struct PendingRequest {
    tx: oneshot::Sender<Result<Value>>,
    created_at: Instant,
}

/// Allocates request ids and tracks outstanding requests.
pub struct RequestCorrelator {
    next_id: AtomicU64,
    pending: DashMap<u64, PendingRequest>,
}

impl RequestCorrelator {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            pending: DashMap::new(),
        }
    }

    /// Allocate the next request id. Ids are unique and strictly increasing
    /// for the lifetime of the client.
    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Register a pending entry for `id`, returning the receiver half the
    /// caller awaits on.
    pub fn register(&self, id: u64) -> oneshot::Receiver<Result<Value>> {
        let (tx, rx) = oneshot::channel();
        self.pending.insert(
            id,
            PendingRequest {
                tx,
                created_at: Instant::now(),
            },
        );
        rx
    }

    /// Resolve the pending entry for `id`. Returns false when no entry
    /// exists (timed out, already resolved, or never registered).
    pub fn resolve(&self, id: u64, outcome: Result<Value>) -> bool {
        match self.pending.remove(&id) {
            Some((_, entry)) => {
                debug!(
                    "Resolving request {} after {:?}",
                    id,
                    entry.created_at.elapsed()
                );
                // Receiver may have been dropped by a timed-out caller
                let _ = entry.tx.send(outcome);
                true
            }
            None => {
                debug!("Response for unknown request id {}, ignoring", id);
                false
            }
        }
    }

    /// Drop the pending entry for `id` without resolving it. Called when the
    /// awaiting side times out, so a late response finds nothing to resolve.
    pub fn forget(&self, id: u64) {
        self.pending.remove(&id);
    }

    /// Whether a request is still outstanding.
    pub fn is_pending(&self, id: u64) -> bool {
        self.pending.contains_key(&id)
    }

    /// Fail every outstanding request immediately. Called on connection
    /// close so callers get fast feedback instead of waiting out the timeout.
    pub fn fail_all(&self, reason: &str) {
        let ids: Vec<u64> = self.pending.iter().map(|e| *e.key()).collect();
        for id in ids {
            self.resolve(id, Err(ClearnodeError::Transport(reason.to_string())));
        }
    }

    /// Number of outstanding requests.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for RequestCorrelator {
    fn default() -> Self {
        Self::new()
    }
}
