//! Handles for in-flight query fetches.
//!
//! Every fetch the [`crate::QueryCache`] spawns gets a [`TaskId`] (query key plus a
//! generation counter) and a [`TaskHandle`] wrapping a `CancellationToken` from
//! `tokio_util`. The cache keeps the handle of the current fetch per key; a result
//! whose `TaskId` no longer matches is stale and dropped.
//!
//! Cancellation is cooperative: the fetch loop races its work against
//! `token.cancelled()` and stops at the next await point once cancelled.

use tokio_util::sync::CancellationToken;

use crate::QueryKey;

/// Unique identifier of one spawned fetch.
///
/// Two fetches of the same key differ by generation; the higher generation is the
/// more recent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    key: QueryKey,
    generation: u64,
}

impl TaskId {
    pub fn new(key: QueryKey, generation: u64) -> Self {
        Self { key, generation }
    }

    pub fn key(&self) -> QueryKey {
        self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Handle to a spawned fetch with cooperative cancellation.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Token to hand to the spawned work so it can observe cancellation.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Requests cancellation. The task stops at its next check point; it is not aborted.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}
