//! The query cache.
//!
//! Fetches are side effects, so the cache never runs one implicitly. Callers ask for
//! data with [`QueryCache::ensure`] (fetch only when missing or stale) or
//! [`QueryCache::refetch`] (fetch unless one is already running). Spawned fetches
//! report back over a `flume` channel; [`QueryCache::sync`] applies those results on
//! the owning thread, once per frame.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::future::Future;

use chrono::{DateTime, Utc};
use flume::{Receiver, Sender};
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::{QueryConfig, QueryError, QueryKey, QueryState, TaskHandle, TaskId, runtime};

struct Settled<T, E> {
    task: TaskId,
    result: Result<T, E>,
}

struct Entry<T, E> {
    state: QueryState<T, E>,
    updated_at: Option<DateTime<Utc>>,
    invalidated: bool,
    in_flight: Option<TaskHandle>,
}

impl<T, E> Entry<T, E> {
    fn new() -> Self {
        Self {
            state: QueryState::Pending,
            updated_at: None,
            invalidated: false,
            in_flight: None,
        }
    }
}

pub struct QueryCache<T, E> {
    config: QueryConfig,
    entries: BTreeMap<QueryKey, Entry<T, E>>,
    generation: u64,
    send: Sender<Settled<T, E>>,
    recv: Receiver<Settled<T, E>>,
}

impl<T, E> std::fmt::Debug for QueryCache<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("config", &self.config)
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .field("generation", &self.generation)
            .finish()
    }
}

impl<T, E> QueryCache<T, E>
where
    T: Send + 'static,
    E: Display + Send + 'static,
{
    pub fn new(config: QueryConfig) -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            config,
            entries: BTreeMap::new(),
            generation: 0,
            send,
            recv,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Current state of `key`, `None` if it was never requested.
    pub fn state(&self, key: &QueryKey) -> Option<&QueryState<T, E>> {
        self.entries.get(key).map(|entry| &entry.state)
    }

    pub fn data(&self, key: &QueryKey) -> Option<&T> {
        self.state(key).and_then(QueryState::data)
    }

    /// Whether a fetch for `key` is running, including background refetches.
    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.in_flight.is_some())
    }

    pub fn is_fetching_any(&self) -> bool {
        self.entries.values().any(|entry| entry.in_flight.is_some())
    }

    /// A key is stale when it was never settled, was invalidated, or settled at least
    /// `stale_time` before `now`.
    pub fn is_stale(&self, key: &QueryKey, now: DateTime<Utc>) -> bool {
        match self.entries.get(key) {
            None => true,
            Some(entry) if entry.invalidated => true,
            Some(Entry {
                updated_at: Some(updated_at),
                ..
            }) => now.signed_duration_since(*updated_at) >= self.config.stale_time,
            Some(_) => true,
        }
    }

    /// Starts a fetch when `key` is missing or stale and none is in flight.
    ///
    /// Returns `Ok(true)` when a fetch was started.
    pub fn ensure<F, Fut>(
        &mut self,
        key: QueryKey,
        now: DateTime<Utc>,
        fetcher: F,
    ) -> Result<bool, QueryError>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        if self.is_fetching(&key) || !self.is_stale(&key, now) {
            return Ok(false);
        }
        self.start(key, fetcher).map(|()| true)
    }

    /// Starts a fetch for `key` regardless of staleness, unless one is in flight.
    pub fn refetch<F, Fut>(&mut self, key: QueryKey, fetcher: F) -> Result<bool, QueryError>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        if self.is_fetching(&key) {
            debug!("Query {key} already in flight, skip refetch");
            return Ok(false);
        }
        self.start(key, fetcher).map(|()| true)
    }

    /// Marks `key` stale and cancels its in-flight fetch. Cached data stays readable.
    ///
    /// Nothing is fetched here. A key invalidated during its first fetch stays
    /// `Pending` with no fetch running until the caller follows up with
    /// [`Self::ensure`] or [`Self::refetch`].
    pub fn invalidate(&mut self, key: &QueryKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.invalidated = true;
            if let Some(task) = entry.in_flight.take() {
                info!("Cancel query {key} generation {}", task.id().generation());
                task.cancel();
            }
        }
    }

    /// Applies settled fetches. Returns how many results were applied.
    pub fn sync(&mut self, now: DateTime<Utc>) -> usize {
        let mut applied = 0;
        while let Ok(Settled { task, result }) = self.recv.try_recv() {
            let key = task.key();
            let Some(entry) = self.entries.get_mut(&key) else {
                continue;
            };
            if entry.in_flight.as_ref().map(TaskHandle::id) != Some(task) {
                debug!(
                    "Drop stale result of query {key} generation {}",
                    task.generation()
                );
                continue;
            }

            entry.in_flight = None;
            entry.updated_at = Some(now);
            entry.invalidated = false;
            entry.state = match result {
                Ok(data) => {
                    info!("Query {key} succeeded");
                    QueryState::Success(data)
                }
                Err(err) => {
                    warn!("Query {key} failed: {err}");
                    QueryState::Error(err)
                }
            };
            applied += 1;
        }
        applied
    }

    fn start<F, Fut>(&mut self, key: QueryKey, fetcher: F) -> Result<(), QueryError>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        self.generation += 1;
        let task = TaskHandle::new(
            TaskId::new(key, self.generation),
            CancellationToken::new(),
        );

        let job = run_fetch(
            task.id(),
            task.cancellation_token(),
            self.config,
            fetcher,
            self.send.clone(),
        );
        runtime::spawn(key, job)?;

        info!("Fetch query {key} generation {}", task.id().generation());
        let entry = self.entries.entry(key).or_insert_with(Entry::new);
        if !entry.state.is_success() {
            entry.state = QueryState::Pending;
        }
        entry.in_flight = Some(task);
        Ok(())
    }
}

impl<T, E> Drop for QueryCache<T, E> {
    fn drop(&mut self) {
        for entry in self.entries.values() {
            if let Some(task) = &entry.in_flight {
                task.cancel();
            }
        }
    }
}

async fn run_fetch<T, E, F, Fut>(
    task: TaskId,
    cancel: CancellationToken,
    config: QueryConfig,
    fetcher: F,
    send: Sender<Settled<T, E>>,
) where
    E: Display,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let key = task.key();
    let mut attempt = 0;
    let result = loop {
        let outcome = tokio::select! {
            _ = cancel.cancelled() => return,
            outcome = fetcher() => outcome,
        };
        match outcome {
            Err(err) if attempt < config.retries => {
                let delay = config.retry_backoff(attempt);
                attempt += 1;
                warn!(
                    "Query {key} attempt {attempt} failed: {err}, retry in {}ms",
                    delay.num_milliseconds()
                );
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = runtime::sleep(delay) => {}
                }
            }
            outcome => break outcome,
        }
    };

    // The cache may be gone already; nothing to report to then.
    let _ = send.send_async(Settled { task, result }).await;
}
