use std::fmt::{Display, Formatter};

use chrono::TimeDelta;
use ustr::Ustr;

/// Identifier of a cached query, e.g. `"users"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Ustr);

impl QueryKey {
    pub fn new(key: &str) -> Self {
        Self(Ustr::from(key))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for QueryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Longest wait between two attempts of the same fetch.
pub const MAX_RETRY_DELAY: TimeDelta = TimeDelta::seconds(30);

/// Retry and staleness policy of a [`crate::QueryCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// Extra attempts after the first failure.
    pub retries: u32,
    /// How long a settled result counts as fresh.
    pub stale_time: TimeDelta,
    /// Base delay before the first retry, doubled for each following one.
    pub retry_delay: TimeDelta,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            stale_time: TimeDelta::zero(),
            retry_delay: TimeDelta::seconds(1),
        }
    }
}

impl QueryConfig {
    /// Delay before retry number `attempt` (0-based), capped at [`MAX_RETRY_DELAY`].
    pub fn retry_backoff(&self, attempt: u32) -> TimeDelta {
        2i32.checked_pow(attempt)
            .and_then(|factor| self.retry_delay.checked_mul(factor))
            .map_or(MAX_RETRY_DELAY, |delay| delay.min(MAX_RETRY_DELAY))
    }
}

/// Observable lifecycle of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T, E> {
    /// First fetch in progress, no data yet.
    Pending,
    /// The last fetch failed after all retries.
    Error(E),
    /// The last fetch succeeded.
    Success(T),
}

impl<T, E> QueryState<T, E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        if let Self::Success(data) = self {
            Some(data)
        } else {
            None
        }
    }

    pub fn error(&self) -> Option<&E> {
        if let Self::Error(err) = self {
            Some(err)
        } else {
            None
        }
    }
}
