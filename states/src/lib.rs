//! Query state machinery for the roster app.
//!
//! A [`QueryCache`] owns the lifecycle of remote data keyed by [`QueryKey`]:
//! it deduplicates in-flight fetches, retries failures per [`QueryConfig`],
//! decides staleness against an explicit clock, and exposes the latest
//! [`QueryState`] to the UI thread.

mod cache;
mod error;
mod query;
mod runtime;
mod task;

pub use cache::QueryCache;
pub use error::QueryError;
pub use query::{QueryConfig, QueryKey, QueryState};
pub use runtime::{sleep, spawn};
pub use task::{TaskHandle, TaskId};
