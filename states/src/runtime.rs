//! Platform glue for running fetches off the UI thread.
//!
//! - On **native**: tasks run on the ambient Tokio runtime, which the app entry point
//!   (or `#[tokio::test]`) provides.
//! - On **WASM**: tasks run on the JS event loop via `wasm_bindgen_futures::spawn_local`.
//!   There is no timer driver, so [`sleep`] returns immediately.

use std::future::Future;

use chrono::TimeDelta;

use crate::{QueryError, QueryKey};

/// Spawns `future` for the query `key`.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F>(key: QueryKey, future: F) -> Result<(), QueryError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle =
        tokio::runtime::Handle::try_current().map_err(|_| QueryError::no_runtime(key))?;
    handle.spawn(future);
    Ok(())
}

/// Spawns `future` for the query `key`.
#[cfg(target_arch = "wasm32")]
pub fn spawn<F>(_key: QueryKey, future: F) -> Result<(), QueryError>
where
    F: Future<Output = ()> + Send + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
    Ok(())
}

/// Waits for `delay`. Negative delays do not wait.
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(delay: TimeDelta) {
    if let Ok(delay) = delay.to_std() {
        tokio::time::sleep(delay).await;
    }
}

/// Waits for `delay`. Negative delays do not wait.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(_delay: TimeDelta) {}
