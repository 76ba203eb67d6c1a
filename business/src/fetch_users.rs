//! The users data source.
//!
//! [`fetch_users`] performs exactly one GET and classifies the outcome. It never
//! retries or caches; [`request_users`] hands it to the [`QueryCache`], which owns
//! retry, deduplication and staleness.

use chrono::{DateTime, Utc};
use log::{error, info};
use roster_states::{QueryCache, QueryError, QueryKey, QueryState};
use thiserror::Error;

use crate::http::Client;
use crate::{BusinessConfig, UserRecord};

/// Cache key of the users list.
pub fn users_query() -> QueryKey {
    QueryKey::new("users")
}

pub type UsersCache = QueryCache<Vec<UserRecord>, FetchUsersError>;
pub type UsersState = QueryState<Vec<UserRecord>, FetchUsersError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchUsersError {
    /// The server answered with a non-2xx status.
    #[error("Network response was not ok")]
    Network { status: u16 },
    /// The request never got a response.
    #[error("{0}")]
    Transport(String),
    /// The body is not a JSON array of users.
    #[error("Invalid users payload: {0}")]
    Parse(String),
}

impl FetchUsersError {
    pub fn status(&self) -> Option<u16> {
        if let Self::Network { status } = self {
            Some(*status)
        } else {
            None
        }
    }
}

/// Fetches the users list from `url`.
pub async fn fetch_users(url: String) -> Result<Vec<UserRecord>, FetchUsersError> {
    let response = Client::get(url.as_str()).send().await.map_err(|err| {
        error!("Fetch users from {url} failed: {err}");
        FetchUsersError::Transport(err.message)
    })?;

    if !response.is_success() {
        error!("Fetch users from {url} returned status {}", response.status);
        return Err(FetchUsersError::Network {
            status: response.status,
        });
    }

    let users: Vec<UserRecord> = response.json().map_err(|err| {
        error!(
            "Fetch users from {url}: cannot parse body (content-type {:?}): {err}",
            response.header("content-type")
        );
        FetchUsersError::Parse(err.to_string())
    })?;

    info!("Fetched {} users from {url}", users.len());
    Ok(users)
}

/// Asks `cache` for the users list, fetching only when it is missing or stale.
///
/// Returns `Ok(true)` when a fetch was started.
pub fn request_users(
    cache: &mut UsersCache,
    config: &BusinessConfig,
    now: DateTime<Utc>,
) -> Result<bool, QueryError> {
    let url = config.users_url().to_owned();
    cache.ensure(users_query(), now, move || fetch_users(url.clone()))
}

/// Fetches the users list even if the cached copy is fresh.
pub fn refetch_users(cache: &mut UsersCache, config: &BusinessConfig) -> Result<bool, QueryError> {
    let url = config.users_url().to_owned();
    cache.refetch(users_query(), move || fetch_users(url.clone()))
}
