use std::env::vars;

use chrono::TimeDelta;
use log::info;
use roster_states::QueryConfig;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Prefix of the environment variables read by [`BusinessConfig::from_env`].
const ENV_PREFIX: &str = "ROSTER_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid ROSTER_* environment: {0}")]
    Env(#[from] serde_env::Error),
    #[error("{name} is out of range: {value}")]
    OutOfRange { name: &'static str, value: u64 },
}

/// Overrides as they appear in the environment, prefix stripped.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    users_url: Option<String>,
    retries: Option<u32>,
    stale_time_secs: Option<u64>,
    retry_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    users_url: String,
    query: QueryConfig,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            users_url: DEFAULT_USERS_URL.to_owned(),
            query: QueryConfig::default(),
        }
    }
}

impl BusinessConfig {
    pub fn new(users_url: impl Into<String>, query: QueryConfig) -> Self {
        Self {
            users_url: users_url.into(),
            query,
        }
    }

    /// Config for tests: `users_url` points at a mock server, failures are not retried.
    pub fn test(users_url: impl Into<String>) -> Self {
        Self::new(
            users_url,
            QueryConfig {
                retries: 0,
                stale_time: TimeDelta::minutes(5),
                retry_delay: TimeDelta::zero(),
            },
        )
    }

    /// Defaults overlaid with `ROSTER_USERS_URL`, `ROSTER_RETRIES`,
    /// `ROSTER_STALE_TIME_SECS` and `ROSTER_RETRY_DELAY_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(vars())
    }

    fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self, ConfigError> {
        let prefixed: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(ENV_PREFIX)
                    .map(|name| (name.to_owned(), value))
            })
            .collect();
        if prefixed.is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig = serde_env::from_iter(prefixed)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = raw.users_url {
            info!("Using provided {ENV_PREFIX}USERS_URL: {url}");
            config.users_url = url;
        }
        if let Some(retries) = raw.retries {
            config.query.retries = retries;
        }
        if let Some(secs) = raw.stale_time_secs {
            config.query.stale_time = i64::try_from(secs)
                .ok()
                .and_then(TimeDelta::try_seconds)
                .ok_or(ConfigError::OutOfRange {
                    name: "STALE_TIME_SECS",
                    value: secs,
                })?;
        }
        if let Some(ms) = raw.retry_delay_ms {
            config.query.retry_delay = i64::try_from(ms)
                .ok()
                .and_then(TimeDelta::try_milliseconds)
                .ok_or(ConfigError::OutOfRange {
                    name: "RETRY_DELAY_MS",
                    value: ms,
                })?;
        }

        Ok(config)
    }

    pub fn users_url(&self) -> &str {
        &self.users_url
    }

    pub fn query(&self) -> QueryConfig {
        self.query
    }
}
