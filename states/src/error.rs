use thiserror::Error;

use crate::QueryKey;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("No async runtime available to run query {key}")]
    NoRuntime { key: QueryKey },
}

impl QueryError {
    pub fn no_runtime(key: QueryKey) -> Self {
        Self::NoRuntime { key }
    }
}
