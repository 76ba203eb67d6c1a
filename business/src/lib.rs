//! Data and interaction logic of the roster app, free of any rendering.

mod config;
mod fetch_users;
pub mod http;
mod interaction;
mod tabular;
mod user;

pub use config::{BusinessConfig, ConfigError, DEFAULT_USERS_URL};
pub use fetch_users::{
    FetchUsersError, UsersCache, UsersState, fetch_users, refetch_users, request_users,
    users_query,
};
pub use interaction::RowInteractionState;
pub use tabular::{RowId, Tabular};
pub use user::{UserField, UserRecord};
