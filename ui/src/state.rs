use std::time::Duration;

use chrono::Utc;
use log::{error, warn};
use roster_business::{BusinessConfig, UsersCache, request_users};

/// How often to repaint while a fetch is in flight, so its result shows up.
const FETCH_REPAINT_INTERVAL: Duration = Duration::from_millis(50);

/// The main application state.
#[derive(Debug)]
pub struct State {
    pub config: BusinessConfig,
    pub users: UsersCache,
    started: bool,
    focused: bool,
}

impl Default for State {
    fn default() -> Self {
        let config = if cfg!(target_arch = "wasm32") {
            BusinessConfig::default()
        } else {
            BusinessConfig::from_env().unwrap_or_else(|err| {
                warn!("Ignoring environment configuration: {err}");
                BusinessConfig::default()
            })
        };
        Self::new(config)
    }
}

impl State {
    pub fn new(config: BusinessConfig) -> Self {
        let users = UsersCache::new(config.query());
        Self {
            config,
            users,
            started: false,
            focused: true,
        }
    }

    pub fn test(users_url: String) -> Self {
        Self::new(BusinessConfig::test(users_url))
    }

    /// Per-frame upkeep: apply settled fetches, fetch users on the first frame and
    /// again when the window regains focus, keep repainting while a fetch runs.
    pub fn sync(&mut self, ctx: &egui::Context) {
        let now = Utc::now();
        self.users.sync(now);

        let focused = ctx.input(|i| i.focused);
        let regained_focus = focused && !self.focused;
        self.focused = focused;

        if !self.started || regained_focus {
            self.started = true;
            if let Err(err) = request_users(&mut self.users, &self.config, now) {
                error!("Cannot request users: {err}");
            }
        }

        if self.users.is_fetching_any() {
            ctx.request_repaint_after(FETCH_REPAINT_INTERVAL);
        }
    }
}
