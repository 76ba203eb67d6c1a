use std::time::Duration;

use egui_kittest::Harness;
use roster_business::BusinessConfig;
use roster_ui::RosterApp;
use roster_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Long enough for a local mock server to answer.
pub const DEFAULT_NETWORK_WAIT_MS: u64 = 200;

pub struct TestCtx<'a, T = RosterApp> {
    mock_server: MockServer,
    harness: Harness<'a, T>,
}

impl<'a, T> TestCtx<'a, T> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, T> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, T> {
        &self.harness
    }

    /// How many requests the mock server has answered so far.
    #[allow(unused)]
    pub async fn request_count(&self) -> usize {
        self.mock_server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}

impl<'a> TestCtx<'a, RosterApp> {
    /// App whose users endpoint answers 200 with `users`.
    #[allow(unused)]
    pub async fn new_app_with_users(users: serde_json::Value) -> Self {
        Self::new_app_with(ResponseTemplate::new(200).set_body_json(users)).await
    }

    #[allow(unused)]
    pub async fn new_app_with_status(status_code: u16) -> Self {
        Self::new_app_with(ResponseTemplate::new(status_code)).await
    }

    /// App whose users endpoint answers only after `delay`.
    #[allow(unused)]
    pub async fn new_app_with_delay(users: serde_json::Value, delay: Duration) -> Self {
        Self::new_app_with(
            ResponseTemplate::new(200)
                .set_body_json(users)
                .set_delay(delay),
        )
        .await
    }

    /// App whose users endpoint answers 200 with `users`, configured by `config`
    /// from the endpoint URL.
    #[allow(unused)]
    pub async fn new_app_with_config(
        users: serde_json::Value,
        config: impl FnOnce(String) -> BusinessConfig,
    ) -> Self {
        Self::new_app_from(ResponseTemplate::new(200).set_body_json(users), |url| {
            State::new(config(url))
        })
        .await
    }

    async fn new_app_with(response: ResponseTemplate) -> Self {
        Self::new_app_from(response, State::test).await
    }

    async fn new_app_from(response: ResponseTemplate, state: impl FnOnce(String) -> State) -> Self {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        let state = state(format!("{}/users", mock_server.uri()));
        let app = RosterApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }
}

/// Yields to the runtime so spawned fetches can complete.
pub async fn yield_wait_for_network(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Runs frames, waits for the network, then runs frames again so results are applied.
#[allow(unused)]
pub async fn step_through_fetch<T>(harness: &mut Harness<'_, T>) {
    for _ in 0..3 {
        harness.step();
    }

    yield_wait_for_network(DEFAULT_NETWORK_WAIT_MS).await;

    for _ in 0..3 {
        harness.step();
    }
}

#[allow(unused)]
pub fn sample_users() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 1,
            "name": "Ana",
            "email": "a@x.com",
            "username": "ana",
            "phone": "1-770-736-8031",
            "address": { "city": "Gwenborough" }
        },
        {
            "id": 2,
            "name": "Bo",
            "email": "b@x.com",
            "username": "bo"
        }
    ])
}
