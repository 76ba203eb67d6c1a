//! Integration tests for the users data source and its cache wiring.

use std::time::Duration;

use chrono::Utc;
use roster_business::{
    BusinessConfig, FetchUsersError, UserRecord, UsersCache, fetch_users, refetch_users,
    request_users, users_query,
};
use roster_states::{QueryConfig, QueryState};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_users(status: u16, body: serde_json::Value) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&mock_server)
        .await;
    mock_server
}

fn users_url(mock_server: &MockServer) -> String {
    format!("{}/users", mock_server.uri())
}

async fn settle(cache: &mut UsersCache) {
    for _ in 0..200 {
        if cache.sync(Utc::now()) > 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("query never settled");
}

#[tokio::test]
async fn fetch_users_parses_records() {
    let mock_server = mock_users(
        200,
        json!([{ "id": 1, "name": "Ana", "email": "a@x.com", "username": "ana" }]),
    )
    .await;

    let users = fetch_users(users_url(&mock_server))
        .await
        .expect("fetch should succeed");

    assert_eq!(
        users,
        vec![UserRecord {
            id: 1,
            name: "Ana".to_owned(),
            email: "a@x.com".to_owned(),
            username: "ana".to_owned(),
        }]
    );
}

#[tokio::test]
async fn fetch_users_accepts_empty_list() {
    let mock_server = mock_users(200, json!([])).await;
    let users = fetch_users(users_url(&mock_server))
        .await
        .expect("fetch should succeed");
    assert!(users.is_empty());
}

#[tokio::test]
async fn fetch_users_reports_http_failure() {
    let mock_server = mock_users(500, json!({ "error": "boom" })).await;

    let err = fetch_users(users_url(&mock_server))
        .await
        .expect_err("500 must fail");

    assert_eq!(err, FetchUsersError::Network { status: 500 });
    assert_eq!(err.to_string(), "Network response was not ok");
}

#[tokio::test]
async fn fetch_users_reports_unexpected_shape() {
    let mock_server = mock_users(200, json!({ "users": [] })).await;

    let err = fetch_users(users_url(&mock_server))
        .await
        .expect_err("object body must fail");

    assert!(matches!(err, FetchUsersError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn fetch_users_reports_transport_failure() {
    // Nothing listens on port 1.
    let err = fetch_users("http://127.0.0.1:1/users".to_owned())
        .await
        .expect_err("connection must fail");

    assert!(matches!(err, FetchUsersError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn cached_users_are_fetched_once_while_fresh() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Ana", "email": "a@x.com", "username": "ana" },
            { "id": 2, "name": "Bo", "email": "b@x.com", "username": "bo" }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = BusinessConfig::test(users_url(&mock_server));
    let mut cache = UsersCache::new(config.query());

    assert_eq!(request_users(&mut cache, &config, Utc::now()), Ok(true));
    assert_eq!(request_users(&mut cache, &config, Utc::now()), Ok(false));
    settle(&mut cache).await;

    assert_eq!(cache.data(&users_query()).map(Vec::len), Some(2));
    assert_eq!(request_users(&mut cache, &config, Utc::now()), Ok(false));
    // `expect(1)` is verified when the mock server drops.
}

#[tokio::test]
async fn refetch_ignores_freshness() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = BusinessConfig::test(users_url(&mock_server));
    let mut cache = UsersCache::new(config.query());

    request_users(&mut cache, &config, Utc::now()).expect("runtime");
    settle(&mut cache).await;
    assert_eq!(refetch_users(&mut cache, &config), Ok(true));
    settle(&mut cache).await;

    assert_eq!(cache.state(&users_query()), Some(&QueryState::Success(vec![])));
}

#[tokio::test]
async fn cache_retries_failed_fetch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = BusinessConfig::new(
        users_url(&mock_server),
        QueryConfig {
            retries: 2,
            retry_delay: chrono::TimeDelta::milliseconds(1),
            ..QueryConfig::default()
        },
    );
    let mut cache = UsersCache::new(config.query());

    request_users(&mut cache, &config, Utc::now()).expect("runtime");
    settle(&mut cache).await;

    assert_eq!(
        cache.state(&users_query()),
        Some(&QueryState::Error(FetchUsersError::Network { status: 500 }))
    );
}
