//! End-to-end 401 handling against a local HTTP server.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use buddy_auth::{CredentialStore, MemoryStore, TokenKey};
use buddy_client::{ApiClient, ApiError, HttpTransport};
use buddy_config::BuddyConfig;
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use serde_json::json;

const USER: &str = r#"{"id":3,"username":"ivanov","project":1,"date_joined":null}"#;

fn client(server: &Server, store: Arc<MemoryStore>) -> ApiClient<HttpTransport> {
    let mut config = BuddyConfig::default();
    config.api.base_url = server.url();
    ApiClient::from_config(&config, store).expect("client")
}

#[tokio::test]
async fn anonymous_request_has_no_authorization_header() {
    let mut server = Server::new_async().await;
    let me = server
        .mock("GET", "/api/users/me/")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_body(r#"{"detail":"Authentication credentials were not provided."}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/token/refresh/")
        .expect(0)
        .create_async()
        .await;

    let api = client(&server, Arc::new(MemoryStore::new()));
    let err = api.me().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert!(err.requires_login());
    me.assert_async().await;
    refresh.assert_async().await;
}

#[tokio::test]
async fn expired_access_is_refreshed_and_replayed_once() {
    let mut server = Server::new_async().await;
    let stale = server
        .mock("GET", "/api/users/me/")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .with_body(r#"{"detail":"Given token not valid for any token type"}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/token/refresh/")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({"refresh": "ref-1"})))
        .with_status(200)
        .with_body(r#"{"access":"fresh"}"#)
        .expect(1)
        .create_async()
        .await;
    let fresh = server
        .mock("GET", "/api/users/me/")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(USER)
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::with_pair("stale", "ref-1"));
    let api = client(&server, store.clone());
    let user = api.me().await.expect("replayed request succeeds");

    assert_eq!(user.username, "ivanov");
    assert_eq!(store.load(TokenKey::Access).as_deref(), Some("fresh"));
    stale.assert_async().await;
    refresh.assert_async().await;
    fresh.assert_async().await;
}

#[tokio::test]
async fn second_401_is_returned_without_another_refresh() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/queries/")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/token/refresh/")
        .with_status(200)
        .with_body(r#"{"access":"fresh"}"#)
        .expect(1)
        .create_async()
        .await;
    let replay = server
        .mock("GET", "/api/queries/")
        .match_header("authorization", "Bearer fresh")
        .with_status(401)
        .with_body(r#"{"detail":"User is inactive"}"#)
        .expect(1)
        .create_async()
        .await;

    let api = client(&server, Arc::new(MemoryStore::with_pair("stale", "ref-1")));
    let err = api.list_queries().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { ref message } if message == "User is inactive"));
    refresh.assert_async().await;
    replay.assert_async().await;
}

#[tokio::test]
async fn rejected_refresh_clears_credentials() {
    let mut server = Server::new_async().await;
    let original = server
        .mock("GET", "/api/projects/my_project/")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    server
        .mock("POST", "/api/token/refresh/")
        .with_status(401)
        .with_body(r#"{"detail":"Token is blacklisted","code":"token_not_valid"}"#)
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::with_pair("stale", "ref-1"));
    let expired = Arc::new(AtomicUsize::new(0));
    let counter = expired.clone();
    let api = client(&server, store.clone()).with_session_expired_hook(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let err = api.my_project().await.unwrap_err();

    assert!(matches!(err, ApiError::SessionExpired { .. }));
    assert!(err.to_string().contains("buddy auth login"));
    assert!(store.load(TokenKey::Access).is_none());
    assert!(store.load(TokenKey::Refresh).is_none());
    assert_eq!(expired.load(Ordering::SeqCst), 1);
    original.assert_async().await;
}

#[tokio::test]
async fn unreachable_refresh_endpoint_is_a_session_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/users/me/")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("POST", "/api/token/refresh/")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::with_pair("stale", "ref-1"));
    let api = client(&server, store.clone());
    let err = api.me().await.unwrap_err();

    assert!(
        matches!(err, ApiError::SessionExpired { ref reason } if reason == "request failed with status 502")
    );
    assert!(store.load(TokenKey::Refresh).is_none());
}

#[tokio::test]
async fn concurrent_401s_each_get_a_retry() {
    let mut server = Server::new_async().await;
    for path in ["/api/users/me/", "/api/queries/"] {
        server
            .mock("GET", path)
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .create_async()
            .await;
    }
    let refresh = server
        .mock("POST", "/api/token/refresh/")
        .with_status(200)
        .with_body(r#"{"access":"fresh"}"#)
        .expect_at_least(1)
        .expect_at_most(2)
        .create_async()
        .await;
    let me = server
        .mock("GET", "/api/users/me/")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(USER)
        .expect(1)
        .create_async()
        .await;
    let queries = server
        .mock("GET", "/api/queries/")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let api = client(&server, Arc::new(MemoryStore::with_pair("stale", "ref-1")));
    let (user, list) = tokio::join!(api.me(), api.list_queries());

    assert_eq!(user.expect("me succeeds").id, 3);
    assert!(list.expect("list succeeds").is_empty());
    refresh.assert_async().await;
    me.assert_async().await;
    queries.assert_async().await;
}
