//! Endpoint wrappers against a local HTTP server.

use std::sync::Arc;

use buddy_auth::{CredentialStore, MemoryStore, TokenKey};
use buddy_client::{ApiClient, ApiError, HttpTransport};
use buddy_config::BuddyConfig;
use buddy_core::entities::{PasswordChange, ProjectUpdate, Query};
use buddy_core::{CoreError, QueryStatus};
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use serde_json::json;

fn client(server: &Server) -> ApiClient<HttpTransport> {
    let mut config = BuddyConfig::default();
    config.api.base_url = format!("{}/", server.url());
    ApiClient::from_config(&config, Arc::new(MemoryStore::with_pair("acc", "ref"))).expect("client")
}

fn query_json(id: u64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "project": 1,
        "project_name": "Billing",
        "user": 3,
        "user_name": "ivanov",
        "query_text": "Write regression tests for invoices",
        "answer_text": "",
        "status": status,
        "query_created": "2025-03-01T10:00:00Z",
        "query_started": "2025-03-01T10:00:05Z",
        "query_finished": null,
        "logs_count": 0
    })
}

#[tokio::test]
async fn bare_and_paginated_lists_yield_same_queries() {
    let mut server = Server::new_async().await;
    let items = json!([query_json(1, "queued"), query_json(2, "done")]);
    server
        .mock("GET", "/api/queries/")
        .with_status(200)
        .with_body(items.to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/api/queries/by_status/")
        .match_query(Matcher::UrlEncoded("status".into(), "done".into()))
        .with_status(200)
        .with_body(json!({"count": 2, "next": null, "previous": null, "results": items}).to_string())
        .create_async()
        .await;

    let api = client(&server);
    let bare = api.list_queries().await.unwrap();
    let paged = api.queries_by_status(QueryStatus::Done).await.unwrap();

    assert_eq!(bare, paged);
    assert_eq!(bare.len(), 2);
}

#[tokio::test]
async fn create_query_posts_project_and_text() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/api/queries/")
        .match_header("authorization", "Bearer acc")
        .match_body(Matcher::Json(json!({"project": 1, "query_text": "Write regression tests for invoices"})))
        .with_status(201)
        .with_body(query_json(10, "queued").to_string())
        .create_async()
        .await;

    let query = client(&server)
        .create_query(1, "Write regression tests for invoices")
        .await
        .unwrap();

    assert_eq!(query.id, 10);
    assert_eq!(query.status, QueryStatus::Queued);
    create.assert_async().await;
}

#[tokio::test]
async fn delete_is_refused_for_running_query() {
    let mut server = Server::new_async().await;
    let delete = server
        .mock("DELETE", "/api/queries/4/")
        .expect(0)
        .create_async()
        .await;

    let query: Query = serde_json::from_value(query_json(4, "in_progress")).unwrap();
    let err = client(&server).delete_query(&query).await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::Core(CoreError::NotDeletable { id: 4, status: QueryStatus::InProgress })
    ));
    delete.assert_async().await;
}

#[tokio::test]
async fn delete_failure_surfaces_server_message() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/api/queries/4/")
        .with_status(400)
        .with_body(r#"{"error":"Cannot delete query in progress"}"#)
        .create_async()
        .await;

    let query: Query = serde_json::from_value(query_json(4, "done")).unwrap();
    let err = client(&server).delete_query(&query).await.unwrap_err();

    assert_eq!(err.to_string(), "Cannot delete query in progress (HTTP 400)");
}

#[tokio::test]
async fn project_update_omits_blank_tokens() {
    let mut server = Server::new_async().await;
    let project = json!({
        "id": 1,
        "project_name": "Billing",
        "test_it_project_id": "TI-1",
        "jira_project_id": "BILL",
        "project_context": "invoices",
        "test_it_token_masked": "****abcd",
        "jira_token_masked": "****wxyz"
    });
    server
        .mock("GET", "/api/projects/my_project/")
        .with_status(200)
        .with_body(project.to_string())
        .create_async()
        .await;
    let update = server
        .mock("PATCH", "/api/projects/1/")
        .match_body(Matcher::Json(json!({
            "test_it_project_id": "TI-1",
            "jira_project_id": "BILL-2",
            "project_context": "invoices"
        })))
        .with_status(200)
        .with_body(project.to_string())
        .expect(1)
        .create_async()
        .await;

    let api = client(&server);
    let current = api.my_project().await.unwrap();
    let mut body = ProjectUpdate::from_project(&current)
        .with_test_it_token(Some(String::new()))
        .with_jira_token(None);
    body.jira_project_id = "BILL-2".into();
    api.update_project(current.id, &body).await.unwrap();

    update.assert_async().await;
}

#[tokio::test]
async fn password_field_errors_are_reported() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/users/change_password/")
        .with_status(400)
        .with_body(r#"{"old_password":["Wrong password"]}"#)
        .create_async()
        .await;

    let change = PasswordChange {
        old_password: "guess".into(),
        new_password: "correct horse".into(),
        confirm_password: "correct horse".into(),
    };
    let err = client(&server).change_password(&change).await.unwrap_err();

    assert!(matches!(err, ApiError::Api { status: 400, ref message } if message == "old_password: Wrong password"));
}

#[tokio::test]
async fn login_stores_tokens_without_sending_bearer() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/api/login/")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(
            json!({
                "access": "new-acc",
                "refresh": "new-ref",
                "user": {"id": 3, "username": "ivanov", "project": 1, "date_joined": null, "first_login": true},
                "first_login": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let api = client(&server);
    let response = api.login("ivanov", "secret").await.unwrap();

    assert!(response.first_login);
    assert_eq!(api.store().load(TokenKey::Access).as_deref(), Some("new-acc"));
    assert_eq!(api.store().load(TokenKey::Refresh).as_deref(), Some("new-ref"));
    login.assert_async().await;
}

#[tokio::test]
async fn query_logs_accepts_created_alias() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/queries/7/logs/")
        .with_status(200)
        .with_body(r#"[{"id":1,"project":1,"query":7,"log_data":"agent started","created":"2025-03-01T10:00:01Z"}]"#)
        .create_async()
        .await;

    let logs = client(&server).query_logs(7).await.unwrap();

    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].log_data, "agent started");
}

#[tokio::test]
async fn token_usage_list() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/token-usage/")
        .with_status(200)
        .with_body(
            json!({"results": [{
                "id": 1, "ai_agent_name": "planner", "project": 1, "query": 7,
                "model_name": "gpt-4o", "model_role": "planner",
                "prompt_tokens": 100, "completion_tokens": 50, "total_tokens": 150,
                "datetime": "2025-03-01T10:00:02Z"
            }]})
            .to_string(),
        )
        .create_async()
        .await;

    let usage = client(&server).token_usage().await.unwrap();

    assert_eq!(usage[0].total_tokens, 150);
}
