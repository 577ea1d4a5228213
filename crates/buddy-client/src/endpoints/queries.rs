use buddy_core::QueryStatus;
use buddy_core::entities::{NewQuery, Query, QueryLog, QueryPatch};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

const QUERIES_PATH: &str = "/queries/";

fn query_path(id: u64) -> String {
    format!("{QUERIES_PATH}{id}/")
}

impl<T: Transport> ApiClient<T> {
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_queries(&self) -> Result<Vec<Query>, ApiError> {
        self.get_list(ApiRequest::get(QUERIES_PATH)).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get_query(&self, id: u64) -> Result<Query, ApiError> {
        self.get_json(ApiRequest::get(query_path(id))).await
    }

    /// Submit a new query for processing. Blank text is rejected locally.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Core`] for blank text, otherwise the request error.
    pub async fn create_query(&self, project: u64, text: &str) -> Result<Query, ApiError> {
        let body = NewQuery::new(project, text)?;
        self.post_json(QUERIES_PATH, &body).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Core`] for an empty patch, otherwise the request error.
    pub async fn update_query(&self, id: u64, patch: &QueryPatch) -> Result<Query, ApiError> {
        if patch.is_empty() {
            return Err(buddy_core::CoreError::Validation("nothing to update".into()).into());
        }
        self.patch_json(&query_path(id), patch).await
    }

    /// Delete a finished query. Queued and running queries are refused locally.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Core`] for a non-terminal query, otherwise the
    /// server's rejection.
    pub async fn delete_query(&self, query: &Query) -> Result<(), ApiError> {
        query.ensure_deletable()?;
        self.delete(&query_path(query.id)).await?;
        tracing::info!(id = query.id, "deleted query");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn query_logs(&self, id: u64) -> Result<Vec<QueryLog>, ApiError> {
        self.get_list(ApiRequest::get(format!("{}logs/", query_path(id))))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn queries_by_status(&self, status: QueryStatus) -> Result<Vec<Query>, ApiError> {
        self.get_list(
            ApiRequest::get(format!("{QUERIES_PATH}by_status/")).with_query("status", status.as_str()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use buddy_auth::MemoryStore;
    use buddy_core::CoreError;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::FnTransport;
    use crate::transport::ApiResponse;

    fn query_json(id: u64, status: &str) -> String {
        format!(
            r#"{{"id":{id},"project":1,"user":3,"query_text":"q","answer_text":"","status":"{status}","query_created":"2025-03-01T10:00:00Z"}}"#
        )
    }

    fn ok_client() -> ApiClient<FnTransport> {
        ApiClient::new(
            FnTransport::new(|req, _| {
                if req.method == reqwest::Method::DELETE {
                    ApiResponse::new(204, "")
                } else {
                    ApiResponse::new(200, format!("[{}]", query_json(1, "queued")))
                }
            }),
            Arc::new(MemoryStore::with_pair("a", "r")),
        )
    }

    #[tokio::test]
    async fn by_status_sends_status_parameter() {
        let api = ok_client();
        let queries = api.queries_by_status(QueryStatus::InProgress).await.unwrap();

        assert_eq!(queries.len(), 1);
        let calls = api.transport().calls();
        assert_eq!(calls[0].path, "/queries/by_status/");
        assert_eq!(
            calls[0].query,
            vec![("status".to_string(), "in_progress".to_string())]
        );
    }

    #[tokio::test]
    async fn running_query_is_not_deleted() {
        let api = ok_client();
        for status in ["queued", "in_progress"] {
            let query: Query = serde_json::from_str(&query_json(7, status)).unwrap();
            let err = api.delete_query(&query).await.unwrap_err();
            assert!(matches!(err, ApiError::Core(CoreError::NotDeletable { id: 7, .. })));
        }
        assert!(api.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn finished_query_is_deleted() {
        let api = ok_client();
        for status in ["done", "failed"] {
            let query: Query = serde_json::from_str(&query_json(7, status)).unwrap();
            api.delete_query(&query).await.unwrap();
        }
        let calls = api.transport().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].path, "/queries/7/");
    }

    #[tokio::test]
    async fn blank_query_text_is_rejected_locally() {
        let api = ok_client();
        let err = api.create_query(1, "   ").await.unwrap_err();
        assert!(matches!(err, ApiError::Core(CoreError::Validation(_))));
        assert!(api.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn empty_patch_is_rejected_locally() {
        let api = ok_client();
        let err = api.update_query(1, &QueryPatch::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Core(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn patch_sends_only_set_fields() {
        let api = ApiClient::new(
            FnTransport::new(|_, _| ApiResponse::new(200, query_json(5, "done"))),
            Arc::new(MemoryStore::with_pair("a", "r")),
        );
        let patch = QueryPatch {
            status: Some(QueryStatus::Done),
            ..QueryPatch::default()
        };

        let query = api.update_query(5, &patch).await.unwrap();

        assert_eq!(query.status, QueryStatus::Done);
        assert_eq!(
            api.transport().calls()[0].body,
            Some(serde_json::json!({"status": "done"}))
        );
    }

    #[tokio::test]
    async fn logs_path_is_nested_under_query() {
        let api = ApiClient::new(
            FnTransport::new(|_, _| {
                ApiResponse::new(
                    200,
                    r#"{"results":[{"id":1,"project":1,"query":5,"log_data":"started","create_dtime":"2025-03-01T10:00:01Z"}]}"#,
                )
            }),
            Arc::new(MemoryStore::with_pair("a", "r")),
        );

        let logs = api.query_logs(5).await.unwrap();

        assert_eq!(logs[0].log_data, "started");
        assert_eq!(api.transport().calls()[0].path, "/queries/5/logs/");
    }
}
