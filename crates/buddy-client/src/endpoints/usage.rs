use buddy_core::entities::{TokenUsage, TokenUsageStats};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

const USAGE_PATH: &str = "/token-usage/";

impl<T: Transport> ApiClient<T> {
    /// Per-call model token accounting for the user's project.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn token_usage(&self) -> Result<Vec<TokenUsage>, ApiError> {
        self.get_list(ApiRequest::get(USAGE_PATH)).await
    }

    /// Aggregated usage, optionally restricted to one query.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn token_usage_statistics(
        &self,
        query_id: Option<u64>,
    ) -> Result<TokenUsageStats, ApiError> {
        let mut request = ApiRequest::get(format!("{USAGE_PATH}statistics/"));
        if let Some(id) = query_id {
            request = request.with_query("query_id", id.to_string());
        }
        self.get_json(request).await
    }
}
