use buddy_core::CoreError;
use buddy_core::entities::{NewLog, QueryLog};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;

const LOGS_PATH: &str = "/logs/";

impl<T: Transport> ApiClient<T> {
    /// Append an execution log line to a query.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Core`] for empty log data, otherwise the request error.
    pub async fn create_log(
        &self,
        project: u64,
        query: u64,
        log_data: &str,
    ) -> Result<QueryLog, ApiError> {
        if log_data.trim().is_empty() {
            return Err(CoreError::Validation("log data must not be empty".into()).into());
        }
        let body = NewLog {
            project,
            query,
            log_data: log_data.to_string(),
        };
        self.post_json(LOGS_PATH, &body).await
    }
}
