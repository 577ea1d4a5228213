use buddy_core::entities::{Project, ProjectUpdate};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

const MY_PROJECT_PATH: &str = "/projects/my_project/";

impl<T: Transport> ApiClient<T> {
    /// The project bound to the current user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails (404 when no project is bound).
    pub async fn my_project(&self) -> Result<Project, ApiError> {
        self.get_json(ApiRequest::get(MY_PROJECT_PATH)).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn update_project(&self, id: u64, update: &ProjectUpdate) -> Result<Project, ApiError> {
        self.patch_json(&format!("/projects/{id}/"), update).await
    }
}
