use std::sync::Arc;
use std::time::Duration;

use buddy_auth::CredentialStore;
use buddy_config::BuddyConfig;
use buddy_core::ListEnvelope;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::interceptor::{AuthInterceptor, SessionExpiredHook};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Typed client for the Buddy REST API.
///
/// Every call except login and token refresh goes through the
/// [`AuthInterceptor`], which attaches the stored bearer and handles the
/// single refresh-and-retry on 401.
#[derive(Debug)]
pub struct ApiClient<T = HttpTransport> {
    inner: AuthInterceptor<T>,
}

impl ApiClient<HttpTransport> {
    /// Build a `reqwest`-backed client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] for an invalid `api.base_url`, or
    /// [`ApiError::Http`] if the HTTP client cannot be built.
    pub fn from_config(
        config: &BuddyConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(
            config.api.api_root()?,
            Duration::from_secs(config.api.timeout_secs),
            &config.api.user_agent,
        )?;
        Ok(Self::new(transport, store))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            inner: AuthInterceptor::new(transport, store),
        }
    }

    /// Register a callback run once credentials were cleared after a failed refresh.
    #[must_use]
    pub fn with_session_expired_hook(
        mut self,
        hook: impl Fn(&ApiError) + Send + Sync + 'static,
    ) -> Self {
        let hook: SessionExpiredHook = Arc::new(hook);
        self.inner.set_session_expired_hook(hook);
        self
    }

    pub fn store(&self) -> &dyn CredentialStore {
        self.inner.store()
    }

    pub const fn transport(&self) -> &T {
        self.inner.transport()
    }

    /// Authenticated request; non-2xx responses become errors.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, refresh failure, or a
    /// non-success status.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.inner.execute(request).await?.error_for_status()
    }

    /// Unauthenticated request outside the retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn send_unauthenticated(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.inner.execute_anonymous(request).await?.error_for_status()
    }

    pub(crate) async fn get_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        self.send(&request).await?.json()
    }

    /// GET a list endpoint, accepting both the bare and the paginated shape.
    pub(crate) async fn get_list<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Vec<R>, ApiError> {
        let envelope: ListEnvelope<R> = self.get_json(request).await?;
        if let Some(next) = envelope.next_page() {
            tracing::debug!(path = %next, "list response has further pages; returning first page");
        }
        Ok(envelope.into_items())
    }

    pub(crate) async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.get_json(ApiRequest::post(path, to_value(body)?)).await
    }

    pub(crate) async fn patch_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.get_json(ApiRequest::patch(path, to_value(body)?)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(&ApiRequest::delete(path)).await.map(|_| ())
    }
}

pub(crate) fn to_value<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Parse(e.to_string()))
}
