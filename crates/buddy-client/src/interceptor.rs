//! Bearer attachment and the single refresh-and-retry cycle.
//!
//! Every logical request runs its own [`RequestState`] machine on the stack
//! of the calling future:
//!
//! ```text
//! Idle → Pending ─┬─ response (not 401, or 401 on a replay) ──→ Success
//!                 ├─ 401, refresh token stored ────────────────→ RetryPending
//!                 ├─ 401, no refresh token ────────────────────→ Success (401 propagates)
//!                 └─ transport error ──────────────────────────→ Failed
//! RetryPending ───┬─ refresh ok  → Pending (replay, new bearer)
//!                 └─ refresh err → credentials cleared, hook fired → Failed
//! ```
//!
//! The replay flag lives in the state itself, so there is no shared retry
//! counter and concurrent requests each get at most one retry.

use std::fmt;
use std::sync::Arc;

use buddy_auth::{CredentialStore, TokenKey};
use serde::Deserialize;

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

pub const REFRESH_PATH: &str = "/token/refresh/";

/// Called after a failed refresh has cleared the stored credentials.
pub type SessionExpiredHook = Arc<dyn Fn(&ApiError) + Send + Sync>;

#[derive(Debug)]
enum RequestState {
    Idle,
    Pending { bearer: Option<String>, replay: bool },
    RetryPending { refresh: String },
    /// A response arrived; its status is for the caller to judge.
    Success(ApiResponse),
    Failed(ApiError),
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

/// Wraps a [`Transport`] with credential attachment and the 401 policy.
pub struct AuthInterceptor<T> {
    transport: T,
    store: Arc<dyn CredentialStore>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl<T> fmt::Debug for AuthInterceptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthInterceptor")
            .field("store", &self.store.source())
            .field("on_session_expired", &self.on_session_expired.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> AuthInterceptor<T> {
    pub fn new(transport: T, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            transport,
            store,
            on_session_expired: None,
        }
    }

    pub fn set_session_expired_hook(&mut self, hook: SessionExpiredHook) {
        self.on_session_expired = Some(hook);
    }

    pub fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` with the stored bearer, refreshing and replaying once on 401.
    ///
    /// Any received response is returned as-is (including a final 401);
    /// only transport failures and refresh failures become errors.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or [`ApiError::SessionExpired`] when the
    /// refresh call fails (after clearing both stored credentials).
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut state = RequestState::Idle;
        loop {
            state = match state {
                RequestState::Idle => RequestState::Pending {
                    bearer: self.store.load(TokenKey::Access),
                    replay: false,
                },
                RequestState::Pending { bearer, replay } => {
                    self.attempt(request, bearer.as_deref(), replay).await
                }
                RequestState::RetryPending { refresh } => match self.refresh(&refresh).await {
                    Ok(access) => RequestState::Pending {
                        bearer: Some(access),
                        replay: true,
                    },
                    Err(error) => RequestState::Failed(self.expire_session(error)),
                },
                RequestState::Success(response) => return Ok(response),
                RequestState::Failed(error) => return Err(error),
            };
        }
    }

    /// Send without a bearer and without the retry policy.
    ///
    /// # Errors
    ///
    /// Returns the transport error.
    pub async fn execute_anonymous(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, "sending anonymous request");
        self.transport.send(request, None).await
    }

    async fn attempt(&self, request: &ApiRequest, bearer: Option<&str>, replay: bool) -> RequestState {
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            authenticated = bearer.is_some(),
            replay,
            "sending request"
        );
        let response = match self.transport.send(request, bearer).await {
            Ok(response) => response,
            Err(error) => return RequestState::Failed(error),
        };

        if !response.is_unauthorized() || replay {
            return RequestState::Success(response);
        }

        match self.store.load(TokenKey::Refresh) {
            Some(refresh) => RequestState::RetryPending { refresh },
            None => {
                tracing::debug!(path = %request.path, "401 without refresh token; not retrying");
                RequestState::Success(response)
            }
        }
    }

    async fn refresh(&self, refresh: &str) -> Result<String, ApiError> {
        let request = ApiRequest::post(REFRESH_PATH, serde_json::json!({ "refresh": refresh }));
        tracing::debug!("refreshing access token");

        let response = self
            .transport
            .send(&request, None)
            .await
            .map_err(|e| ApiError::SessionExpired {
                reason: format!("refresh request failed: {e}"),
            })?;
        if !response.is_success() {
            return Err(ApiError::SessionExpired {
                reason: response.error_message(),
            });
        }

        let tokens: RefreshResponse = response.json().map_err(|e| ApiError::SessionExpired {
            reason: format!("unexpected refresh response: {e}"),
        })?;
        self.store.save(TokenKey::Access, &tokens.access)?;
        if let Some(rotated) = tokens.refresh.as_deref().filter(|r| !r.is_empty()) {
            self.store.save(TokenKey::Refresh, rotated)?;
        }
        Ok(tokens.access)
    }

    fn expire_session(&self, error: ApiError) -> ApiError {
        let error = match error {
            expired @ ApiError::SessionExpired { .. } => expired,
            other => ApiError::SessionExpired {
                reason: other.to_string(),
            },
        };
        tracing::warn!(%error, "token refresh failed; clearing stored credentials");
        if let Err(clear_error) = self.store.clear() {
            tracing::warn!(%clear_error, "failed to clear stored credentials");
        }
        if let Some(hook) = &self.on_session_expired {
            hook(&error);
        }
        error
    }
}
