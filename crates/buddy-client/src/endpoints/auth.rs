use buddy_auth::{CredentialStore, TokenKey};
use buddy_core::entities::{LoginResponse, PasswordChange, User};
use serde::Serialize;

use crate::client::{ApiClient, to_value};
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

pub const LOGIN_PATH: &str = "/login/";
const ME_PATH: &str = "/users/me/";
const CHANGE_PASSWORD_PATH: &str = "/users/change_password/";

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// Outcome of [`ApiClient::restore_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Active(User),
    LoggedOut,
}

impl<T: Transport> ApiClient<T> {
    /// Exchange username and password for a token pair and store both tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for rejected credentials, or an
    /// [`ApiError::Auth`] if the tokens cannot be stored.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = to_value(&Credentials { username, password })?;
        let response: LoginResponse = self
            .send_unauthenticated(&ApiRequest::post(LOGIN_PATH, body))
            .await?
            .json()?;
        self.store().save_pair(&response.access, &response.refresh)?;
        tracing::info!(user = %response.user.username, "logged in");
        Ok(response)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the session has expired.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.get_json(ApiRequest::get(ME_PATH)).await
    }

    /// Change the current user's password.
    ///
    /// Validation runs locally first; nothing is sent for an invalid change.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Core`] for a locally invalid change, otherwise the
    /// server's rejection.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        change.validate()?;
        self.send(&ApiRequest::post(CHANGE_PASSWORD_PATH, to_value(change)?))
            .await
            .map(|_| ())
    }

    /// Forget both stored tokens. No request is made.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] if the credential backend fails.
    pub fn logout(&self) -> Result<(), ApiError> {
        buddy_auth::logout(self.store())?;
        Ok(())
    }

    /// Validate the stored session by fetching the current user.
    ///
    /// Any failure clears both tokens and yields [`Session::LoggedOut`].
    pub async fn restore_session(&self) -> Session {
        if self.store().load(TokenKey::Access).is_none() {
            return Session::LoggedOut;
        }
        match self.me().await {
            Ok(user) => Session::Active(user),
            Err(error) => {
                tracing::debug!(%error, "stored session is not usable");
                if let Err(clear_error) = self.store().clear() {
                    tracing::warn!(%clear_error, "failed to clear stored credentials");
                }
                Session::LoggedOut
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use buddy_auth::MemoryStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::FnTransport;
    use crate::transport::ApiResponse;

    const USER: &str = r#"{"id":3,"username":"ivanov","fio_name":"Ivanov I.","email":"i@example.com","project":1,"project_name":"Billing","first_login":false,"date_joined":"2025-01-10T09:00:00Z"}"#;

    fn client(
        store: Arc<MemoryStore>,
        handler: impl Fn(&ApiRequest, Option<&str>) -> ApiResponse + Send + Sync + 'static,
    ) -> ApiClient<FnTransport> {
        ApiClient::new(FnTransport::new(handler), store)
    }

    #[tokio::test]
    async fn login_stores_both_tokens() {
        let store = Arc::new(MemoryStore::new());
        let api = client(store.clone(), |_, _| {
            ApiResponse::new(200, format!(r#"{{"access":"a1","refresh":"r1","user":{USER},"first_login":false}}"#))
        });

        let response = api.login("ivanov", "secret").await.unwrap();

        assert_eq!(response.user.username, "ivanov");
        assert_eq!(store.load(TokenKey::Access).as_deref(), Some("a1"));
        assert_eq!(store.load(TokenKey::Refresh).as_deref(), Some("r1"));
        let calls = api.transport().calls();
        assert_eq!(calls[0].path, LOGIN_PATH);
        assert_eq!(calls[0].bearer, None);
        assert_eq!(
            calls[0].body,
            Some(serde_json::json!({"username": "ivanov", "password": "secret"}))
        );
    }

    #[tokio::test]
    async fn rejected_login_does_not_refresh() {
        let store = Arc::new(MemoryStore::with_pair("old", "old-refresh"));
        let api = client(store.clone(), |_, _| {
            ApiResponse::new(401, r#"{"error":"Invalid credentials"}"#)
        });

        let err = api.login("ivanov", "wrong").await.unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized { ref message } if message == "Invalid credentials"));
        assert_eq!(api.transport().calls().len(), 1);
        assert_eq!(store.load(TokenKey::Refresh).as_deref(), Some("old-refresh"));
    }

    #[tokio::test]
    async fn invalid_password_change_sends_nothing() {
        let api = client(Arc::new(MemoryStore::with_pair("a", "r")), |_, _| {
            ApiResponse::new(200, "{}")
        });
        let change = PasswordChange {
            old_password: "old-pass".into(),
            new_password: "short".into(),
            confirm_password: "short".into(),
        };

        let err = api.change_password(&change).await.unwrap_err();

        assert!(matches!(err, ApiError::Core(_)));
        assert!(api.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn restore_session_without_token_is_logged_out() {
        let api = client(Arc::new(MemoryStore::new()), |_, _| ApiResponse::new(200, USER));
        assert_eq!(api.restore_session().await, Session::LoggedOut);
        assert!(api.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn restore_session_returns_user() {
        let api = client(Arc::new(MemoryStore::with_pair("a", "r")), |_, _| {
            ApiResponse::new(200, USER)
        });
        assert!(matches!(api.restore_session().await, Session::Active(user) if user.id == 3));
    }

    #[tokio::test]
    async fn restore_session_failure_clears_tokens() {
        let store = Arc::new(MemoryStore::with_pair("a", "r"));
        let api = client(store.clone(), |_, _| ApiResponse::new(500, ""));

        assert_eq!(api.restore_session().await, Session::LoggedOut);
        assert!(store.load(TokenKey::Access).is_none());
        assert!(store.load(TokenKey::Refresh).is_none());
    }

    #[test]
    fn logout_clears_tokens() {
        let store = Arc::new(MemoryStore::with_pair("a", "r"));
        let api = client(store.clone(), |_, _| ApiResponse::new(200, ""));
        api.logout().unwrap();
        assert!(store.load(TokenKey::Access).is_none());
    }
}
