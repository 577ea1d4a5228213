//! Client error types and server error-payload decoding.

use buddy_auth::AuthError;
use buddy_config::ConfigError;
use buddy_core::CoreError;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message derived from the error payload.
        message: String,
    },

    /// The server rejected the credentials and no refresh was possible.
    #[error("not authenticated: {message}; run `buddy auth login`")]
    Unauthorized { message: String },

    /// Refreshing the access token failed; both stored credentials were cleared.
    #[error("session expired ({reason}); run `buddy auth login`")]
    SessionExpired { reason: String },

    /// A success response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// HTTP status attached to this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::Http(error) => error.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the user has to log in again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::SessionExpired { .. } | Self::Auth(AuthError::NotAuthenticated)
        )
    }
}

/// Derive a user-visible message from a server error body.
///
/// Lookup order: `detail`, `error`, `message`, then the first field error
/// (`non_field_errors` unprefixed, other fields as `field: msg`). Anything
/// else falls back to a generic message naming the status.
#[must_use]
pub fn error_message(body: &str, status: u16) -> String {
    extract_message(body).unwrap_or_else(|| format!("request failed with status {status}"))
}

fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let map = value.as_object()?;

    for key in ["detail", "error", "message"] {
        if let Some(text) = map.get(key).and_then(first_text) {
            return Some(text);
        }
    }

    if let Some(text) = map.get("non_field_errors").and_then(first_text) {
        return Some(text);
    }

    map.iter()
        .find_map(|(field, value)| first_text(value).map(|text| format!("{field}: {text}")))
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}
