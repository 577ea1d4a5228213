use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::error::AuthError;

/// Claims read from a stored JWT without signature verification.
///
/// Only used for status display; the server remains the authority on
/// whether a token is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub expires_at: DateTime<Utc>,
    /// `user_id` claim, when present.
    pub user_id: Option<u64>,
    /// `token_type` claim (`access` or `refresh`), when present.
    pub token_type: Option<String>,
}

impl TokenInfo {
    /// Check if the token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + chrono::TimeDelta::seconds(buffer_secs);
        self.expires_at <= threshold
    }
}

/// Decode the payload of a JWT.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if the JWT format is invalid or the `exp`
/// claim is missing or cannot be parsed.
pub fn inspect(jwt: &str) -> Result<TokenInfo, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::InvalidToken("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::InvalidToken(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::InvalidToken(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::InvalidToken("missing exp claim".into()))?;
    let expires_at = DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::InvalidToken("invalid exp timestamp".into()))?;

    let user_id = value["user_id"]
        .as_u64()
        .or_else(|| value["user_id"].as_str().and_then(|s| s.parse().ok()));

    Ok(TokenInfo {
        expires_at,
        user_id,
        token_type: value["token_type"].as_str().map(str::to_string),
    })
}
