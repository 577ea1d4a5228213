use buddy_auth::{CredentialStore, TokenInfo, TokenKey};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Access tokens expiring within this window are reported as `expiring`.
const EXPIRY_BUFFER_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    access_token: &'static str,
    refresh_token: bool,
    user_id: Option<u64>,
    expires_at: Option<String>,
    token_source: &'static str,
    note: Option<String>,
}

/// Report what is stored locally. Makes no request: an expired access token
/// with a refresh token present still counts as authenticated.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.client.store();
    let status = describe(
        buddy_auth::stored_access_info(store),
        store.load(TokenKey::Refresh).is_some(),
        super::login::token_source(store),
    );
    output(&status, flags.format)
}

fn describe(
    access: Option<Result<TokenInfo, buddy_auth::AuthError>>,
    has_refresh: bool,
    token_source: &'static str,
) -> AuthStatusResponse {
    let mut status = AuthStatusResponse {
        authenticated: false,
        access_token: "missing",
        refresh_token: has_refresh,
        user_id: None,
        expires_at: None,
        token_source,
        note: None,
    };

    match access {
        None if has_refresh => {
            status.authenticated = true;
            status.note = Some("no access token; it will be refreshed on the next request".into());
        }
        None => status.note = Some("not logged in; run `buddy auth login`".into()),
        Some(Err(error)) => {
            status.access_token = "invalid";
            status.authenticated = has_refresh;
            status.note = Some(error.to_string());
        }
        Some(Ok(info)) => {
            status.user_id = info.user_id;
            status.expires_at = Some(info.expires_at.to_rfc3339());
            status.access_token = if info.is_near_expiry(0) {
                "expired"
            } else if info.is_near_expiry(EXPIRY_BUFFER_SECS) {
                "expiring"
            } else {
                "valid"
            };
            status.authenticated = status.access_token != "expired" || has_refresh;
        }
    }
    status
}

#[cfg(test)]
mod tests {
    use buddy_auth::TokenInfo;
    use chrono::{Duration, Utc};

    use super::describe;

    fn info(offset: Duration) -> TokenInfo {
        TokenInfo {
            expires_at: Utc::now() + offset,
            user_id: Some(3),
            token_type: Some("access".into()),
        }
    }

    #[test]
    fn nothing_stored_is_logged_out() {
        let status = describe(None, false, "memory");
        assert!(!status.authenticated);
        assert_eq!(status.access_token, "missing");
    }

    #[test]
    fn valid_access_token() {
        let status = describe(Some(Ok(info(Duration::hours(1)))), true, "keyring");
        assert!(status.authenticated);
        assert_eq!(status.access_token, "valid");
        assert_eq!(status.user_id, Some(3));
    }

    #[test]
    fn expired_access_with_refresh_is_still_authenticated() {
        let status = describe(Some(Ok(info(Duration::minutes(-5)))), true, "file");
        assert!(status.authenticated);
        assert_eq!(status.access_token, "expired");
    }

    #[test]
    fn expired_access_without_refresh_is_logged_out() {
        let status = describe(Some(Ok(info(Duration::minutes(-5)))), false, "file");
        assert!(!status.authenticated);
    }

    #[test]
    fn soon_expiring_token_is_flagged() {
        let status = describe(Some(Ok(info(Duration::seconds(30)))), true, "file");
        assert_eq!(status.access_token, "expiring");
    }
}
