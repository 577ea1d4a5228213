use std::sync::atomic::{AtomicBool, Ordering};

use buddy_client::{ApiClient, ApiError};
use buddy_config::BuddyConfig;

/// Loaded configuration plus the authenticated client built from it.
pub struct AppContext {
    pub config: BuddyConfig,
    pub client: ApiClient,
}

impl AppContext {
    pub fn init(config: BuddyConfig) -> anyhow::Result<Self> {
        let store = buddy_auth::open_store(&config.auth, config.credentials_path())?;
        let client = ApiClient::from_config(&config, store)?.with_session_expired_hook(once(
            |_: &ApiError| {
                eprintln!("Signed out: the session expired and stored credentials were removed.");
            },
        ));
        tracing::debug!(base_url = %config.api.base_url, "client ready");
        Ok(Self { config, client })
    }
}

/// Concurrent requests can each fail their refresh; announce the sign-out once.
fn once(
    notify: impl Fn(&ApiError) + Send + Sync + 'static,
) -> impl Fn(&ApiError) + Send + Sync + 'static {
    let shown = AtomicBool::new(false);
    move |error: &ApiError| {
        if !shown.swap(true, Ordering::SeqCst) {
            notify(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn sign_out_notice_fires_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let hook = once(move |_: &ApiError| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let error = ApiError::SessionExpired {
            reason: "token is blacklisted".into(),
        };

        hook(&error);
        hook(&error);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
