//! # buddy-auth
//!
//! Credential storage for the Buddy client.
//!
//! The access/refresh pair lives under the fixed keys `access_token` and
//! `refresh_token` in one of several backends (OS keychain with file
//! fallback, plain file, or memory). Stored JWTs can be inspected for expiry
//! without contacting the server.

pub mod error;
pub mod expiry;
pub mod store;
pub mod token_store;

use std::path::PathBuf;
use std::sync::Arc;

use buddy_config::{AuthConfig, CredentialBackend};

pub use error::AuthError;
pub use expiry::TokenInfo;
pub use store::{CredentialStore, MemoryStore, TokenKey};
pub use token_store::{FileStore, KeyringStore, LayeredStore};

/// Build the credential store selected by configuration.
///
/// `credentials_path` overrides the file location; `None` uses
/// `~/.buddy/credentials.json`.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if a file-backed store is requested and
/// no credentials path can be resolved.
pub fn open_store(
    config: &AuthConfig,
    credentials_path: Option<PathBuf>,
) -> Result<Arc<dyn CredentialStore>, AuthError> {
    let file_path = || credentials_path.clone().map_or_else(FileStore::default_path, Ok);

    let store: Arc<dyn CredentialStore> = match config.backend {
        CredentialBackend::Keyring => Arc::new(KeyringStore::new(&config.keyring_service)),
        CredentialBackend::File => Arc::new(FileStore::new(file_path()?)),
        CredentialBackend::Auto => Arc::new(LayeredStore::new(
            KeyringStore::new(&config.keyring_service),
            FileStore::new(file_path()?),
        )),
    };
    tracing::debug!(backend = ?config.backend, "opened credential store");
    Ok(store)
}

/// Clear both stored credentials.
///
/// # Errors
///
/// Returns `AuthError` if the backend fails to remove a value.
pub fn logout(store: &dyn CredentialStore) -> Result<(), AuthError> {
    store.clear()
}

/// Decode the stored access token, if any.
#[must_use]
pub fn stored_access_info(store: &dyn CredentialStore) -> Option<Result<TokenInfo, AuthError>> {
    store.load(TokenKey::Access).map(|jwt| expiry::inspect(&jwt))
}
