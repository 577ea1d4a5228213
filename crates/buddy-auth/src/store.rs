//! The credential-store seam.
//!
//! Credentials are persisted under two fixed keys, `access_token` and
//! `refresh_token`. Every backend implements [`CredentialStore`]; the request
//! client only ever talks to the trait.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use crate::error::AuthError;

/// Which half of the credential pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    Access,
    Refresh,
}

impl TokenKey {
    pub const ALL: [Self; 2] = [Self::Access, Self::Refresh];

    /// Fixed storage key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access_token",
            Self::Refresh => "refresh_token",
        }
    }

    /// Environment variable consulted by [`crate::LayeredStore`].
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Access => "BUDDY_AUTH__ACCESS_TOKEN",
            Self::Refresh => "BUDDY_AUTH__REFRESH_TOKEN",
        }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide credential storage. Last write wins.
pub trait CredentialStore: Send + Sync {
    /// Stored value for `key`; empty values read as `None`.
    fn load(&self, key: TokenKey) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`AuthError`] if the backend cannot persist the value.
    fn save(&self, key: TokenKey, value: &str) -> Result<(), AuthError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the backend cannot remove the value.
    fn remove(&self, key: TokenKey) -> Result<(), AuthError>;

    /// Short label for status output (`keyring`, `file`, `memory`, ...).
    fn source(&self) -> &'static str;

    /// Which backend currently supplies `key`, or `None` if nothing is stored.
    /// Layered stores name the tier the value comes from.
    fn source_of(&self, key: TokenKey) -> Option<&'static str> {
        self.load(key).map(|_| self.source())
    }

    /// Remove both halves of the pair. Both removals are attempted even if
    /// the first fails; the first error is returned.
    ///
    /// # Errors
    ///
    /// Returns the first [`AuthError`] raised by [`Self::remove`].
    fn clear(&self) -> Result<(), AuthError> {
        TokenKey::ALL
            .into_iter()
            .map(|key| self.remove(key))
            .fold(Ok(()), Result::and)
    }

    /// Store a freshly issued pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if either value cannot be saved.
    fn save_pair(&self, access: &str, refresh: &str) -> Result<(), AuthError> {
        self.save(TokenKey::Access, access)?;
        self.save(TokenKey::Refresh, refresh)
    }
}

/// In-process store. Used for tests and one-shot sessions that must not
/// touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<TokenKey, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pair(access: &str, refresh: &str) -> Self {
        let store = Self::new();
        store.insert(TokenKey::Access, access);
        store.insert(TokenKey::Refresh, refresh);
        store
    }

    fn insert(&self, key: TokenKey, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key, value.to_string());
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self, key: TokenKey) -> Option<String> {
        self.values
            .lock()
            .ok()?
            .get(&key)
            .filter(|v| !v.is_empty())
            .cloned()
    }

    fn save(&self, key: TokenKey, value: &str) -> Result<(), AuthError> {
        self.values
            .lock()
            .map_err(|e| AuthError::TokenStoreError(format!("memory store poisoned: {e}")))?
            .insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: TokenKey) -> Result<(), AuthError> {
        self.values
            .lock()
            .map_err(|e| AuthError::TokenStoreError(format!("memory store poisoned: {e}")))?
            .remove(&key);
        Ok(())
    }

    fn source(&self) -> &'static str {
        "memory"
    }
}
