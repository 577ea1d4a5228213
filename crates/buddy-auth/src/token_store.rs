//! Persistent credential backends: OS keychain, JSON file, and the layered
//! keychain-then-file store used by default.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::AuthError;
use crate::store::{CredentialStore, TokenKey};

pub const DEFAULT_KEYRING_SERVICE: &str = "buddy-cli";

/// Credentials in the OS keychain, one entry per [`TokenKey`].
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: TokenKey) -> Result<keyring::Entry, AuthError> {
        keyring::Entry::new(&self.service, key.as_str())
            .map_err(|e| AuthError::KeyringError(e.to_string()))
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(DEFAULT_KEYRING_SERVICE)
    }
}

impl CredentialStore for KeyringStore {
    fn load(&self, key: TokenKey) -> Option<String> {
        self.entry(key)
            .ok()?
            .get_password()
            .ok()
            .filter(|token| !token.is_empty())
    }

    fn save(&self, key: TokenKey, value: &str) -> Result<(), AuthError> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| AuthError::KeyringError(e.to_string()))
    }

    fn remove(&self, key: TokenKey) -> Result<(), AuthError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AuthError::KeyringError(e.to_string())),
        }
    }

    fn source(&self) -> &'static str {
        "keyring"
    }
}

/// Credentials in a `0600` JSON file: `{"access_token": ..., "refresh_token": ...}`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `~/.buddy/credentials.json`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the home directory is unknown.
    pub fn default_path() -> Result<PathBuf, AuthError> {
        dirs::home_dir()
            .map(|h| h.join(".buddy").join("credentials.json"))
            .ok_or_else(|| {
                AuthError::TokenStoreError(
                    "home directory not found; cannot store credentials".into(),
                )
            })
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        if content.trim().is_empty() {
            return BTreeMap::new();
        }
        serde_json::from_str(&content).unwrap_or_else(|error| {
            tracing::warn!(%error, path = %self.path.display(), "ignoring unreadable credentials file");
            BTreeMap::new()
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), AuthError> {
        if map.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|e| {
                    AuthError::TokenStoreError(format!(
                        "failed to delete {}: {e}",
                        self.path.display()
                    ))
                })?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let body = serde_json::to_string_pretty(map)
            .map_err(|e| AuthError::TokenStoreError(format!("encode credentials: {e}")))?;
        fs::write(&self.path, body).map_err(|e| {
            AuthError::TokenStoreError(format!("write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, AuthError> {
        self.lock
            .lock()
            .map_err(|e| AuthError::TokenStoreError(format!("credentials lock poisoned: {e}")))
    }
}

impl CredentialStore for FileStore {
    fn load(&self, key: TokenKey) -> Option<String> {
        let _guard = self.guard().ok()?;
        self.read_map()
            .remove(key.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    fn save(&self, key: TokenKey, value: &str) -> Result<(), AuthError> {
        let _guard = self.guard()?;
        let mut map = self.read_map();
        map.insert(key.as_str().to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: TokenKey) -> Result<(), AuthError> {
        let _guard = self.guard()?;
        let mut map = self.read_map();
        if map.remove(key.as_str()).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }

    fn source(&self) -> &'static str {
        "file"
    }
}

/// Default backend. Load order: keyring → `BUDDY_AUTH__*` env → file.
///
/// Writes go to the keyring and fall back to the file when the keyring
/// errors or does not hand the value back. A keyring without a platform
/// backend (`keyring`'s mock store on Linux) accepts writes it never keeps,
/// so every keyring write is read back before the file copy is pruned.
#[derive(Debug)]
pub struct LayeredStore<K = KeyringStore> {
    keyring: K,
    file: FileStore,
}

impl<K: CredentialStore> LayeredStore<K> {
    #[must_use]
    pub const fn new(keyring: K, file: FileStore) -> Self {
        Self { keyring, file }
    }
}

fn env_token(key: TokenKey) -> Option<String> {
    std::env::var(key.env_var())
        .ok()
        .filter(|t| !t.is_empty())
}

impl<K: CredentialStore> CredentialStore for LayeredStore<K> {
    fn load(&self, key: TokenKey) -> Option<String> {
        self.keyring
            .load(key)
            .or_else(|| env_token(key))
            .or_else(|| self.file.load(key))
    }

    fn save(&self, key: TokenKey, value: &str) -> Result<(), AuthError> {
        match self.keyring.save(key, value) {
            Ok(()) if self.keyring.load(key).as_deref() == Some(value) => {
                // Drop any stale file copy so it can never shadow the keyring value.
                if let Err(error) = self.file.remove(key) {
                    tracing::debug!(%error, "could not prune credentials file");
                }
                Ok(())
            }
            Ok(()) => {
                tracing::debug!(%key, "keyring did not retain credential; writing file");
                if let Err(error) = self.keyring.remove(key) {
                    tracing::debug!(%error, "could not drop unverified keyring entry");
                }
                self.file.save(key, value)
            }
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                self.file.save(key, value)
            }
        }
    }

    fn remove(&self, key: TokenKey) -> Result<(), AuthError> {
        let keyring = self.keyring.remove(key);
        let file = self.file.remove(key);
        keyring.and(file)
    }

    fn source(&self) -> &'static str {
        "layered"
    }

    fn source_of(&self, key: TokenKey) -> Option<&'static str> {
        if self.keyring.load(key).is_some() {
            return Some(self.keyring.source());
        }
        if env_token(key).is_some() {
            return Some("env");
        }
        self.file.load(key).map(|_| self.file.source())
    }
}
