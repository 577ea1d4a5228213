//! Credential storage configuration.

use serde::{Deserialize, Serialize};

/// Where the access/refresh pair is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialBackend {
    /// OS keychain, falling back to the credentials file when unavailable.
    #[default]
    Auto,
    Keyring,
    File,
}

fn default_keyring_service() -> String {
    "buddy-cli".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub backend: CredentialBackend,

    /// Keychain service name. Tests override this to stay off real credentials.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Credentials file. Empty means `~/.buddy/credentials.json`.
    #[serde(default)]
    pub credentials_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            backend: CredentialBackend::default(),
            keyring_service: default_keyring_service(),
            credentials_path: String::new(),
        }
    }
}
