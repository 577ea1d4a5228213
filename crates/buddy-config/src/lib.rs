//! # buddy-config
//!
//! Layered configuration loading for Buddy using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`BUDDY_*` prefix, `__` as separator)
//! 2. Project-level `.buddy/config.toml`
//! 3. User-level `~/.config/buddy/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `BUDDY_API__BASE_URL` -> `api.base_url`,
//! `BUDDY_POLL__INTERVAL_SECS` -> `poll.interval_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use buddy_config::BuddyConfig;
//!
//! let config = BuddyConfig::load_with_dotenv().expect("config");
//! println!("API root: {}", config.api.api_root().expect("valid base url"));
//! ```

mod api;
mod auth;
mod error;
mod general;
mod poll;

pub use api::ApiConfig;
pub use auth::{AuthConfig, CredentialBackend};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use poll::PollConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "BUDDY_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BuddyConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl BuddyConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".buddy/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("buddy").join("config.toml"))
    }

    /// Resolved credentials file: the configured path, else `~/.buddy/credentials.json`.
    #[must_use]
    pub fn credentials_path(&self) -> Option<PathBuf> {
        if self.auth.credentials_path.trim().is_empty() {
            dirs::home_dir().map(|h| h.join(".buddy").join("credentials.json"))
        } else {
            Some(PathBuf::from(self.auth.credentials_path.trim()))
        }
    }
}
