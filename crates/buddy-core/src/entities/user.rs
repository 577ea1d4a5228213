use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Minimum length the server accepts for a new password.
pub const MIN_PASSWORD_LEN: usize = 8;

/// The authenticated account, as returned by `/users/me/` and `/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub fio_name: String,
    #[serde(default)]
    pub email: String,
    pub project: Option<u64>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub first_login: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub date_joined: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

const fn default_true() -> bool {
    true
}

/// Body of a successful `POST /login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
    #[serde(default)]
    pub first_login: bool,
}

/// Body of `POST /users/change_password/`.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    /// Mirror the server's rules so obvious mistakes never leave the machine.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if any field is empty, the new password
    /// is shorter than [`MIN_PASSWORD_LEN`], or the confirmation differs.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.old_password.is_empty() {
            return Err(CoreError::Validation("current password is required".into()));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CoreError::Validation(format!(
                "new password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }
        if self.new_password != self.confirm_password {
            return Err(CoreError::Validation("new passwords do not match".into()));
        }
        Ok(())
    }
}
