use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::QueryStatus;
use crate::errors::CoreError;

/// A user-submitted task description tracked through asynchronous processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub id: u64,
    pub project: u64,
    #[serde(default)]
    pub project_name: Option<String>,
    pub user: u64,
    #[serde(default)]
    pub user_name: Option<String>,
    pub query_text: String,
    #[serde(default)]
    pub answer_text: String,
    pub status: QueryStatus,
    pub query_created: DateTime<Utc>,
    #[serde(default)]
    pub query_started: Option<DateTime<Utc>>,
    #[serde(default)]
    pub query_finished: Option<DateTime<Utc>>,
    #[serde(default)]
    pub logs_count: Option<u64>,
}

impl Query {
    /// Reject deletion of queries that are still queued or running.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotDeletable`] for non-terminal statuses.
    pub const fn ensure_deletable(&self) -> Result<(), CoreError> {
        if self.status.is_deletable() {
            Ok(())
        } else {
            Err(CoreError::NotDeletable {
                id: self.id,
                status: self.status,
            })
        }
    }
}

/// One append-only execution log line for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLog {
    pub id: u64,
    pub project: u64,
    pub query: u64,
    pub log_data: String,
    #[serde(alias = "created")]
    pub create_dtime: DateTime<Utc>,
}

/// Body of `POST /queries/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewQuery {
    pub project: u64,
    pub query_text: String,
}

impl NewQuery {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the text is blank.
    pub fn new(project: u64, query_text: impl Into<String>) -> Result<Self, CoreError> {
        let query_text = query_text.into();
        if query_text.trim().is_empty() {
            return Err(CoreError::Validation("query text must not be empty".into()));
        }
        Ok(Self {
            project,
            query_text,
        })
    }
}

/// Partial update for `PATCH /queries/{id}/`. Unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QueryStatus>,
}

impl QueryPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.query_text.is_none() && self.answer_text.is_none() && self.status.is_none()
    }
}

/// Body of `POST /logs/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewLog {
    pub project: u64,
    pub query: u64,
    pub log_data: String,
}
