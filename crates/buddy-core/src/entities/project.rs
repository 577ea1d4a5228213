use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-project integration settings.
///
/// Tracker tokens are write-only on the server; reads only expose the
/// `*_token_masked` forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub project_name: String,
    #[serde(default)]
    pub test_it_project_id: String,
    #[serde(default)]
    pub jira_project_id: String,
    #[serde(default)]
    pub project_context: String,
    #[serde(default)]
    pub test_it_token_masked: String,
    #[serde(default)]
    pub jira_token_masked: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `PATCH /projects/{id}/`.
///
/// IDs and context are always sent. Tokens are sent only when a non-blank
/// replacement was supplied, so saving the form never wipes a stored token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectUpdate {
    pub test_it_project_id: String,
    pub jira_project_id: String,
    pub project_context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_it_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_token: Option<String>,
}

impl ProjectUpdate {
    /// Start from the current settings so unchanged fields round-trip.
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        Self {
            test_it_project_id: project.test_it_project_id.clone(),
            jira_project_id: project.jira_project_id.clone(),
            project_context: project.project_context.clone(),
            test_it_token: None,
            jira_token: None,
        }
    }

    #[must_use]
    pub fn with_test_it_token(mut self, token: Option<String>) -> Self {
        self.test_it_token = non_blank(token);
        self
    }

    #[must_use]
    pub fn with_jira_token(mut self, token: Option<String>) -> Self {
        self.jira_token = non_blank(token);
        self
    }
}

fn non_blank(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.trim().is_empty())
}
