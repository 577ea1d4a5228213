//! Status enum for queries.
//!
//! Serialized as `snake_case` to match the API wire format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Processing status of a query.
///
/// ```text
/// queued → in_progress → done
///                      → failed
/// ```
///
/// Transitions are owned by the server; the client only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Queued,
    InProgress,
    Done,
    Failed,
}

impl QueryStatus {
    pub const ALL: [Self; 4] = [Self::Queued, Self::InProgress, Self::Done, Self::Failed];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// A terminal query no longer changes and needs no polling.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Only finished queries may be deleted.
    #[must_use]
    pub const fn is_deletable(self) -> bool {
        self.is_terminal()
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
