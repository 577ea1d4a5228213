//! Cross-cutting error types for Buddy.
//!
//! Transport and auth errors live in their own crates; these are raised by
//! client-side checks that run before any request is sent.

use thiserror::Error;

use crate::enums::QueryStatus;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Input failed a client-side check.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Deletion attempted on a query that is still being processed.
    #[error("query #{id} is {status}; only done or failed queries can be deleted")]
    NotDeletable { id: u64, status: QueryStatus },
}
