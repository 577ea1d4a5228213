//! # buddy-core
//!
//! Core types shared across all Buddy crates:
//! - Records returned by the query-tracking API (users, queries, logs,
//!   projects, token usage)
//! - `QueryStatus` with its terminal/deletable rules
//! - List-envelope parsing (bare arrays and paginated `results` envelopes)
//! - Client-side validation and the cross-cutting `CoreError`

pub mod entities;
pub mod enums;
pub mod errors;
pub mod listing;

pub use enums::QueryStatus;
pub use errors::CoreError;
pub use listing::ListEnvelope;
