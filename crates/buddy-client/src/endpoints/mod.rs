//! Typed wrappers for the REST endpoints, grouped by resource.

mod auth;
mod logs;
mod projects;
mod queries;
mod usage;

pub use auth::{LOGIN_PATH, Session};
