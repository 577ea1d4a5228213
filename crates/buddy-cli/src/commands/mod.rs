pub mod auth;
pub mod dispatch;
pub mod log;
pub mod project;
pub mod query;
pub mod shared;
pub mod usage;
