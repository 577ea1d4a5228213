pub mod auth;
pub mod project;
pub mod query;
pub mod usage;

pub use auth::AuthCommands;
pub use project::ProjectCommands;
pub use query::QueryCommands;
pub use usage::UsageCommands;
