//! Records exchanged with the query-tracking API.
//!
//! Read models derive `Deserialize` (and `Serialize` for CLI rendering);
//! write payloads derive `Serialize` only. The server owns every state
//! transition, so none of these carry mutation logic beyond validation.

mod project;
mod query;
mod usage;
mod user;

pub use project::{Project, ProjectUpdate};
pub use query::{NewLog, NewQuery, Query, QueryLog, QueryPatch};
pub use usage::{TokenUsage, TokenUsageBucket, TokenUsageStats};
pub use user::{LoginResponse, PasswordChange, User, MIN_PASSWORD_LEN};
