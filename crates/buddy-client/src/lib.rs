//! # buddy-client
//!
//! Authenticated REST client for the Buddy query-tracking API.
//!
//! - [`transport`]: request/response values and the `reqwest` transport
//! - [`interceptor`]: bearer attachment and the single refresh-and-retry on 401
//! - [`ApiClient`]: typed endpoint wrappers (auth, queries, logs, projects,
//!   token usage)
//! - [`watch`]: polling a query until it finishes

pub mod client;
pub mod endpoints;
pub mod error;
pub mod interceptor;
pub mod transport;
pub mod watch;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use endpoints::Session;
pub use error::{ApiError, error_message};
pub use interceptor::{AuthInterceptor, SessionExpiredHook};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
pub use watch::{QuerySnapshot, QueryWatcher};
