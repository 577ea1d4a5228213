//! Polling a query until it reaches a terminal status.
//!
//! Cancellation is by drop: the watcher owns no background task, so dropping
//! the [`QueryWatcher::run`] future stops the timer with it.

use std::time::Duration;

use buddy_core::entities::{Query, QueryLog};
use serde::Serialize;
use tokio::time::MissedTickBehavior;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// The query and its logs as of one poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySnapshot {
    pub query: Query,
    pub logs: Vec<QueryLog>,
}

impl QuerySnapshot {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.query.status.is_terminal()
    }
}

#[derive(Debug)]
pub struct QueryWatcher<'a, T> {
    client: &'a ApiClient<T>,
    id: u64,
    interval: Duration,
}

impl<'a, T: Transport> QueryWatcher<'a, T> {
    pub const fn new(client: &'a ApiClient<T>, id: u64) -> Self {
        Self {
            client,
            id,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Poll until the query is terminal, calling `on_update` after every fetch.
    ///
    /// The first fetch happens immediately. A failed log fetch keeps the
    /// previous logs and is only logged.
    ///
    /// # Errors
    ///
    /// Returns the first error from fetching the query itself.
    pub async fn run(
        self,
        mut on_update: impl FnMut(&QuerySnapshot) + Send,
    ) -> Result<QuerySnapshot, ApiError> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut logs = Vec::new();

        loop {
            ticker.tick().await;
            let query = self.client.get_query(self.id).await?;
            match self.client.query_logs(self.id).await {
                Ok(fresh) => logs = fresh,
                Err(error) => tracing::warn!(id = self.id, %error, "failed to fetch query logs"),
            }

            let snapshot = QuerySnapshot {
                query,
                logs: logs.clone(),
            };
            on_update(&snapshot);
            if snapshot.is_terminal() {
                tracing::debug!(id = self.id, status = %snapshot.query.status, "watch finished");
                return Ok(snapshot);
            }
        }
    }
}

impl<T: Transport> ApiClient<T> {
    /// Watch query `id` at the default interval.
    pub const fn watch(&self, id: u64) -> QueryWatcher<'_, T> {
        QueryWatcher::new(self, id)
    }
}
