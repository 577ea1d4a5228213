//! Status polling configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_interval_secs() -> u64 {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollConfig {
    /// Seconds between re-fetches while a query is not terminal.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl PollConfig {
    /// Polling interval, never shorter than one second.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_interval_is_three_seconds() {
        assert_eq!(PollConfig::default().interval(), Duration::from_secs(3));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = PollConfig { interval_secs: 0 };
        assert_eq!(config.interval(), Duration::from_secs(1));
    }
}
