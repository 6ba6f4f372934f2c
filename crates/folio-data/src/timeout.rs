//! Request deadlines for the content backend.

use std::time::Duration;

/// Deadlines applied to each backend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Time allowed to establish the connection.
    pub connect: Duration,
    /// Time allowed for the whole request, body included.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Derive the connect deadline from the total (a quarter, at least 1ms).
    pub fn from_total(total: Duration) -> Self {
        let connect = (total / 4).max(Duration::from_millis(1));
        Self { connect, total }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(2),
            total: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_total_splits_connect() {
        let config = TimeoutConfig::from_total(Duration::from_millis(800));
        assert_eq!(config.connect, Duration::from_millis(200));
        assert_eq!(config.total, Duration::from_millis(800));
    }

    #[test]
    fn test_from_total_minimum_connect() {
        let config = TimeoutConfig::from_total(Duration::ZERO);
        assert_eq!(config.connect, Duration::from_millis(1));
    }
}
