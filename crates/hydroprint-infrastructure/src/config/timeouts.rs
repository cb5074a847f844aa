use std::time::Duration;

/// Configuration for timeout durations used by the persistence layer
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Waiting for a pooled connection
    pub db_connect: Duration,

    /// Single query round trip
    pub db_query: Duration,

    /// SQLite busy handler wait while another writer holds the lock
    pub db_busy: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        GLOBAL_TIMEOUT_CONFIG.clone()
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global timeout configuration
    pub fn global() -> &'static Self {
        &GLOBAL_TIMEOUT_CONFIG
    }
}

static GLOBAL_TIMEOUT_CONFIG: TimeoutConfig = TimeoutConfig {
    db_connect: Duration::from_secs(5),
    db_query: Duration::from_secs(10),
    db_busy: Duration::from_secs(5),
};
