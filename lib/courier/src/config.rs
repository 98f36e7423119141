//! Client configuration types.
//!
//! - [`ClientConfig`] configures the bundled hyper transport.
//! - [`RestConfig`] configures the dispatcher: acceptable statuses and exchange logging.

use std::ops::RangeInclusive;
use std::time::Duration;

use crate::diagnostics::LogLevel;

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout duration.
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
        }
    }
}

/// Configuration for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestConfig {
    /// Inclusive range of statuses decoded as success.
    pub acceptable_status: RangeInclusive<u16>,
    /// Dump requests and responses through `tracing`.
    pub log_exchanges: bool,
    /// Verbosity of the exchange dump.
    pub log_level: LogLevel,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            acceptable_status: 200..=299,
            log_exchanges: false,
            log_level: LogLevel::Info,
        }
    }
}

impl RestConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> RestConfigBuilder {
        RestConfigBuilder::default()
    }
}

/// Builder for [`RestConfig`].
#[derive(Debug, Clone, Default)]
pub struct RestConfigBuilder {
    acceptable_status: Option<RangeInclusive<u16>>,
    log_exchanges: Option<bool>,
    log_level: Option<LogLevel>,
}

impl RestConfigBuilder {
    /// Set the acceptable status range.
    #[must_use]
    pub fn acceptable_status(mut self, range: RangeInclusive<u16>) -> Self {
        self.acceptable_status = Some(range);
        self
    }

    /// Enable or disable exchange logging.
    #[must_use]
    pub const fn log_exchanges(mut self, enabled: bool) -> Self {
        self.log_exchanges = Some(enabled);
        self
    }

    /// Set the exchange logging verbosity.
    #[must_use]
    pub const fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> RestConfig {
        let defaults = RestConfig::default();
        RestConfig {
            acceptable_status: self
                .acceptable_status
                .unwrap_or(defaults.acceptable_status),
            log_exchanges: self.log_exchanges.unwrap_or(defaults.log_exchanges),
            log_level: self.log_level.unwrap_or(defaults.log_level),
        }
    }
}
