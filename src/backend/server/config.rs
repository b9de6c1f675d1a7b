/**
 * Server Configuration
 *
 * Configuration is read from environment variables, with defaults suited to
 * local development. A `.env` file is honoured by the binary before this
 * module runs.
 *
 * | variable                   | default        |
 * |----------------------------|----------------|
 * | `SERVER_PORT`              | 3000           |
 * | `JWT_SECRET`               | dev secret     |
 * | `NOTIFY_KEEP_ALIVE_SECS`   | 15             |
 * | `NOTIFY_CHANNEL_CAPACITY`  | 64 (max 2^20)  |
 * | `NOTIFY_MAX_LIFETIME_SECS` | unset (none)   |
 *
 * There is deliberately no server-side deadline on push channels unless
 * `NOTIFY_MAX_LIFETIME_SECS` is set to a positive value. Idle timeouts are
 * the business of whatever proxy sits in front of the server.
 */

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::backend::notification::handshake::DEFAULT_CHANNEL_CAPACITY;

/// Secret used when `JWT_SECRET` is not set
pub const DEV_JWT_SECRET: &str = "mingle-dev-secret-change-in-production";

pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(15);

/// Largest accepted per-channel buffer
pub const MAX_CHANNEL_CAPACITY: usize = 1 << 20;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen port
    pub port: u16,
    /// HMAC secret for access tokens
    pub jwt_secret: String,
    /// Interval between SSE keep-alive comments
    pub keep_alive_interval: Duration,
    /// Undelivered events buffered per channel
    pub channel_capacity: usize,
    /// Optional hard limit on a subscription's lifetime
    pub max_connection_lifetime: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            keep_alive_interval: DEFAULT_KEEP_ALIVE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            max_connection_lifetime: None,
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn positive(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    match parse::<u64>(key, value)? {
        0 => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
        n => Ok(n),
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup
    ///
    /// # Example
    ///
    /// ```rust
    /// use mingle_push::backend::server::config::ServerConfig;
    ///
    /// let config = ServerConfig::from_lookup(|key| match key {
    ///     "SERVER_PORT" => Some("8080".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.port, 8080);
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("SERVER_PORT") {
            config.port = parse("SERVER_PORT", &value)?;
        }

        match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => config.jwt_secret = secret,
            _ => tracing::warn!("JWT_SECRET not set, using the development secret"),
        }

        if let Some(value) = lookup("NOTIFY_KEEP_ALIVE_SECS") {
            config.keep_alive_interval =
                Duration::from_secs(positive("NOTIFY_KEEP_ALIVE_SECS", &value)?);
        }

        if let Some(value) = lookup("NOTIFY_CHANNEL_CAPACITY") {
            let capacity = positive("NOTIFY_CHANNEL_CAPACITY", value.as_str())?;
            config.channel_capacity = usize::try_from(capacity)
                .ok()
                .filter(|capacity| *capacity <= MAX_CHANNEL_CAPACITY)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "NOTIFY_CHANNEL_CAPACITY",
                    value: value.clone(),
                })?;
        }

        if let Some(value) = lookup("NOTIFY_MAX_LIFETIME_SECS") {
            config.max_connection_lifetime = match parse::<u64>("NOTIFY_MAX_LIFETIME_SECS", &value)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            };
        }

        Ok(config)
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    pub fn keep_alive_interval(mut self, interval: Duration) -> Self {
        self.config.keep_alive_interval = interval;
        self
    }

    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = capacity;
        self
    }

    pub fn max_connection_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.config.max_connection_lifetime = lifetime;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let capacity = self.config.channel_capacity;
        if capacity == 0 || capacity > MAX_CHANNEL_CAPACITY {
            return Err(ConfigError::InvalidValue {
                key: "channel_capacity",
                value: capacity.to_string(),
            });
        }
        if self.config.keep_alive_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "keep_alive_interval",
                value: "0s".to_string(),
            });
        }
        Ok(self.config)
    }
}
