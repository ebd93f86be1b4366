//! Configuration management for the energyua client
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::crawler::headers::DEFAULT_USER_AGENT;
use crate::models::{ClientState, DEFAULT_REGION};

/// Upper bound for `lookahead_hours`; the publisher only covers two days
pub const MAX_LOOKAHEAD_HOURS: u64 = 24 * 7;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP client configuration
    pub client: ClientConfig,

    /// Region/group selection and polling
    pub schedule: ScheduleConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Host of the publisher directory page
    pub publisher_root: String,

    /// URL scheme (https in production)
    pub scheme: String,

    /// Total request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

/// Region/group selection and polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Region host, e.g. `kyiv.energy-ua.info`
    pub region: Option<String>,

    /// Group identifier within the region, e.g. `1-1`
    pub group: Option<String>,

    /// Seconds between schedule refreshes
    pub poll_interval_secs: u64,

    /// Horizon for next-outage / next-restore lookups, in hours
    pub lookahead_hours: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables keep their default values.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let publisher_root = std::env::var("ENERGYUA_PUBLISHER_ROOT")
            .unwrap_or(defaults.client.publisher_root);

        let scheme = std::env::var("ENERGYUA_SCHEME").unwrap_or(defaults.client.scheme);

        let request_timeout_secs = std::env::var("ENERGYUA_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.client.request_timeout_secs);

        let user_agent =
            std::env::var("ENERGYUA_USER_AGENT").unwrap_or(defaults.client.user_agent);

        let region = std::env::var("ENERGYUA_REGION").ok().filter(|v| !v.is_empty());
        let group = std::env::var("ENERGYUA_GROUP").ok().filter(|v| !v.is_empty());

        let poll_interval_secs = std::env::var("ENERGYUA_POLL_INTERVAL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.schedule.poll_interval_secs);

        let lookahead_hours = std::env::var("ENERGYUA_LOOKAHEAD_HOURS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.schedule.lookahead_hours);

        let level = std::env::var("ENERGYUA_LOG_LEVEL").unwrap_or(defaults.logging.level);
        let format = std::env::var("ENERGYUA_LOG_FORMAT").unwrap_or(defaults.logging.format);

        let config = Self {
            client: ClientConfig {
                publisher_root,
                scheme,
                request_timeout_secs,
                user_agent,
            },
            schedule: ScheduleConfig {
                region,
                group,
                poll_interval_secs,
                lookahead_hours,
            },
            logging: LoggingConfig { level, format },
        };

        config.validate().context("Invalid configuration in environment")?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.client.publisher_root.trim().is_empty() {
            anyhow::bail!("publisher_root must not be empty");
        }

        if !matches!(self.client.scheme.as_str(), "http" | "https") {
            anyhow::bail!("scheme must be http or https, got {:?}", self.client.scheme);
        }

        if self.client.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.schedule.poll_interval_secs == 0 {
            anyhow::bail!("poll_interval_secs must be greater than 0");
        }

        if self.schedule.lookahead_hours == 0 {
            anyhow::bail!("lookahead_hours must be greater than 0");
        }

        if self.schedule.lookahead_hours > MAX_LOOKAHEAD_HOURS {
            anyhow::bail!(
                "lookahead_hours must be at most {MAX_LOOKAHEAD_HOURS}, got {}",
                self.schedule.lookahead_hours
            );
        }

        if self.schedule.group.is_some() && self.schedule.region.is_none() {
            anyhow::bail!("group is set but region is not");
        }

        Ok(())
    }

    /// Region/group selection as a client state
    #[must_use]
    pub fn client_state(&self) -> ClientState {
        ClientState::from_parts(self.schedule.region.clone(), self.schedule.group.clone())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.client.request_timeout()
    }

    /// Get poll interval as Duration
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.schedule.poll_interval_secs)
    }

    /// Get lookahead window as a chrono Duration
    ///
    /// Clamped to [`MAX_LOOKAHEAD_HOURS`] for configs that skipped validation.
    #[must_use]
    pub fn lookahead(&self) -> chrono::Duration {
        let hours = self.schedule.lookahead_hours.min(MAX_LOOKAHEAD_HOURS);
        chrono::Duration::hours(hours as i64)
    }
}

impl ClientConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            publisher_root: String::from(DEFAULT_REGION),
            scheme: String::from("https"),
            request_timeout_secs: 10,
            user_agent: String::from(DEFAULT_USER_AGENT),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            region: None,
            group: None,
            poll_interval_secs: 15 * 60,
            lookahead_hours: 24,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}
