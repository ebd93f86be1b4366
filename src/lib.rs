//! energyua - Power outage schedules for energy-ua.info
//!
//! Scrapes the publisher's region and group directories and per-group
//! schedule pages, and answers interval queries over the published outage
//! periods.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Page retrieval, request headers and URL layout
//! - [`parser`] - Catalog and schedule page parsing
//! - [`schedule`] - Interval store and temporal queries
//! - [`coordinator`] - The schedule client, presentation views and poller
//! - [`models`] - Core data structures and types
//! - [`error`] - Error classification
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use energyua::config::Config;
//! use energyua::coordinator::ScheduleClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let mut client = ScheduleClient::from_config(&config)?;
//!     client.discover_regions().await?;
//!     client.refresh_schedule().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod coordinator;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod schedule;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::coordinator::{Poller, ScheduleClient, StatusSnapshot};
    pub use crate::crawler::{Endpoints, PageFetcher, PageSource};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::models::{
        CatalogEntry, ClientState, OutageEvent, Period, PowerState, REGIONAL_TZ,
    };
    pub use crate::schedule::{IntervalStore, Transition};
}

// Direct re-exports for convenience
pub use models::{ClientState, Period, PowerState};
