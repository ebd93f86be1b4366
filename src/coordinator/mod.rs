//! Schedule coordination for one region and group
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │              ScheduleClient              │
//! │                                          │
//! │  ClientState ── Endpoints ── PageSource  │
//! │                                          │
//! │  discover_regions → RegionCatalog        │
//! │  discover_groups  → GroupCatalog         │
//! │  refresh_schedule → IntervalStore        │
//! └────────────────────┬─────────────────────┘
//!                      │
//!        ┌─────────────┴─────────────┐
//!        │                           │
//!   events (views)             Poller (interval)
//!   next outage/restore        refresh + failure log
//!   calendar events
//!   status snapshot
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use energyua::coordinator::ScheduleClient;
//! use energyua::crawler::PageFetcher;
//! use energyua::models::regional_now;
//!
//! # async fn run() -> energyua::error::Result<()> {
//! let mut client = ScheduleClient::new(PageFetcher::new()?);
//! client.select_region("kyiv.energy-ua.info");
//! client.select_group("1-1");
//! client.refresh_schedule().await?;
//!
//! println!("{}", client.current_state(&regional_now()));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod events;
pub mod poller;

pub use client::ScheduleClient;
pub use events::{StatusSnapshot, DEFAULT_EVENT_SUMMARY};
pub use poller::{Poller, UPDATE_INTERVAL};
