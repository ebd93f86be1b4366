//! Outage interval storage and temporal queries
//!
//! - [`store`] - the ordered period snapshot produced by each refresh
//! - [`query`] - point, range and next-transition lookups over a snapshot

pub mod query;
pub mod store;

pub use query::Transition;
pub use store::IntervalStore;

/// Default horizon for next-outage / next-restore lookups, in hours
pub const LOOKAHEAD_HOURS: i64 = 24;

/// [`LOOKAHEAD_HOURS`] as a duration
pub fn default_lookahead() -> chrono::Duration {
    chrono::Duration::hours(LOOKAHEAD_HOURS)
}
