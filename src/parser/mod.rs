//! HTML parsing and data extraction
//!
//! This module turns the publisher's region directory, group directory and
//! schedule pages into catalogs and outage periods. Parsers never fail: a
//! page that does not match the known layout simply yields fewer entries.

pub mod catalog;
pub mod periods;
pub mod sanitize;
pub mod selectors;

pub use catalog::{parse_groups, parse_regions, PUBLISHER_DOMAIN};
pub use periods::{parse_periods, ParsedSchedule};
