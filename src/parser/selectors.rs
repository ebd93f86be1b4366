//! CSS selectors for the two known energy-ua.info page layouts
//!
//! The region directory and group schedule pages share one template; the
//! selectors below are everything the parsers rely on.

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    /// Region links in the site footer
    pub static ref REGION_LINKS: Selector = parse_selector!("ul.footer_regions_list a");

    /// Group links in the queue picker
    pub static ref GROUP_LINKS: Selector = parse_selector!(".select_group_list a");

    /// Day blocks on a schedule page: today first, then tomorrow
    pub static ref PERIOD_BLOCKS: Selector = parse_selector!("div.periods_items");

    /// One outage entry inside a day block
    pub static ref PERIOD_ENTRY: Selector = parse_selector!("span");

    /// Start/end time labels inside an entry
    pub static ref TIME_LABEL: Selector = parse_selector!("b");
}

/// Number of day blocks considered on a schedule page
pub const MAX_DAY_BLOCKS: usize = 2;
