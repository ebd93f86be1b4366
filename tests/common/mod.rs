//! Common test utilities

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use energyua::models::REGIONAL_TZ;
use std::path::PathBuf;

/// Read an HTML fixture from `tests/fixtures/html`
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/html")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", path.display()))
}

/// Regional date
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Regional instant
pub fn kyiv(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
    REGIONAL_TZ.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Schedule page with one `div.periods_items` block per day
///
/// Each day is a list of `(start, end)` labels.
pub fn schedule_page(days: &[&[(&str, &str)]]) -> String {
    let mut html = String::from("<html><body><div class=\"schedule\">");
    for day in days {
        html.push_str("<div class=\"periods_items\">");
        for (start, end) in *day {
            html.push_str(&format!("<span><b>{start}</b> - <b>{end}</b></span>"));
        }
        html.push_str("</div>");
    }
    html.push_str("</div></body></html>");
    html
}
