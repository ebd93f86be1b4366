//! Schedule page parsing
//!
//! A schedule page carries one `div.periods_items` block per day, today
//! first. Each outage inside a block is a `span` holding exactly two bold
//! `HH:MM` labels. Only bare clock times are published, so absolute instants
//! are reconstructed from the block's position, the regional date and the
//! regional timezone.

use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use scraper::Html;

use crate::models::{Period, REGIONAL_TZ};
use crate::parser::sanitize::element_text;
use crate::parser::selectors::{MAX_DAY_BLOCKS, PERIOD_BLOCKS, PERIOD_ENTRY, TIME_LABEL};

/// Result of parsing one schedule page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSchedule {
    /// Outage windows in document order, today's block first
    pub periods: Vec<Period>,

    /// Day blocks found (at most two are read)
    pub blocks: usize,

    /// Entries that carried time labels but could not be turned into a period
    pub skipped: usize,
}

/// Parse the outage periods for `today` and the following day
///
/// Malformed entries are skipped one by one; a page without any day block
/// yields an empty schedule.
pub fn parse_periods(html: &str, today: NaiveDate) -> ParsedSchedule {
    let document = Html::parse_document(html);
    let mut parsed = ParsedSchedule::default();

    for (offset, block) in document
        .select(&PERIOD_BLOCKS)
        .take(MAX_DAY_BLOCKS)
        .enumerate()
    {
        parsed.blocks += 1;

        let Some(day) = today.checked_add_days(Days::new(offset as u64)) else {
            continue;
        };

        for entry in block.select(&PERIOD_ENTRY) {
            let labels: Vec<String> = entry.select(&TIME_LABEL).map(element_text).collect();
            if labels.is_empty() {
                continue;
            }

            let period = match labels.as_slice() {
                [start, end] => parse_entry(day, start, end),
                _ => None,
            };

            match period {
                Some(period) => parsed.periods.push(period),
                None => {
                    tracing::trace!(%day, ?labels, "Skipping malformed schedule entry");
                    parsed.skipped += 1;
                }
            }
        }
    }

    tracing::debug!(
        %today,
        blocks = parsed.blocks,
        periods = parsed.periods.len(),
        skipped = parsed.skipped,
        "Parsed schedule page"
    );

    parsed
}

fn parse_entry(day: NaiveDate, start: &str, end: &str) -> Option<Period> {
    let start = parse_time_label(start)?;
    let end = parse_time_label(end)?;
    build_period(day, start, end)
}

/// Parse an `HH:MM` label
///
/// `24:00` is accepted and read as midnight; combined with the overnight
/// rule in [`build_period`] it ends the period at the start of the next day.
pub fn parse_time_label(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    if text == "24:00" {
        return NaiveTime::from_hms_opt(0, 0, 0);
    }
    NaiveTime::parse_from_str(text, "%H:%M").ok()
}

/// Combine a day and two clock times into a period
///
/// When the end time is not after the start time on the clock, the window
/// crosses midnight and ends on the following calendar day. The decision is
/// made on the published clock values, before any DST adjustment; a window
/// that collapses inside a DST gap yields `None`.
pub fn build_period(day: NaiveDate, start: NaiveTime, end: NaiveTime) -> Option<Period> {
    let end_day = if end <= start { day.succ_opt()? } else { day };

    let start_at = localize(day, start)?;
    let end_at = localize(end_day, end)?;

    Period::new(start_at, end_at)
}

/// Regional wall-clock time to an absolute instant
///
/// Ambiguous times (clocks going back) take the earlier instant. Times that
/// do not exist (clocks going forward) move past the gap.
pub fn localize(day: NaiveDate, time: NaiveTime) -> Option<DateTime<Tz>> {
    let naive = day.and_time(time);

    match REGIONAL_TZ.from_local_datetime(&naive) {
        LocalResult::Single(at) => Some(at),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => REGIONAL_TZ
            .from_local_datetime(&(naive + chrono::Duration::hours(1)))
            .earliest(),
    }
}
