use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Period;

/// Known outage periods for the configured region and group
///
/// Order is document order: today's block, then tomorrow's. Periods are kept
/// exactly as published, without merging or deduplication. A store is never
/// edited in place; each refresh builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntervalStore {
    /// Regional date the first day block was read as
    date: Option<NaiveDate>,
    periods: Vec<Period>,
}

impl IntervalStore {
    pub fn new(date: NaiveDate, periods: Vec<Period>) -> Self {
        Self {
            date: Some(date),
            periods,
        }
    }

    /// Store that has never been filled
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn iter(&self) -> impl Iterator<Item = &Period> {
        self.periods.iter()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

impl<'a> IntoIterator for &'a IntervalStore {
    type Item = &'a Period;
    type IntoIter = std::slice::Iter<'a, Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}
