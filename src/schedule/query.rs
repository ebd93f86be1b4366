//! Temporal queries over an [`IntervalStore`] snapshot
//!
//! All comparisons are on absolute instants, so callers may pass times in
//! any timezone. Boundaries are inclusive: a period contains its own start
//! and end, and a period touching a range at an endpoint overlaps it.

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::{Period, PowerState};
use crate::schedule::store::IntervalStore;

/// Which period boundary a next-transition query looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// Power goes out: a period start
    Outage,
    /// Power comes back: a period end
    Restore,
}

impl Transition {
    /// `restore == true` asks for the next end, otherwise the next start
    pub fn from_restore(restore: bool) -> Self {
        if restore {
            Self::Restore
        } else {
            Self::Outage
        }
    }

    fn boundary(&self, period: &Period) -> DateTime<Tz> {
        match self {
            Self::Outage => period.start(),
            Self::Restore => period.end(),
        }
    }
}

impl IntervalStore {
    /// First period containing `at`, in store order
    pub fn period_at<Z: TimeZone>(&self, at: &DateTime<Z>) -> Option<&Period> {
        self.iter().find(|period| period.contains(at))
    }

    /// All periods overlapping `[from, to]`, in store order
    pub fn periods_between<Z: TimeZone>(
        &self,
        from: &DateTime<Z>,
        to: &DateTime<Z>,
    ) -> Vec<&Period> {
        self.iter()
            .filter(|period| period.overlaps(from, to))
            .collect()
    }

    /// Earliest boundary of the requested kind strictly after `now`
    ///
    /// Only periods overlapping `[now, now + window]` are candidates.
    pub fn next_transition<Z: TimeZone>(
        &self,
        now: &DateTime<Z>,
        transition: Transition,
        window: chrono::Duration,
    ) -> Option<DateTime<Tz>> {
        let horizon = now.clone().checked_add_signed(window)?;

        self.periods_between(now, &horizon)
            .into_iter()
            .map(|period| transition.boundary(period))
            .filter(|at| at > now)
            .min()
    }

    /// Outage if any period contains `now`
    pub fn current_state<Z: TimeZone>(&self, now: &DateTime<Z>) -> PowerState {
        if self.period_at(now).is_some() {
            PowerState::Outage
        } else {
            PowerState::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::REGIONAL_TZ;
    use chrono::{Duration, NaiveDate, Utc};

    fn at(d: u32, h: u32, m: u32) -> DateTime<Tz> {
        REGIONAL_TZ.with_ymd_and_hms(2024, 1, d, h, m, 0).unwrap()
    }

    fn period(start: DateTime<Tz>, end: DateTime<Tz>) -> Period {
        Period::new(start, end).unwrap()
    }

    fn store(periods: Vec<Period>) -> IntervalStore {
        IntervalStore::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), periods)
    }

    #[test]
    fn test_period_at_inclusive_boundaries() {
        let morning = period(at(1, 8, 0), at(1, 12, 0));
        let store = store(vec![morning]);

        assert_eq!(store.period_at(&at(1, 8, 0)), Some(&morning));
        assert_eq!(store.period_at(&at(1, 12, 0)), Some(&morning));
        assert_eq!(store.period_at(&at(1, 7, 59)), None);
        assert_eq!(store.period_at(&at(1, 12, 1)), None);
    }

    #[test]
    fn test_period_at_first_match_wins() {
        let first = period(at(1, 8, 0), at(1, 12, 0));
        let overlapping = period(at(1, 10, 0), at(1, 14, 0));
        let store = store(vec![first, overlapping]);

        assert_eq!(store.period_at(&at(1, 11, 0)), Some(&first));
        assert_eq!(store.period_at(&at(1, 13, 0)), Some(&overlapping));
    }

    #[test]
    fn test_periods_between_touching() {
        let morning = period(at(1, 8, 0), at(1, 12, 0));
        let evening = period(at(1, 18, 0), at(1, 20, 0));
        let store = store(vec![morning, evening]);

        // Range starts exactly where the morning period ends
        assert_eq!(store.periods_between(&at(1, 12, 0), &at(1, 15, 0)), vec![&morning]);
        // Range ends exactly where the evening period starts
        assert_eq!(store.periods_between(&at(1, 13, 0), &at(1, 18, 0)), vec![&evening]);
        assert_eq!(
            store.periods_between(&at(1, 0, 0), &at(2, 0, 0)),
            vec![&morning, &evening]
        );
        assert!(store.periods_between(&at(1, 12, 1), &at(1, 17, 59)).is_empty());
    }

    #[test]
    fn test_next_outage() {
        let morning = period(at(1, 8, 0), at(1, 12, 0));
        let night = period(at(2, 22, 0), at(3, 2, 0));
        let store = store(vec![morning, night]);

        assert_eq!(
            store.next_transition(&at(1, 13, 0), Transition::Outage, Duration::hours(48)),
            Some(at(2, 22, 0))
        );
        // Night period starts outside a 24 hour window
        assert_eq!(
            store.next_transition(&at(1, 13, 0), Transition::Outage, Duration::hours(24)),
            None
        );
        assert_eq!(
            store.next_transition(&at(1, 6, 0), Transition::Outage, Duration::hours(24)),
            Some(at(1, 8, 0))
        );
    }

    #[test]
    fn test_next_outage_none_when_all_started() {
        let store = store(vec![period(at(1, 8, 0), at(1, 12, 0))]);

        assert_eq!(
            store.next_transition(&at(1, 8, 0), Transition::Outage, Duration::hours(24)),
            None
        );
        assert_eq!(
            store.next_transition(&at(1, 9, 0), Transition::Outage, Duration::hours(24)),
            None
        );
    }

    #[test]
    fn test_next_restore_during_outage() {
        let store = store(vec![
            period(at(1, 8, 0), at(1, 12, 0)),
            period(at(1, 16, 0), at(1, 20, 0)),
        ]);

        assert_eq!(
            store.next_transition(&at(1, 9, 0), Transition::Restore, Duration::hours(24)),
            Some(at(1, 12, 0))
        );
        // Exactly at the end: the end is not strictly after now
        assert_eq!(
            store.next_transition(&at(1, 12, 0), Transition::Restore, Duration::hours(24)),
            Some(at(1, 20, 0))
        );
    }

    #[test]
    fn test_current_state() {
        let store = store(vec![period(at(1, 8, 0), at(1, 12, 0))]);

        assert_eq!(store.current_state(&at(1, 9, 0)), PowerState::Outage);
        assert_eq!(store.current_state(&at(1, 13, 0)), PowerState::Normal);
        assert_eq!(IntervalStore::empty().current_state(&at(1, 9, 0)), PowerState::Normal);
    }

    #[test]
    fn test_queries_accept_utc() {
        let store = store(vec![period(at(1, 8, 0), at(1, 12, 0))]);
        // 07:00 UTC is 09:00 in Kyiv (EET, UTC+2)
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();

        assert_eq!(store.current_state(&now), PowerState::Outage);
        assert_eq!(
            store.next_transition(&now, Transition::Restore, Duration::hours(24)),
            Some(at(1, 12, 0))
        );
    }

    #[test]
    fn test_transition_from_restore() {
        assert_eq!(Transition::from_restore(true), Transition::Restore);
        assert_eq!(Transition::from_restore(false), Transition::Outage);
    }
}
