//! Presentation views over a [`ScheduleClient`]
//!
//! Next outage/restore sensors, calendar events and a serializable status
//! snapshot, all read from the client's live store.

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;

use crate::crawler::PageSource;
use crate::models::{OutageEvent, Period, PowerState};
use crate::schedule::{default_lookahead, Transition};

use super::client::ScheduleClient;

/// Default calendar event title
pub const DEFAULT_EVENT_SUMMARY: &str = "Power outage";

/// Point-in-time status of one configured group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub region: Option<String>,
    pub region_label: String,
    pub group: Option<String>,
    pub group_label: String,
    pub state: PowerState,
    pub next_outage: Option<DateTime<Tz>>,
    pub next_restore: Option<DateTime<Tz>>,
    pub periods: Vec<Period>,
}

impl<S: PageSource> ScheduleClient<S> {
    /// Start of the next outage within the default lookahead
    pub fn next_outage<Z: TimeZone>(&self, now: &DateTime<Z>) -> Option<DateTime<Tz>> {
        self.next_transition(now, Transition::Outage, default_lookahead())
    }

    /// End of the next outage within the default lookahead
    pub fn next_restore<Z: TimeZone>(&self, now: &DateTime<Z>) -> Option<DateTime<Tz>> {
        self.next_transition(now, Transition::Restore, default_lookahead())
    }

    /// `"<region label> <group label>"`
    pub fn display_label(&self) -> String {
        format!(
            "{} {}",
            self.current_region_label(),
            self.current_group_label()
        )
    }

    /// Calendar event for the outage in effect at `now`, if any
    pub fn event_at<Z: TimeZone>(&self, now: &DateTime<Z>, summary: &str) -> Option<OutageEvent> {
        self.period_at(now).map(|period| self.event(period, summary))
    }

    /// Calendar events for every outage overlapping `[from, to]`
    pub fn events_between<Z: TimeZone>(
        &self,
        from: &DateTime<Z>,
        to: &DateTime<Z>,
        summary: &str,
    ) -> Vec<OutageEvent> {
        self.periods_between(from, to)
            .into_iter()
            .map(|period| self.event(period, summary))
            .collect()
    }

    /// Everything a status display needs, evaluated at `now`
    pub fn snapshot<Z: TimeZone>(&self, now: &DateTime<Z>) -> StatusSnapshot {
        self.snapshot_within(now, default_lookahead())
    }

    /// [`snapshot`](Self::snapshot) with a custom lookahead for the next
    /// outage and restore
    pub fn snapshot_within<Z: TimeZone>(
        &self,
        now: &DateTime<Z>,
        lookahead: chrono::Duration,
    ) -> StatusSnapshot {
        StatusSnapshot {
            region: self.state().region().map(str::to_owned),
            region_label: self.current_region_label().to_owned(),
            group: self.state().group().map(str::to_owned),
            group_label: self.current_group_label().to_owned(),
            state: self.current_state(now),
            next_outage: self.next_transition(now, Transition::Outage, lookahead),
            next_restore: self.next_transition(now, Transition::Restore, lookahead),
            periods: self.periods().to_vec(),
        }
    }

    fn event(&self, period: &Period, summary: &str) -> OutageEvent {
        OutageEvent {
            start: period.start(),
            end: period.end(),
            summary: summary.to_owned(),
            description: self.display_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientState, REGIONAL_TZ};
    use crate::utils::error::FetchError;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct FixedPage(&'static str);

    #[async_trait]
    impl PageSource for FixedPage {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    const SCHEDULE: &str = r#"
        <div class="periods_items">
          <span><b>08:00</b> - <b>12:00</b></span>
          <span><b>16:00</b> - <b>18:00</b></span>
        </div>
        <div class="periods_items"><span><b>22:00</b> - <b>02:00</b></span></div>
    "#;

    fn at(d: u32, h: u32, m: u32) -> DateTime<Tz> {
        REGIONAL_TZ.with_ymd_and_hms(2024, 1, d, h, m, 0).unwrap()
    }

    async fn loaded() -> ScheduleClient<FixedPage> {
        let mut client = ScheduleClient::new(FixedPage(SCHEDULE)).with_state(
            ClientState::Configured {
                region: "kyiv.energy-ua.info".into(),
                group: "1-1".into(),
            },
        );
        client
            .refresh_schedule_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .await
            .unwrap();
        client
    }

    #[tokio::test]
    async fn test_next_outage_and_restore() {
        let client = loaded().await;

        assert_eq!(client.next_outage(&at(1, 9, 0)), Some(at(1, 16, 0)));
        assert_eq!(client.next_restore(&at(1, 9, 0)), Some(at(1, 12, 0)));
        // Tomorrow night starts 27 hours after 19:00, past the horizon
        assert_eq!(client.next_outage(&at(1, 19, 0)), None);
        assert_eq!(client.next_outage(&at(2, 0, 0)), Some(at(2, 22, 0)));
    }

    #[tokio::test]
    async fn test_events() {
        let client = loaded().await;

        let event = client.event_at(&at(1, 17, 0), DEFAULT_EVENT_SUMMARY).unwrap();
        assert_eq!(event.start, at(1, 16, 0));
        assert_eq!(event.end, at(1, 18, 0));
        assert_eq!(event.summary, "Power outage");
        // Catalogs were never discovered, so both labels are empty
        assert_eq!(event.description, " ");

        assert!(client.event_at(&at(1, 13, 0), "x").is_none());
        assert_eq!(
            client.events_between(&at(1, 0, 0), &at(3, 0, 0), "x").len(),
            3
        );
    }

    #[tokio::test]
    async fn test_snapshot_serializes() {
        let client = loaded().await;
        let snapshot = client.snapshot(&at(1, 9, 0));

        assert_eq!(snapshot.state, PowerState::Outage);
        assert_eq!(snapshot.group.as_deref(), Some("1-1"));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["state"], "outage");
        assert_eq!(json["periods"].as_array().unwrap().len(), 3);
        assert!(json["periods"][0]["start"]
            .as_str()
            .unwrap()
            .starts_with("2024-01-01T08:00:00"));
        assert!(json["next_restore"].is_string());
    }

    #[tokio::test]
    async fn test_snapshot_custom_lookahead() {
        let client = loaded().await;

        assert_eq!(client.snapshot(&at(1, 19, 0)).next_outage, None);
        assert_eq!(
            client
                .snapshot_within(&at(1, 19, 0), chrono::Duration::hours(36))
                .next_outage,
            Some(at(2, 22, 0))
        );
    }
}
