//! Schedule client for one region and group
//!
//! The client owns the configuration state, the two discovered catalogs and
//! the live interval store. Every network-backed operation fetches and parses
//! completely before anything is swapped in, so a failed call leaves the
//! previous data visible.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::crawler::{Endpoints, PageFetcher, PageSource};
use crate::error::Result;
use crate::models::{
    regional_now, CatalogEntry, ClientState, GroupCatalog, Period, PowerState, RegionCatalog,
};
use crate::parser::{parse_groups, parse_periods, parse_regions};
use crate::schedule::{IntervalStore, Transition};

// ============================================================================
// Schedule Client
// ============================================================================

/// Scraper and query front end for energy-ua.info outage schedules
///
/// Generic over the [`PageSource`] so tests can swap the transport.
pub struct ScheduleClient<S = PageFetcher> {
    source: S,
    endpoints: Endpoints,
    state: ClientState,
    regions: Arc<RegionCatalog>,
    groups: Arc<GroupCatalog>,
    store: Arc<IntervalStore>,
}

impl ScheduleClient<PageFetcher> {
    /// Build an HTTP-backed client from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns a general error if the HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = PageFetcher::from_config(&config.client)?;

        Ok(Self::new(fetcher)
            .with_endpoints(Endpoints::from_config(&config.client))
            .with_state(config.client_state()))
    }
}

impl<S: PageSource> ScheduleClient<S> {
    /// Unconfigured client pointed at the public publisher
    pub fn new(source: S) -> Self {
        Self {
            source,
            endpoints: Endpoints::default(),
            state: ClientState::Unconfigured,
            regions: Arc::new(RegionCatalog::new()),
            groups: Arc::new(GroupCatalog::new()),
            store: Arc::new(IntervalStore::empty()),
        }
    }

    /// Set the URL layout
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the initial region/group selection
    pub fn with_state(mut self, state: ClientState) -> Self {
        self.state = state;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Point the client at a region
    ///
    /// Changing region drops the group selection and the group catalog,
    /// since group identifiers are only meaningful within one region.
    pub fn select_region(&mut self, region: impl Into<String>) {
        let region = region.into();
        if self.state.region() == Some(region.as_str()) {
            return;
        }

        debug!(region = %region, "Region selected");
        self.state = ClientState::RegionOnly { region };
        self.groups = Arc::new(GroupCatalog::new());
    }

    /// Point the client at a group of the selected region
    ///
    /// Returns `false` and leaves the state alone when no region is set.
    pub fn select_group(&mut self, group: impl Into<String>) -> bool {
        let group = group.into();
        let Some(region) = self.state.region().map(str::to_owned) else {
            warn!(group = %group, "Cannot select a group before a region");
            return false;
        };

        debug!(region = %region, group = %group, "Group selected");
        self.state = ClientState::Configured { region, group };
        true
    }

    // ------------------------------------------------------------------------
    // Discovery and refresh
    // ------------------------------------------------------------------------

    /// Replace the region catalog with the publisher's current directory
    ///
    /// # Errors
    ///
    /// Returns a communication error if the root page cannot be fetched; the
    /// previous catalog is kept.
    pub async fn discover_regions(&mut self) -> Result<()> {
        let url = self.endpoints.regions_url();
        let html = self.source.fetch(&url).await?;

        self.regions = Arc::new(parse_regions(&html));
        Ok(())
    }

    /// Replace the group catalog with the selected region's directory
    ///
    /// Does nothing when no region is selected.
    ///
    /// # Errors
    ///
    /// Returns a communication error if the region page cannot be fetched;
    /// the previous catalog is kept.
    pub async fn discover_groups(&mut self) -> Result<()> {
        let Some(region) = self.state.region() else {
            warn!("Group discovery skipped: no region selected");
            return Ok(());
        };

        let url = self.endpoints.groups_url(region);
        let html = self.source.fetch(&url).await?;

        self.groups = Arc::new(parse_groups(&html));
        Ok(())
    }

    /// Refresh the schedule using today's regional date
    ///
    /// # Errors
    ///
    /// See [`ScheduleClient::refresh_schedule_on`]
    pub async fn refresh_schedule(&mut self) -> Result<()> {
        let today = regional_now().date_naive();
        self.refresh_schedule_on(today).await
    }

    /// Refresh the schedule, reading the first day block as `today`
    ///
    /// Does nothing unless both region and group are selected. A page
    /// without recognizable entries replaces the store with an empty one.
    ///
    /// # Errors
    ///
    /// Returns a communication error if the schedule page cannot be fetched;
    /// the previous store is kept.
    pub async fn refresh_schedule_on(&mut self, today: NaiveDate) -> Result<()> {
        let ClientState::Configured { region, group } = &self.state else {
            warn!(state = ?self.state, "Schedule refresh skipped: region and group required");
            return Ok(());
        };

        let url = self.endpoints.schedule_url(region, group);
        let html = self.source.fetch(&url).await?;

        let parsed = parse_periods(&html, today);

        if parsed.blocks == 0 {
            warn!(url = %url, "Schedule page has no period blocks");
        } else if parsed.periods.is_empty() && parsed.skipped > 0 {
            warn!(
                url = %url,
                skipped = parsed.skipped,
                "No usable entries on schedule page"
            );
        }

        info!(
            region = %region,
            group = %group,
            date = %today,
            periods = parsed.periods.len(),
            "Schedule refreshed"
        );

        self.store = Arc::new(IntervalStore::new(today, parsed.periods));
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Catalog lookups
    // ------------------------------------------------------------------------

    /// Current region catalog snapshot
    pub fn regions(&self) -> Arc<RegionCatalog> {
        Arc::clone(&self.regions)
    }

    /// Current group catalog snapshot
    pub fn groups(&self) -> Arc<GroupCatalog> {
        Arc::clone(&self.groups)
    }

    pub fn region_label(&self, region: &str) -> Option<&str> {
        self.regions.label(region)
    }

    pub fn region_entry(&self, region: &str) -> Option<&CatalogEntry> {
        self.regions.entry(region)
    }

    pub fn region_by_label(&self, label: &str) -> Option<&CatalogEntry> {
        self.regions.by_label(label)
    }

    pub fn group_label(&self, group: &str) -> Option<&str> {
        self.groups.label(group)
    }

    pub fn group_entry(&self, group: &str) -> Option<&CatalogEntry> {
        self.groups.entry(group)
    }

    pub fn group_by_label(&self, label: &str) -> Option<&CatalogEntry> {
        self.groups.by_label(label)
    }

    /// Label of the selected region, or `""` if unknown
    pub fn current_region_label(&self) -> &str {
        self.state
            .region()
            .and_then(|region| self.region_label(region))
            .unwrap_or_default()
    }

    /// Label of the selected group, or `""` if unknown
    pub fn current_group_label(&self) -> &str {
        self.state
            .group()
            .and_then(|group| self.group_label(group))
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Schedule queries
    // ------------------------------------------------------------------------

    /// Current interval store snapshot
    pub fn store(&self) -> Arc<IntervalStore> {
        Arc::clone(&self.store)
    }

    pub fn periods(&self) -> &[Period] {
        self.store.periods()
    }

    pub fn period_at<Z: TimeZone>(&self, at: &DateTime<Z>) -> Option<&Period> {
        self.store.period_at(at)
    }

    pub fn periods_between<Z: TimeZone>(
        &self,
        from: &DateTime<Z>,
        to: &DateTime<Z>,
    ) -> Vec<&Period> {
        self.store.periods_between(from, to)
    }

    pub fn next_transition<Z: TimeZone>(
        &self,
        now: &DateTime<Z>,
        transition: Transition,
        window: chrono::Duration,
    ) -> Option<DateTime<Tz>> {
        self.store.next_transition(now, transition, window)
    }

    pub fn current_state<Z: TimeZone>(&self, now: &DateTime<Z>) -> PowerState {
        self.store.current_state(now)
    }
}
