// Core data structures for the outage schedule client

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timezone every schedule published by energy-ua.info is expressed in
pub const REGIONAL_TZ: Tz = chrono_tz::Europe::Kyiv;

/// Current instant in regional time
pub fn regional_now() -> DateTime<Tz> {
    chrono::Utc::now().with_timezone(&REGIONAL_TZ)
}

/// Region the publisher root page itself serves
pub const DEFAULT_REGION: &str = "energy-ua.info";

/// Label of [`DEFAULT_REGION`]; the root page does not list itself
pub const DEFAULT_REGION_LABEL: &str = "Полтавська";

/// One selectable region or group: identifier plus display label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub identifier: String,
    pub label: String,
}

impl CatalogEntry {
    pub fn new(identifier: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            label: label.into(),
        }
    }
}

/// Insertion-ordered identifier → label mapping
///
/// Built once per discovery call and never patched afterwards. The first
/// entry seen for an identifier wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

/// Regions keyed by host
pub type RegionCatalog = Catalog;

/// Groups of the selected region keyed by schedule path segment
pub type GroupCatalog = Catalog;

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the identifier is already present
    ///
    /// Returns `true` if the entry was added.
    pub fn insert_if_absent(
        &mut self,
        identifier: impl Into<String>,
        label: impl Into<String>,
    ) -> bool {
        let identifier = identifier.into();
        if self.contains(&identifier) {
            return false;
        }
        self.entries.push(CatalogEntry::new(identifier, label));
        true
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entry(identifier).is_some()
    }

    /// Label for an identifier
    pub fn label(&self, identifier: &str) -> Option<&str> {
        self.entry(identifier).map(|e| e.label.as_str())
    }

    /// Full record for an identifier
    pub fn entry(&self, identifier: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.identifier == identifier)
    }

    /// First record carrying the given label
    pub fn by_label(&self, label: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A single contiguous outage window in regional time
///
/// `end > start` always holds; the fields are private so the invariant
/// cannot be broken after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl Period {
    /// Create a period, rejecting empty or inverted windows
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Inclusive at both boundaries
    pub fn contains<Z: TimeZone>(&self, at: &DateTime<Z>) -> bool {
        self.start <= *at && *at <= self.end
    }

    /// Inclusive overlap: touching the range at an endpoint counts
    pub fn overlaps<Z: TimeZone>(&self, from: &DateTime<Z>, to: &DateTime<Z>) -> bool {
        self.start <= *to && self.end >= *from
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Power availability at an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    Normal,
    Outage,
}

impl PowerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Outage => "outage",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which region/group the client is pointed at
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ClientState {
    #[default]
    Unconfigured,
    RegionOnly {
        region: String,
    },
    Configured {
        region: String,
        group: String,
    },
}

impl ClientState {
    /// Build from optional parts; a group without a region is discarded
    pub fn from_parts(region: Option<String>, group: Option<String>) -> Self {
        match (region, group) {
            (Some(region), Some(group)) => Self::Configured { region, group },
            (Some(region), None) => Self::RegionOnly { region },
            (None, _) => Self::Unconfigured,
        }
    }

    pub fn region(&self) -> Option<&str> {
        match self {
            Self::Unconfigured => None,
            Self::RegionOnly { region } | Self::Configured { region, .. } => Some(region),
        }
    }

    pub fn group(&self) -> Option<&str> {
        match self {
            Self::Configured { group, .. } => Some(group),
            _ => None,
        }
    }
}

/// Calendar-style view of a [`Period`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutageEvent {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    /// Localized event title supplied by the caller
    pub summary: String,
    /// `"<region label> <group label>"`
    pub description: String,
}
