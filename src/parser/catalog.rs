//! Region and group directory parsing
//!
//! Both directories are plain lists of links. Links that do not point where
//! expected are ignored, and the first label seen for an identifier wins.

use scraper::Html;

use crate::crawler::SCHEDULE_PATH_MARKER;
use crate::models::{GroupCatalog, RegionCatalog, DEFAULT_REGION, DEFAULT_REGION_LABEL};
use crate::parser::sanitize::element_text;
use crate::parser::selectors::{GROUP_LINKS, REGION_LINKS};
use crate::utils::{extract_host, last_path_segment};

/// Domain every regional sub-site lives under
pub const PUBLISHER_DOMAIN: &str = "energy-ua.info";

/// Build the region catalog from the root directory page
///
/// The catalog always starts with the default region, which the root page
/// serves itself and therefore never links to.
pub fn parse_regions(html: &str) -> RegionCatalog {
    let document = Html::parse_document(html);

    let mut regions = RegionCatalog::new();
    regions.insert_if_absent(DEFAULT_REGION, DEFAULT_REGION_LABEL);

    for link in document.select(&REGION_LINKS) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !href.contains(PUBLISHER_DOMAIN) {
            continue;
        }
        let Some(host) = extract_host(href) else {
            continue;
        };

        let label = element_text(link);
        if !regions.insert_if_absent(host.as_str(), label) {
            tracing::trace!(host = %host, "Duplicate region link ignored");
        }
    }

    tracing::debug!(regions = regions.len(), "Parsed region catalog");
    regions
}

/// Build the group catalog from a region's page
pub fn parse_groups(html: &str) -> GroupCatalog {
    let document = Html::parse_document(html);

    let mut groups = GroupCatalog::new();

    for link in document.select(&GROUP_LINKS) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !href.contains(SCHEDULE_PATH_MARKER) {
            continue;
        }
        let Some(group) = last_path_segment(href) else {
            continue;
        };

        let label = element_text(link);
        if !groups.insert_if_absent(group, label) {
            tracing::trace!(group, "Duplicate group link ignored");
        }
    }

    tracing::debug!(groups = groups.len(), "Parsed group catalog");
    groups
}
