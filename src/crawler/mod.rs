//! Page retrieval for the publisher's directory and schedule pages
//!
//! [`PageSource`] is the seam between the schedule client and the network;
//! [`fetcher::PageFetcher`] is the HTTP implementation and [`Endpoints`]
//! knows where each page lives.

pub mod fetcher;
pub mod headers;

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::utils::error::FetchError;

pub use fetcher::PageFetcher;

/// Path segment that marks schedule links and pages
pub const SCHEDULE_PATH_MARKER: &str = "cherga";

/// Something that can turn a URL into page markup
///
/// Implementations must issue at most one request per call and never accept
/// a partial body.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for std::sync::Arc<T> {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}

/// URL layout of the publisher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    scheme: String,
    publisher_root: String,
}

impl Endpoints {
    pub fn new(scheme: impl Into<String>, publisher_root: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            publisher_root: publisher_root.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.scheme, &config.publisher_root)
    }

    /// Root directory page listing all regions
    pub fn regions_url(&self) -> String {
        format!("{}://{}", self.scheme, self.publisher_root)
    }

    /// Region page listing its groups
    pub fn groups_url(&self, region: &str) -> String {
        format!("{}://{}", self.scheme, region)
    }

    /// Schedule page of one group
    pub fn schedule_url(&self, region: &str, group: &str) -> String {
        format!("{}://{}/{SCHEDULE_PATH_MARKER}/{}", self.scheme, region, group)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new("https", crate::models::DEFAULT_REGION)
    }
}
