//! HTTP page fetcher with charset detection
//!
//! Performs exactly one GET per call with a bounded total timeout and a fixed
//! browser identification. There is no retry loop: a failed poll is simply
//! repeated by whoever drives the client on its next interval.

use crate::config::ClientConfig;
use crate::crawler::headers::{build_page_headers, DEFAULT_USER_AGENT};
use crate::crawler::PageSource;
use crate::utils::error::FetchError;
use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1251};
use reqwest::{header::HeaderMap, Client, Response};
use std::time::Duration;

/// Total request timeout used by the publisher integration
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetcher for energy-ua.info pages
pub struct PageFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Headers attached to every request
    headers: HeaderMap,
}

impl PageFetcher {
    /// Create a fetcher with the default user agent and 10 second timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the HTTP client cannot be created
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom user agent and timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the HTTP client cannot be created
    pub fn with_config(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            headers: build_page_headers(user_agent),
        })
    }

    /// Create a fetcher from the client section of the configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the HTTP client cannot be created
    pub fn from_config(config: &ClientConfig) -> Result<Self, FetchError> {
        Self::with_config(&config.user_agent, config.request_timeout())
    }

    /// Fetch a page and return its decoded markup
    ///
    /// # Errors
    ///
    /// - `FetchError::Timeout` when the total timeout elapses
    /// - `FetchError::Connect` on refused connections or DNS failures
    /// - `FetchError::Status` on any non-2xx response
    /// - `FetchError::Decode` when the body cannot be turned into text
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        tracing::trace!(url, "Fetching page");

        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "Page request rejected");
            return Err(FetchError::Status(status.as_u16()));
        }

        self.decode_response(response).await
    }

    /// Decode response body using the declared or sniffed charset
    async fn decode_response(&self, response: Response) -> Result<String, FetchError> {
        // Owned copy, the response is consumed below
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let bytes = response.bytes().await.map_err(FetchError::from_reqwest)?;

        self.decode_bytes(&bytes, &content_type)
    }

    /// Decode bytes to a UTF-8 string
    ///
    /// Strategy:
    /// 1. Charset declared in the Content-Type header
    /// 2. UTF-8
    /// 3. `<meta charset>` in the first kilobyte
    /// 4. windows-1251, the legacy Cyrillic encoding
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Decode` if the declared charset is unknown or the
    /// bytes are invalid in it
    pub fn decode_bytes(&self, bytes: &[u8], content_type: &str) -> Result<String, FetchError> {
        if let Some(label) = charset_label(content_type) {
            let encoding = Encoding::for_label(label.as_bytes())
                .ok_or_else(|| FetchError::Decode(format!("Unknown charset: {label}")))?;
            return decode_with(encoding, bytes);
        }

        if let Ok(text) = decode_with(UTF_8, bytes) {
            return Ok(text);
        }

        let head = String::from_utf8_lossy(&bytes[..bytes.len().min(1024)]).to_lowercase();
        if let Some(encoding) = charset_label(&head).and_then(|l| Encoding::for_label(l.as_bytes()))
        {
            if let Ok(text) = decode_with(encoding, bytes) {
                return Ok(text);
            }
        }

        decode_with(WINDOWS_1251, bytes)
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.fetch_page(url).await
    }
}

/// Find a `charset=` value in a header or markup snippet
fn charset_label(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let start = lower.find("charset=")? + "charset=".len();
    let label: String = lower[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();

    (!label.is_empty()).then_some(label)
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> Result<String, FetchError> {
    let (cow, _encoding, had_errors) = encoding.decode(bytes);

    if had_errors {
        return Err(FetchError::Decode(format!(
            "{} decoding errors",
            encoding.name()
        )));
    }

    Ok(cow.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    // "Київ" in windows-1251
    const KYIV_CP1251: &[u8] = &[0xca, 0xe8, 0xbf, 0xe2];

    #[test]
    fn test_decode_utf8() {
        let fetcher = PageFetcher::new().unwrap();

        let text = "Графік відключень 08:00";
        let decoded = fetcher.decode_bytes(text.as_bytes(), "text/html; charset=utf-8");

        assert_eq!(decoded.unwrap(), text);
    }

    #[test]
    fn test_decode_declared_windows_1251() {
        let fetcher = PageFetcher::new().unwrap();

        let decoded = fetcher.decode_bytes(KYIV_CP1251, "text/html; charset=windows-1251");

        assert_eq!(decoded.unwrap(), "Київ");
    }

    #[test]
    fn test_decode_windows_1251_fallback() {
        let fetcher = PageFetcher::new().unwrap();

        let decoded = fetcher.decode_bytes(KYIV_CP1251, "text/html");

        assert_eq!(decoded.unwrap(), "Київ");
    }

    #[test]
    fn test_decode_invalid_declared_utf8() {
        let fetcher = PageFetcher::new().unwrap();

        let decoded = fetcher.decode_bytes(KYIV_CP1251, "text/html; charset=utf-8");

        assert!(matches!(decoded, Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_decode_unknown_charset() {
        let fetcher = PageFetcher::new().unwrap();

        let decoded = fetcher.decode_bytes(b"hello", "text/html; charset=klingon");

        assert!(matches!(decoded, Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_charset_label() {
        assert_eq!(
            charset_label("text/html; charset=UTF-8").as_deref(),
            Some("utf-8")
        );
        assert_eq!(
            charset_label(r#"<meta charset="windows-1251">"#).as_deref(),
            Some("windows-1251")
        );
        assert_eq!(charset_label("text/html"), None);
    }

    #[test]
    fn test_fetcher_creation() {
        assert!(PageFetcher::new().is_ok());
        assert!(PageFetcher::with_config("energyua-test", Duration::from_secs(1)).is_ok());
    }
}
