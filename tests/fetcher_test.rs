//! Integration tests for PageFetcher using wiremock
//!
//! These tests validate the HTTP fetcher's behavior with mock servers.

use energyua::crawler::fetcher::PageFetcher;
use energyua::crawler::headers::DEFAULT_USER_AGENT;
use energyua::error::{Error, ErrorKind, FetchError};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test successful fetch from mock server
#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Черга 1.1</title></head>
<body><div class="periods_items"><span><b>08:00</b> - <b>12:00</b></span></div></body>
</html>"#;

    Mock::given(method("GET"))
        .and(path("/cherga/1-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::new().unwrap();
    let result = fetcher
        .fetch_page(&format!("{}/cherga/1-1", mock_server.uri()))
        .await;

    assert!(result.is_ok(), "Fetch should succeed: {:?}", result.err());
    let body = result.unwrap();
    assert!(body.contains("Черга 1.1"));
    assert!(body.contains("periods_items"));
}

/// Test that the browser user agent is sent
#[tokio::test]
async fn test_user_agent_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::new().unwrap();
    let result = fetcher.fetch_page(&mock_server.uri()).await;

    assert!(result.is_ok(), "Request with the default user agent should match");
}

/// Test that a configured user agent replaces the default
#[tokio::test]
async fn test_custom_user_agent_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", "energyua-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::with_config("energyua-test/1.0", Duration::from_secs(5)).unwrap();
    assert!(fetcher.fetch_page(&mock_server.uri()).await.is_ok());
}

/// Test Ukrainian-first Accept-Language
#[tokio::test]
async fn test_accept_language_ukrainian() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header(
            "accept-language",
            "uk-UA,uk;q=0.9,en-US;q=0.8,en;q=0.7",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::new().unwrap();
    assert!(fetcher.fetch_page(&mock_server.uri()).await.is_ok());
}

/// Test 404 is a single request classified as a communication failure
#[tokio::test]
async fn test_404_is_communication_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cherga/9-9"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1) // Should only be called once (no retry)
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::new().unwrap();
    let err = fetcher
        .fetch_page(&format!("{}/cherga/9-9", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status(404)));
    let err: Error = err.into();
    assert_eq!(err.kind(), ErrorKind::Communication);
}

/// Test server errors are not retried
#[tokio::test]
async fn test_server_error_no_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::new().unwrap();
    let err = fetcher.fetch_page(&mock_server.uri()).await.unwrap_err();

    assert!(matches!(err, FetchError::Status(503)));
}

/// Test that a slow response hits the total timeout
#[tokio::test]
async fn test_timeout_is_communication_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::with_config(DEFAULT_USER_AGENT, Duration::from_millis(200)).unwrap();
    let err = fetcher.fetch_page(&mock_server.uri()).await.unwrap_err();

    assert!(matches!(err, FetchError::Timeout), "Expected timeout, got {err:?}");
    let err: Error = err.into();
    assert!(err.is_recoverable());
}

/// Test refused connections
#[tokio::test]
async fn test_connection_refused() {
    // Bind and drop a listener so the port is known to be closed
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let fetcher = PageFetcher::with_config(DEFAULT_USER_AGENT, Duration::from_secs(2)).unwrap();
    let err = fetcher.fetch_page(&uri).await.unwrap_err();

    assert!(
        matches!(err, FetchError::Connect(_)),
        "Expected a connect error, got {err:?}"
    );
    assert!(err.is_network());
}

/// Test windows-1251 bodies declared in Content-Type
#[tokio::test]
async fn test_windows_1251_decoding() {
    let mock_server = MockServer::start().await;
    let (body, _, _) = encoding_rs::WINDOWS_1251.encode("<a>Київська</a>");

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.into_owned(), "text/html; charset=windows-1251"),
        )
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::new().unwrap();
    let decoded = fetcher.fetch_page(&mock_server.uri()).await.unwrap();

    assert_eq!(decoded, "<a>Київська</a>");
}

/// Test windows-1251 bodies without any declared charset
#[tokio::test]
async fn test_windows_1251_fallback() {
    let mock_server = MockServer::start().await;
    let (body, _, _) = encoding_rs::WINDOWS_1251.encode("Черга 1.1");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.into_owned()))
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::new().unwrap();
    let decoded = fetcher.fetch_page(&mock_server.uri()).await.unwrap();

    assert_eq!(decoded, "Черга 1.1");
}
