//! HTTP collaborator used to reach the marketplace.
//!
//! [`ChallengeClient`] is the seam: anything that can issue a GET, get past the
//! marketplace's anti-automation checks, and hand back status + body. The
//! production implementation is [`BrowserClient`].

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, SERVER};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::error::{FetchError, Result};

/// Status and body of a received response.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a GET and transparently passes any browser challenge the server presents.
pub trait ChallengeClient {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<RawResponse>;
}

/// `reqwest` client that presents itself as a desktop browser.
///
/// Keeps a cookie jar for the lifetime of the client so clearance cookies
/// handed out by the challenge layer are replayed on later requests.
#[derive(Clone)]
pub struct BrowserClient {
    client: Client,
}

impl BrowserClient {
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self { client })
    }
}

impl ChallengeClient for BrowserClient {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<RawResponse> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "response received");

        if !status.is_success() {
            if is_challenge(status, response.headers()) {
                warn!(url, status = status.as_u16(), "anti-bot challenge was not passed");
            }
            // Body is not read for failed responses
            return Ok(RawResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Whether a response carries the markers of an unsolved challenge page.
pub fn is_challenge(status: StatusCode, headers: &HeaderMap) -> bool {
    let mitigated = headers
        .get("cf-mitigated")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("challenge"));
    if mitigated {
        return true;
    }

    let from_cloudflare = headers
        .get(SERVER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("cloudflare"));

    from_cloudflare
        && matches!(
            status,
            StatusCode::FORBIDDEN | StatusCode::SERVICE_UNAVAILABLE
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use mockito::{Matcher, Server};

    fn limit_query() -> Vec<(&'static str, String)> {
        vec![("limit", "250".to_string())]
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/sell/release/1")
            .match_query(Matcher::UrlEncoded("limit".into(), "250".into()))
            .match_header("user-agent", DEFAULT_USER_AGENT)
            .with_status(200)
            .with_body("<html>listings</html>")
            .create_async()
            .await;

        let client = BrowserClient::from_config(&HttpConfig::default()).unwrap();
        let url = format!("{}/sell/release/1", server.url());
        let response = client.get(&url, &limit_query()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "<html>listings</html>");
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_failure_status_drops_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/sell/release/2")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_header("server", "cloudflare")
            .with_body("<html>Just a moment...</html>")
            .create_async()
            .await;

        let client = BrowserClient::from_config(&HttpConfig::default()).unwrap();
        let url = format!("{}/sell/release/2", server.url());
        let response = client.get(&url, &limit_query()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 503);
        assert!(response.body.is_empty());
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = BrowserClient::from_config(&HttpConfig {
            timeout_secs: 2,
            ..HttpConfig::default()
        })
        .unwrap();

        let err = client
            .get("http://127.0.0.1:1/sell/release/3", &limit_query())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[test]
    fn test_challenge_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_challenge(StatusCode::FORBIDDEN, &headers));

        headers.insert(SERVER, HeaderValue::from_static("cloudflare"));
        assert!(is_challenge(StatusCode::FORBIDDEN, &headers));
        assert!(is_challenge(StatusCode::SERVICE_UNAVAILABLE, &headers));
        assert!(!is_challenge(StatusCode::NOT_FOUND, &headers));

        let mut mitigated = HeaderMap::new();
        mitigated.insert("cf-mitigated", HeaderValue::from_static("challenge"));
        assert!(is_challenge(StatusCode::FORBIDDEN, &mitigated));
    }
}
