//! Backend client for weather text and nearby recommendations.
//!
//! One request per call. No retries, caching, or deduplication happen here;
//! the coordinator decides which responses still matter.

mod error;
mod user_agent;

pub use error::FetchError;
pub use user_agent::{resolve_user_agent, USER_AGENT};

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::models::{Coordinate, LanguageCode, RecommendationResult};

/// Path of the recommendation endpoint, relative to the backend base URL.
pub const ENDPOINT_PATH: &str = "get_weather_and_places";

/// Anything that can answer a recommendation request.
#[async_trait]
pub trait RecommendationSource: Send + Sync + 'static {
    async fn fetch(
        &self,
        coordinate: Coordinate,
        language: LanguageCode,
    ) -> Result<RecommendationResult, FetchError>;
}

/// HTTP client for the recommendation backend.
#[derive(Clone)]
pub struct RecommendationClient {
    client: Client,
    base_url: Url,
}

impl RecommendationClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        user_agent: Option<&str>,
    ) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::FetchFailed(format!("invalid backend URL {}: {}", base_url, e)))?;
        let client = Client::builder()
            .user_agent(resolve_user_agent(user_agent))
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the request URL for a coordinate and language.
    pub fn request_url(&self, coordinate: Coordinate, language: LanguageCode) -> Result<Url, FetchError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut url = base
            .join(ENDPOINT_PATH)
            .map_err(|e| FetchError::FetchFailed(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("lat", &coordinate.lat().to_string())
            .append_pair("lon", &coordinate.lon().to_string())
            .append_pair("target_lang", language.as_str());
        Ok(url)
    }
}

/// Decode a response body into a result.
///
/// Non-JSON bodies are transport-level failures; JSON that breaks the
/// contract is a malformed response.
pub fn decode_body(body: &[u8]) -> Result<RecommendationResult, FetchError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| FetchError::FetchFailed(format!("response is not JSON: {}", e)))?;
    serde_json::from_value(value).map_err(|e| FetchError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl RecommendationSource for RecommendationClient {
    async fn fetch(
        &self,
        coordinate: Coordinate,
        language: LanguageCode,
    ) -> Result<RecommendationResult, FetchError> {
        let url = self.request_url(coordinate, language)?;
        debug!("GET {}", url);

        let start = Instant::now();
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        debug!(
            "Backend answered {} in {}ms ({} bytes)",
            status,
            start.elapsed().as_millis(),
            body.len()
        );

        if !status.is_success() {
            let detail = decode_body(&body)
                .map(|r| r.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(FetchError::FetchFailed(format!("HTTP {}: {}", status, detail)));
        }

        decode_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> RecommendationClient {
        RecommendationClient::new(base, Duration::from_secs(1), None).unwrap()
    }

    #[test]
    fn test_request_url() {
        let coordinate = Coordinate::new(37.5, 127.03).unwrap();
        let url = client("http://127.0.0.1:5000")
            .request_url(coordinate, LanguageCode::En)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5000/get_weather_and_places?lat=37.5&lon=127.03&target_lang=EN"
        );
    }

    #[test]
    fn test_request_url_keeps_base_path() {
        let coordinate = Coordinate::new(-1.25, 2.0).unwrap();
        let url = client("https://example.com/api")
            .request_url(coordinate, LanguageCode::Ko)
            .unwrap();
        assert_eq!(url.path(), "/api/get_weather_and_places");
        assert_eq!(url.query(), Some("lat=-1.25&lon=2&target_lang=KO"));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = RecommendationClient::new("not a url", Duration::from_secs(1), None)
            .err()
            .unwrap();
        assert!(matches!(err, FetchError::FetchFailed(_)));
    }

    #[test]
    fn test_decode_body() {
        let ok = decode_body(br#"{"message":"Clear","places":[]}"#).unwrap();
        assert_eq!(ok.message, "Clear");

        assert!(matches!(
            decode_body(b"<html>502</html>"),
            Err(FetchError::FetchFailed(_))
        ));
        assert!(matches!(
            decode_body(br#"{"attractions":[]}"#),
            Err(FetchError::MalformedResponse(_))
        ));
        assert!(matches!(
            decode_body(br#"{"message":"m","places":"none"}"#),
            Err(FetchError::MalformedResponse(_))
        ));
    }
}
