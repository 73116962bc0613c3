//! HTTP client for the Comunica PJe API

use crate::court::normalize_case_number;
use crate::error::ComunicaError;
use crate::publication::{ApiEnvelope, Publication};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Public endpoint of the Comunica PJe API.
pub const DEFAULT_BASE_URL: &str = "https://comunicaapi.pje.jus.br/api/v1";

/// Maximum accepted by the API.
const ITEMS_PER_PAGE: u32 = 100;

const USER_AGENT: &str = concat!("tramita/", env!("CARGO_PKG_VERSION"));

/// Rate-limit counters surfaced by the API response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests left in the current window
    pub remaining: Option<u32>,
    /// Window size
    pub total: Option<u32>,
}

impl RateLimit {
    fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let parse = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u32>().ok())
        };

        let remaining = parse("x-ratelimit-remaining");
        let total = parse("x-ratelimit-limit");
        (remaining.is_some() || total.is_some()).then_some(RateLimit { remaining, total })
    }
}

/// Publications found for one case.
#[derive(Debug)]
pub struct QueryResult {
    /// Publications, newest first, capped at the requested maximum
    pub publications: Vec<Publication>,
    /// Total the API reported, which may exceed `publications.len()`
    pub total: u64,
    /// Rate-limit counters, when the API sent them
    pub rate_limit: Option<RateLimit>,
}

/// Client for the Comunica PJe API.
///
/// The API is public but rate limited; the client spaces its own calls
/// by at least the configured delay. The pacing timestamp is owned by
/// the instance, so independent clients (and test doubles) do not
/// interfere with each other.
pub struct ComunicaClient {
    base_url: String,
    client: reqwest::Client,
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl ComunicaClient {
    /// Create a client against `base_url` with the given request timeout
    /// and minimum delay between consecutive requests.
    pub fn new(base_url: impl Into<String>, timeout: Duration, delay: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("HTTP client construction failed - TLS misconfiguration");

        Self {
            base_url: base_url.into(),
            client,
            delay,
            last_request: Mutex::new(None),
        }
    }

    /// Sleep out whatever remains of the inter-request delay, then stamp
    /// the current call.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.delay {
                tokio::time::sleep(self.delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Query the publications of one case, in any number formatting.
    ///
    /// Returns at most `max_results` publications; `QueryResult::total`
    /// still carries the API's full count.
    pub async fn query_case(
        &self,
        case_number: &str,
        max_results: usize,
    ) -> Result<QueryResult, ComunicaError> {
        let number = normalize_case_number(case_number);
        let url = format!("{}/comunicacao", self.base_url);
        let per_page = ITEMS_PER_PAGE.to_string();

        self.pace().await;
        debug!(case = %number, "querying publications");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("numeroProcesso", number.as_str()),
                ("pagina", "1"),
                ("itensPorPagina", per_page.as_str()),
            ])
            .send()
            .await?;

        let rate_limit = RateLimit::from_headers(response.headers());

        match response.status() {
            StatusCode::OK => {
                let envelope: ApiEnvelope = response.json().await?;
                let total = envelope.count.unwrap_or(envelope.items.len() as u64);
                let publications = envelope
                    .items
                    .into_iter()
                    .take(max_results)
                    .map(Publication::from)
                    .collect();

                Ok(QueryResult {
                    publications,
                    total,
                    rate_limit,
                })
            }
            StatusCode::TOO_MANY_REQUESTS => Err(ComunicaError::RateLimited {
                total: rate_limit.and_then(|r| r.total),
            }),
            StatusCode::UNPROCESSABLE_ENTITY => Err(ComunicaError::InvalidQuery),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ComunicaError::Http {
                    status: status.as_u16(),
                    body: body.chars().take(200).collect(),
                })
            }
        }
    }

    /// List the courts the API covers. Used by the connectivity check.
    pub async fn list_courts(&self) -> Result<Vec<Value>, ComunicaError> {
        let url = format!("{}/comunicacao/tribunal", self.base_url);

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ComunicaError::Http {
                    status: status.as_u16(),
                    body: body.chars().take(200).collect(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn rate_limit_parses_present_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("17"));
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("60"));

        let rate = RateLimit::from_headers(&headers).unwrap();
        assert_eq!(rate.remaining, Some(17));
        assert_eq!(rate.total, Some(60));
    }

    #[test]
    fn rate_limit_absent_headers_is_none() {
        assert!(RateLimit::from_headers(&HeaderMap::new()).is_none());
    }

    #[tokio::test]
    async fn pacing_waits_between_calls() {
        let client = ComunicaClient::new(
            "http://unused.invalid",
            Duration::from_secs(1),
            Duration::from_millis(50),
        );

        let started = Instant::now();
        client.pace().await;
        client.pace().await;
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn pacing_state_is_per_instance() {
        let first = ComunicaClient::new(
            "http://unused.invalid",
            Duration::from_secs(1),
            Duration::from_millis(200),
        );
        let second = ComunicaClient::new(
            "http://unused.invalid",
            Duration::from_secs(1),
            Duration::from_millis(200),
        );

        first.pace().await;
        let started = Instant::now();
        second.pace().await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }
}
