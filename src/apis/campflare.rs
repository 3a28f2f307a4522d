//! Campflare API client. The campground listing endpoint differs between
//! deployments, so an ordered list of candidate request templates is tried
//! per state, short-circuiting on the first that yields records.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::CampflareConfig;
use crate::constants::CAMPFLARE_SOURCE;
use crate::error::{Result, ScraperError};
use crate::normalize;
use crate::types::{CampsiteFeature, CampsiteSource, RawRecord};

/// Candidate endpoint templates, most likely first. `{state}` is replaced
/// with the two-letter code.
const ENDPOINT_CANDIDATES: &[&str] = &[
    "/campgrounds?state={state}",
    "/search?state={state}",
    "/campgrounds/state/{state}",
    "/campground?state={state}",
];

pub struct CampflareClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    state_delay: Duration,
}

impl CampflareClient {
    pub fn new(api_key: String, config: &CampflareConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            state_delay: Duration::from_millis(config.state_delay_ms),
        })
    }

    /// Validate the API key against the ping endpoint. A failure here
    /// aborts the whole fetch run; everything downstream would 401 anyway.
    pub async fn verify_connection(&self) -> Result<()> {
        let url = format!("{}/ping", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .header("authorization", &self.api_key)
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {
                let body: Value = response.json().await?;
                if body.get("ping").and_then(Value::as_str) == Some("pong") {
                    info!("API key validated successfully");
                    Ok(())
                } else {
                    Err(ScraperError::Api {
                        message: "unexpected ping response body".to_string(),
                    })
                }
            }
            401 => Err(ScraperError::Api {
                message: "API key is invalid or unauthorized".to_string(),
            }),
            status => Err(ScraperError::Api {
                message: format!("unexpected ping response: HTTP {status}"),
            }),
        }
    }

    async fn try_endpoint(&self, endpoint: &str) -> Result<EndpointOutcome> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .header("authorization", &self.api_key)
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {
                let body: Value = response.json().await?;
                let records = extract_records(body);
                if records.is_empty() {
                    Ok(EndpointOutcome::NoData)
                } else {
                    Ok(EndpointOutcome::Records(records))
                }
            }
            404 => Ok(EndpointOutcome::NoData),
            401 => Ok(EndpointOutcome::Unauthorized),
            status => Err(ScraperError::Api {
                message: format!("HTTP {status}"),
            }),
        }
    }
}

enum EndpointOutcome {
    Records(Vec<Value>),
    NoData,
    Unauthorized,
}

/// The listing may be a bare array or an object wrapping it under one of a
/// few known keys.
fn extract_records(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(map) => ["campgrounds", "results", "data", "items"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array).cloned())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[async_trait]
impl CampsiteSource for CampflareClient {
    fn source_name(&self) -> &'static str {
        CAMPFLARE_SOURCE
    }

    fn state_delay(&self) -> Duration {
        self.state_delay
    }

    /// Walk the endpoint candidates in order; 404 and error responses move
    /// on to the next candidate, 401 gives up on the state (no data, not
    /// fatal). No candidate working means no data for this state.
    #[instrument(skip(self))]
    async fn fetch_state(&self, state: &str) -> Result<Vec<RawRecord>> {
        for template in ENDPOINT_CANDIDATES {
            let endpoint = template.replace("{state}", state);
            debug!("Trying endpoint {endpoint}");
            match self.try_endpoint(&endpoint).await {
                Ok(EndpointOutcome::Records(records)) => {
                    info!("Found {} campgrounds for {state} via {endpoint}", records.len());
                    return Ok(records);
                }
                Ok(EndpointOutcome::NoData) => continue,
                Ok(EndpointOutcome::Unauthorized) => {
                    warn!("Unauthorized for {state}; treating as no data");
                    return Ok(Vec::new());
                }
                Err(e) => {
                    warn!("Endpoint {endpoint} failed: {e}");
                    continue;
                }
            }
        }
        warn!("No working campground endpoint for {state}");
        Ok(Vec::new())
    }

    fn to_feature(&self, raw: &RawRecord, state: &str, seq: usize) -> Option<CampsiteFeature> {
        normalize::campflare::to_feature(raw, state, seq)
    }
}
