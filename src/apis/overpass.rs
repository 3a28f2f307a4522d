//! Overpass API client for OpenStreetMap data. Queries are posted to a
//! list of mirror base URLs tried in order, with a bounded retry loop and
//! a fixed sleep between attempts.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::config::OverpassConfig;
use crate::constants::OSM_SOURCE;
use crate::error::{Result, ScraperError};
use crate::normalize;
use crate::states;
use crate::types::{CampsiteFeature, CampsiteSource, RawRecord};

/// Continental US plus Alaska, as `south,west,north,east`.
const US_BBOX: &str = "24.0,-125.0,72.0,-66.0";

pub struct OverpassClient {
    client: reqwest::Client,
    mirrors: Vec<String>,
    max_attempts: u32,
    retry_delay: Duration,
    state_delay: Duration,
}

impl OverpassClient {
    pub fn new(config: &OverpassConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            mirrors: config.mirrors.clone(),
            max_attempts: config.retry_attempts,
            retry_delay: Duration::from_secs(config.retry_delay_secs),
            state_delay: Duration::from_millis(config.state_delay_ms),
        })
    }

    async fn post(&self, base_url: &str, query: &str) -> Result<Vec<Value>> {
        let url = format!("{}/api/interpreter", base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .form(&[("data", query)])
            .send()
            .await?
            .error_for_status()?;
        let data: Value = response.json().await?;
        Ok(data
            .get("elements")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    /// Run one query against the mirror list, retrying the whole list a
    /// fixed number of times with a fixed sleep in between.
    pub async fn run_query(&self, query: &str, what: &str) -> Result<Vec<Value>> {
        info!("Fetching {what} from OpenStreetMap");
        for attempt in 1..=self.max_attempts {
            for mirror in &self.mirrors {
                match self.post(mirror, query).await {
                    Ok(elements) => {
                        info!("Found {} {what}", elements.len());
                        return Ok(elements);
                    }
                    Err(e) => {
                        warn!("Attempt {attempt}/{} via {mirror} failed: {e}", self.max_attempts);
                    }
                }
            }
            if attempt < self.max_attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }
        Err(ScraperError::Api {
            message: format!("all Overpass mirrors failed fetching {what}"),
        })
    }
}

/// Campsites and caravan sites within a state bounding box.
pub fn campsite_query(bbox: &str) -> String {
    format!(
        r#"[out:json][timeout:60];
(
  node["tourism"~"camp_site|caravan_site"]({bbox});
  way["tourism"~"camp_site|caravan_site"]({bbox});
  relation["tourism"~"camp_site|caravan_site"]({bbox});
);
out center;"#
    )
}

/// Standalone sanitary dump stations plus campgrounds advertising dump
/// access, US-wide.
pub fn dump_station_query() -> String {
    format!(
        r#"[out:json][timeout:180];
(
  node["amenity"="sanitary_dump_station"]({US_BBOX});
  way["amenity"="sanitary_dump_station"]({US_BBOX});
  relation["amenity"="sanitary_dump_station"]({US_BBOX});
  node["tourism"="camp_site"]["sanitary_dump_station"~"yes|customers"]({US_BBOX});
  way["tourism"="camp_site"]["sanitary_dump_station"~"yes|customers"]({US_BBOX});
  node["tourism"="caravan_site"]["sanitary_dump_station"~"yes|customers"]({US_BBOX});
  way["tourism"="caravan_site"]["sanitary_dump_station"~"yes|customers"]({US_BBOX});
);
out body center;"#
    )
}

/// Propane fill stations, US-wide.
pub fn propane_query() -> String {
    format!(
        r#"[out:json][timeout:120];
(
  node["fuel"="lpg"]({US_BBOX});
  node["fuel:lpg"="yes"]({US_BBOX});
  way["fuel"="lpg"]({US_BBOX});
);
out body center;"#
    )
}

#[async_trait]
impl CampsiteSource for OverpassClient {
    fn source_name(&self) -> &'static str {
        OSM_SOURCE
    }

    fn state_delay(&self) -> Duration {
        self.state_delay
    }

    #[instrument(skip(self))]
    async fn fetch_state(&self, state: &str) -> Result<Vec<RawRecord>> {
        let bbox = states::bounds(state)
            .ok_or_else(|| ScraperError::UnknownState(state.to_string()))?;
        self.run_query(&campsite_query(bbox), &format!("{state} campsites"))
            .await
    }

    fn to_feature(&self, raw: &RawRecord, state: &str, seq: usize) -> Option<CampsiteFeature> {
        normalize::osm::campsite_feature(raw, state, seq)
    }
}
