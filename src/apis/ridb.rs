//! Recreation.gov RIDB API client. Facilities are paginated via
//! offset+limit with a fixed delay between pages to stay inside the
//! 50 requests/minute budget.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::RidbConfig;
use crate::constants::{CAMPING_ACTIVITY_ID, RIDB_SOURCE};
use crate::error::Result;
use crate::normalize;
use crate::types::{CampsiteFeature, CampsiteSource, RawRecord};

pub struct RidbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    page_limit: u32,
    page_delay: Duration,
}

impl RidbClient {
    pub fn new(api_key: String, config: &RidbConfig, page_limit: u32) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            page_limit,
            page_delay: Duration::from_millis(config.page_delay_ms),
        })
    }

    async fn fetch_page(&self, state: &str, offset: u32) -> Result<Vec<Value>> {
        let url = format!("{}/facilities", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .query(&[
                ("state", state.to_string()),
                ("activity", CAMPING_ACTIVITY_ID.to_string()),
                ("limit", self.page_limit.to_string()),
                ("offset", offset.to_string()),
                ("full", "true".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: Value = response.json().await?;
        Ok(data
            .get("RECDATA")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl CampsiteSource for RidbClient {
    fn source_name(&self) -> &'static str {
        RIDB_SOURCE
    }

    /// Pull every facility page for a state. A failing page ends the
    /// pagination but keeps what was already fetched.
    #[instrument(skip(self))]
    async fn fetch_state(&self, state: &str) -> Result<Vec<RawRecord>> {
        let mut facilities = Vec::new();
        let mut offset = 0;

        info!("Fetching facilities for {state}");
        loop {
            let batch = match self.fetch_page(state, offset).await {
                Ok(batch) => batch,
                Err(e) => {
                    warn!("Error fetching facilities for {state} at offset {offset}: {e}");
                    break;
                }
            };
            if batch.is_empty() {
                break;
            }

            let batch_len = batch.len();
            facilities.extend(batch);
            debug!("Fetched {batch_len} facilities (total: {})", facilities.len());

            if batch_len < self.page_limit as usize {
                break;
            }
            offset += self.page_limit;
            tokio::time::sleep(self.page_delay).await;
        }

        Ok(facilities)
    }

    fn to_feature(&self, raw: &RawRecord, state: &str, seq: usize) -> Option<CampsiteFeature> {
        normalize::ridb::to_feature(raw, state, seq)
    }
}
