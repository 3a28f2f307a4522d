use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Raw upstream record as returned by the source APIs
pub type RawRecord = serde_json::Value;

/// Campsite/POI categories in the canonical schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    Established,
    Dispersed,
    Backcountry,
    Water,
    Dump,
    Propane,
}

/// Access-road surface estimate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadDifficulty {
    #[default]
    Paved,
    Gravel,
    Dirt,
}

/// Closed amenity vocabulary derived from upstream descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Toilets,
    Water,
    Showers,
    FireRings,
    PicnicTables,
    Trash,
}

/// Rig kinds a site can accommodate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RigType {
    #[serde(rename = "tent")]
    Tent,
    #[serde(rename = "RV")]
    Rv,
    #[serde(rename = "trailer")]
    Trailer,
}

/// GeoJSON Point geometry, coordinates as `[longitude, latitude]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            geometry_type: "Point".to_string(),
            coordinates: [lon, lat],
        }
    }
}

/// A GeoJSON Feature with typed properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature<P> {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub geometry: PointGeometry,
    pub properties: P,
}

impl<P> Feature<P> {
    /// Point feature at `[lon, lat]`
    pub fn point(lon: f64, lat: f64, properties: P) -> Self {
        Self {
            feature_type: "Feature".to_string(),
            geometry: PointGeometry::new(lon, lat),
            properties,
        }
    }
}

/// A GeoJSON FeatureCollection with typed properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection<P> {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub features: Vec<Feature<P>>,
}

impl<P> FeatureCollection<P> {
    pub fn new(features: Vec<Feature<P>>) -> Self {
        Self {
            collection_type: "FeatureCollection".to_string(),
            features,
        }
    }
}

/// Canonical property schema shared by every campsite source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteProperties {
    /// Region code plus zero-padded sequence number, e.g. `CA-007`.
    /// Positional, not content-derived; unique only within a region file.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub site_type: SiteType,
    /// Estimated cost per night in whole US dollars
    pub cost: u32,
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews_count: u32,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default)]
    pub rig_friendly: Vec<RigType>,
    #[serde(default)]
    pub road_difficulty: RoadDifficulty,
    pub state: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campflare_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Property schema of the aggregated POI layer (water/dump/propane)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiProperties {
    pub name: String,
    #[serde(rename = "type")]
    pub site_type: SiteType,
    /// Two-letter code when known, empty when the upstream record has none
    pub state: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

pub type CampsiteFeature = Feature<SiteProperties>;
pub type PoiFeature = Feature<PoiProperties>;

/// Per-state count entry for `index.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateCount {
    pub state: String,
    pub count: usize,
}

/// Aggregate record written next to the region files after a fetch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataIndex {
    pub generated: String,
    pub total_sites: usize,
    pub states: Vec<StateCount>,
    pub source: String,
    pub version: String,
}

/// Core trait every campsite data source implements
#[async_trait::async_trait]
pub trait CampsiteSource: Send + Sync {
    /// Provenance tag written into the `source` property
    fn source_name(&self) -> &'static str;

    /// Fixed delay inserted between consecutive per-state requests
    fn state_delay(&self) -> Duration {
        Duration::ZERO
    }

    /// Fetch all raw records for one state
    async fn fetch_state(&self, state: &str) -> Result<Vec<RawRecord>>;

    /// Map one raw record to a canonical feature; `None` skips the record
    fn to_feature(&self, raw: &RawRecord, state: &str, seq: usize) -> Option<CampsiteFeature>;
}
