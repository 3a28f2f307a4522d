use std::fs;

use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::tempdir;

use kamptrail_scraper::error::{Result, ScraperError};
use kamptrail_scraper::normalize;
use kamptrail_scraper::pipeline::{extract_water_stations, FetchPipeline};
use kamptrail_scraper::types::{CampsiteFeature, CampsiteSource, RawRecord};

/// Canned source: returns fixture facilities for CA, errors for NV, and
/// nothing anywhere else.
struct FixtureSource;

#[async_trait]
impl CampsiteSource for FixtureSource {
    fn source_name(&self) -> &'static str {
        "recreation.gov"
    }

    async fn fetch_state(&self, state: &str) -> Result<Vec<RawRecord>> {
        match state {
            "CA" => Ok(vec![
                json!({
                    "FacilityID": "1001",
                    "FacilityName": "Lone Pine Campground",
                    "FacilityTypeDescription": "Campground",
                    "FacilityDescription": "Toilets and potable water.",
                    "FacilityUseFeeDescription": "$25 per night",
                    "FacilityLatitude": 36.601,
                    "FacilityLongitude": -118.062
                }),
                // No coordinates: silently skipped, consumes no sequence number
                json!({"FacilityID": "1002", "FacilityName": "Ghost Facility"}),
                json!({
                    "FacilityID": "1003",
                    "FacilityName": "Whitney Portal",
                    "FacilityTypeDescription": "Campground",
                    "FacilityLatitude": 36.587,
                    "FacilityLongitude": -118.24
                }),
            ]),
            "NV" => Err(ScraperError::Api {
                message: "upstream timeout".to_string(),
            }),
            _ => Ok(Vec::new()),
        }
    }

    fn to_feature(&self, raw: &RawRecord, state: &str, seq: usize) -> Option<CampsiteFeature> {
        normalize::ridb::to_feature(raw, state, seq)
    }
}

#[tokio::test]
async fn test_pipeline_writes_region_files_and_index() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let states = vec!["CA".to_string(), "NV".to_string(), "XX".to_string(), "WY".to_string()];

    let summary = FetchPipeline::run(&FixtureSource, &states, dir.path()).await?;

    // One state produced data, one errored, one was invalid, one was empty
    assert_eq!(summary.total_sites, 2);
    assert_eq!(summary.state_counts.len(), 1);
    assert_eq!(summary.state_counts[0].state, "CA");
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].starts_with("NV:"));

    // Region file holds the two normalized features with positional ids
    let region: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("CA.geojson")).unwrap()).unwrap();
    let features = region["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["properties"]["id"], "CA-001");
    assert_eq!(features[0]["properties"]["cost"], 25);
    assert_eq!(features[1]["properties"]["id"], "CA-002");
    assert_eq!(features[1]["properties"]["name"], "Whitney Portal");

    // No files for the silent states
    assert!(!dir.path().join("WY.geojson").exists());
    assert!(!dir.path().join("NV.geojson").exists());

    // Index reflects the run
    let index: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("index.json")).unwrap()).unwrap();
    assert_eq!(index["total_sites"], 2);
    assert_eq!(index["source"], "recreation.gov");
    assert_eq!(index["states"][0]["state"], "CA");
    assert_eq!(index["states"][0]["count"], 2);
    Ok(())
}

#[test]
fn test_water_stations_lifted_from_region_files() {
    let dir = tempdir().unwrap();
    let campsites = dir.path().join("campsites");
    fs::create_dir_all(&campsites).unwrap();
    let collection = json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-110.7, 43.8]},
                "properties": {"name": "Jenny Lake", "amenities": ["toilets", "water"]}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-110.8, 43.9]},
                "properties": {"name": "Dry Camp", "amenities": ["toilets"]}
            }
        ]
    });
    fs::write(campsites.join("WY.geojson"), serde_json::to_string(&collection).unwrap()).unwrap();

    let stations = extract_water_stations(&campsites).unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].properties.name, "Jenny Lake");
    assert_eq!(stations[0].properties.state, "WY");
    assert_eq!(stations[0].properties.source, "recreation.gov");
    assert_eq!(stations[0].geometry.coordinates, [-110.7, 43.8]);
}

#[tokio::test]
async fn test_pipeline_output_satisfies_coordinate_invariants() {
    let dir = tempdir().unwrap();
    let summary = FetchPipeline::run(&FixtureSource, &["CA".to_string()], dir.path())
        .await
        .unwrap();
    assert_eq!(summary.total_sites, 2);

    let region: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("CA.geojson")).unwrap()).unwrap();
    for feature in region["features"].as_array().unwrap() {
        let coords = feature["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(coords.len(), 2);
        let lon = coords[0].as_f64().unwrap();
        let lat = coords[1].as_f64().unwrap();
        assert!((-180.0..=180.0).contains(&lon));
        assert!((-90.0..=90.0).contains(&lat));
    }
}
