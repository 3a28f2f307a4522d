//! Orchestration: drive a campsite source state by state, normalize each
//! record, persist region files wholesale and regenerate `index.json`.
//! Failures are scoped to the smallest unit of work; one bad state never
//! takes down a run.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::apis::overpass::{dump_station_query, propane_query, OverpassClient};
use crate::constants::{POI_FILE, RIDB_SOURCE};
use crate::error::Result;
use crate::normalize::osm::poi_feature;
use crate::states;
use crate::store;
use crate::types::{
    CampsiteSource, Feature, FeatureCollection, PoiFeature, PoiProperties, SiteType, StateCount,
};

/// Result of a complete fetch run across one source.
#[derive(Debug)]
pub struct FetchSummary {
    pub source: String,
    pub total_sites: usize,
    pub state_counts: Vec<StateCount>,
    pub errors: Vec<String>,
    pub index_path: Option<PathBuf>,
}

pub struct FetchPipeline;

impl FetchPipeline {
    /// Fetch, normalize and persist every requested state sequentially.
    /// Invalid codes are skipped with a warning; states yielding no usable
    /// features produce no file. `index.json` is rewritten at the end.
    #[instrument(skip(source, states, output_dir), fields(source = %source.source_name()))]
    pub async fn run(
        source: &dyn CampsiteSource,
        states: &[String],
        output_dir: &Path,
    ) -> Result<FetchSummary> {
        let source_name = source.source_name();
        let mut summary = FetchSummary {
            source: source_name.to_string(),
            total_sites: 0,
            state_counts: Vec::new(),
            errors: Vec::new(),
            index_path: None,
        };

        for state in states {
            if !states::is_valid_code(state) {
                warn!("Invalid state code {state}, skipping");
                continue;
            }

            println!("Processing {} ({state})", states::state_name(state).unwrap_or(state.as_str()));

            let raw_records = match source.fetch_state(state).await {
                Ok(records) => records,
                Err(e) => {
                    warn!("Fetch failed for {state}: {e}");
                    summary.errors.push(format!("{state}: {e}"));
                    continue;
                }
            };
            if raw_records.is_empty() {
                info!("No records found for {state}");
                continue;
            }

            let features = normalize_records(source, &raw_records, state);
            if features.is_empty() {
                info!("No valid campsites for {state} (all missing coordinates)");
                continue;
            }

            let collection = FeatureCollection::new(features);
            let count = collection.features.len();
            match store::write_region(output_dir, state, &collection) {
                Ok(path) => {
                    println!("  ✅ Saved {count} campsites to {}", path.display());
                    summary.total_sites += count;
                    summary.state_counts.push(StateCount {
                        state: state.clone(),
                        count,
                    });
                }
                Err(e) => {
                    warn!("Failed to write region file for {state}: {e}");
                    summary.errors.push(format!("{state}: {e}"));
                }
            }

            // Be nice to the upstream API between states
            let delay = source.state_delay();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        summary.index_path = Some(store::write_index(
            output_dir,
            source_name,
            summary.total_sites,
            summary.state_counts.clone(),
        )?);

        Ok(summary)
    }
}

/// Normalize raw records for a state. Sequence numbers are positional over
/// the emitted features, starting at 1; skipped records do not consume one.
fn normalize_records(
    source: &dyn CampsiteSource,
    raw_records: &[Value],
    state: &str,
) -> Vec<crate::types::CampsiteFeature> {
    let mut features = Vec::new();
    for raw in raw_records {
        let seq = features.len() + 1;
        if let Some(feature) = source.to_feature(raw, state, seq) {
            features.push(feature);
        }
    }
    features
}

/// Counts per POI category after an aggregation run.
#[derive(Debug)]
pub struct PoiSummary {
    pub water: usize,
    pub dump: usize,
    pub propane: usize,
    pub output_path: PathBuf,
}

impl PoiSummary {
    pub fn total(&self) -> usize {
        self.water + self.dump + self.propane
    }
}

/// Build the aggregated POI layer: water stations lifted out of existing
/// RIDB region files plus dump and propane stations from Overpass. A
/// failing Overpass category is logged and contributes nothing.
pub async fn run_poi_update(overpass: &OverpassClient, data_dir: &Path) -> Result<PoiSummary> {
    let campsites_dir = data_dir.join(crate::constants::CAMPSITES_DIR);
    let mut features = extract_water_stations(&campsites_dir)?;
    let water = features.len();

    let dump_elements = overpass
        .run_query(&dump_station_query(), "dump stations")
        .await
        .unwrap_or_else(|e| {
            warn!("Dump station fetch failed: {e}");
            Vec::new()
        });
    let dump = append_poi_features(&mut features, &dump_elements, SiteType::Dump);

    let propane_elements = overpass
        .run_query(&propane_query(), "propane stations")
        .await
        .unwrap_or_else(|e| {
            warn!("Propane station fetch failed: {e}");
            Vec::new()
        });
    let propane = append_poi_features(&mut features, &propane_elements, SiteType::Propane);

    let output_path = data_dir.join(POI_FILE);
    store::write_features(&output_path, features)?;

    Ok(PoiSummary {
        water,
        dump,
        propane,
        output_path,
    })
}

fn append_poi_features(features: &mut Vec<PoiFeature>, elements: &[Value], kind: SiteType) -> usize {
    let before = features.len();
    for element in elements {
        if let Some(feature) = poi_feature(element, kind) {
            features.push(feature);
        }
    }
    features.len() - before
}

/// Walk the RIDB region files and lift every feature advertising water
/// into a minimal water-station POI.
pub fn extract_water_stations(campsites_dir: &Path) -> Result<Vec<PoiFeature>> {
    let mut stations = Vec::new();
    if !campsites_dir.is_dir() {
        warn!("No campsite data at {}; skipping water extraction", campsites_dir.display());
        return Ok(stations);
    }

    info!("Extracting water stations from campsite data");
    let mut paths: Vec<PathBuf> = std::fs::read_dir(campsites_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "geojson"))
        .collect();
    paths.sort();

    for path in paths {
        let state = state_from_file_name(&path);
        let data = match store::load_geojson(&path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                continue;
            }
        };
        let Some(file_features) = data.get("features").and_then(Value::as_array) else {
            continue;
        };

        for feature in file_features {
            if !has_water_amenity(feature) {
                continue;
            }
            let Some(coords) = feature
                .get("geometry")
                .and_then(|g| g.get("coordinates"))
                .and_then(Value::as_array)
            else {
                continue;
            };
            let (Some(lon), Some(lat)) = (
                coords.first().and_then(Value::as_f64),
                coords.get(1).and_then(Value::as_f64),
            ) else {
                continue;
            };
            let name = feature
                .get("properties")
                .and_then(|p| p.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string();

            stations.push(Feature::point(
                lon,
                lat,
                PoiProperties {
                    name,
                    site_type: SiteType::Water,
                    state: state.clone(),
                    source: RIDB_SOURCE.to_string(),
                    osm_id: None,
                    access: None,
                    fee: None,
                    operator: None,
                },
            ));
        }
    }

    info!("Extracted {} water stations", stations.len());
    Ok(stations)
}

fn has_water_amenity(feature: &Value) -> bool {
    feature
        .get("properties")
        .and_then(|p| p.get("amenities"))
        .and_then(Value::as_array)
        .is_some_and(|amenities| amenities.iter().any(|a| a.as_str() == Some("water")))
}

/// Region code from a file name like `CA.geojson` or `CA(1).geojson`.
fn state_from_file_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .replace("(1)", "")
        .trim()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_from_file_name_variants() {
        assert_eq!(state_from_file_name(Path::new("data/campsites/CA.geojson")), "CA");
        assert_eq!(state_from_file_name(Path::new("wy(1).geojson")), "WY");
    }

    #[test]
    fn test_has_water_amenity() {
        let with = json!({"properties": {"amenities": ["toilets", "water"]}});
        let without = json!({"properties": {"amenities": ["toilets"]}});
        let none = json!({"properties": {}});
        assert!(has_water_amenity(&with));
        assert!(!has_water_amenity(&without));
        assert!(!has_water_amenity(&none));
    }
}
