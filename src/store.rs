//! On-disk persistence for region files and the per-run `index.json`.
//! Region files are always written wholesale; there are no partial or
//! streaming writes.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::constants::DATA_VERSION;
use crate::error::Result;
use crate::types::{DataIndex, Feature, FeatureCollection, StateCount};

/// Write one region's FeatureCollection to `{STATE}.geojson` under `dir`,
/// creating the directory as needed.
pub fn write_region<P: Serialize>(
    dir: &Path,
    state: &str,
    collection: &FeatureCollection<P>,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{state}.geojson"));
    fs::write(&path, serde_json::to_string_pretty(collection)?)?;
    Ok(path)
}

/// Write an arbitrary feature list (the POI layer) to `path`.
pub fn write_features<P: Serialize>(path: &Path, features: Vec<Feature<P>>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let collection = FeatureCollection::new(features);
    fs::write(path, serde_json::to_string_pretty(&collection)?)?;
    Ok(())
}

/// Write `index.json` summarizing a fetch run.
pub fn write_index(
    dir: &Path,
    source: &str,
    total_sites: usize,
    states: Vec<StateCount>,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let index = DataIndex {
        generated: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        total_sites,
        states,
        source: source.to_string(),
        version: DATA_VERSION.to_string(),
    };
    let path = dir.join("index.json");
    fs::write(&path, serde_json::to_string_pretty(&index)?)?;
    Ok(path)
}

/// Load a GeoJSON file as untyped JSON; region files mix upstream schemas.
pub fn load_geojson(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
