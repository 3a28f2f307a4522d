use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tempfile::tempdir;

use kamptrail_scraper::quality::{clean_dir, clean_file, CleanMode};

fn feature(name: &str, site_type: &str, lon: f64, lat: f64) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [lon, lat]},
        "properties": {"name": name, "type": site_type, "source": "recreation.gov"}
    })
}

fn write_collection(path: &Path, features: Vec<Value>) {
    let collection = json!({"type": "FeatureCollection", "features": features});
    fs::write(path, serde_json::to_string(&collection).unwrap()).unwrap();
}

fn feature_names(path: &Path) -> Vec<String> {
    let data: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    data["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["properties"]["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_clean_rewrites_only_disqualified_entries() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("CA.geojson");
    write_collection(
        &path,
        vec![
            feature("Lone Pine Campground", "established", -118.0, 36.6),
            feature("Test Site", "established", -118.1, 36.7),
            feature("Unnamed Site", "established", -118.2, 36.8),
            feature("Big Meadow", "unknown", -118.3, 36.9),
            // Known test coordinates, innocuous name
            feature("Riverside Camp", "established", -96.5867918, 41.4314415),
        ],
    );

    let outcome = clean_file(&path, CleanMode::Full, false).unwrap();
    assert_eq!(outcome.original, 5);
    assert_eq!(outcome.removed, 4);
    assert_eq!(feature_names(&path), vec!["Lone Pine Campground"]);
}

#[test]
fn test_clean_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("CO.geojson");
    write_collection(
        &path,
        vec![
            feature("Maroon Bells Campground", "established", -106.9, 39.1),
            feature("sample meadow", "established", -106.8, 39.2),
        ],
    );

    let first = clean_file(&path, CleanMode::Full, false).unwrap();
    assert_eq!(first.removed, 1);
    let after_first = fs::read_to_string(&path).unwrap();

    let second = clean_file(&path, CleanMode::Full, false).unwrap();
    assert_eq!(second.removed, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
}

#[test]
fn test_dry_run_leaves_files_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("UT.geojson");
    write_collection(&path, vec![feature("Test Site", "established", -111.0, 39.0)]);
    let before = fs::read_to_string(&path).unwrap();

    let outcome = clean_file(&path, CleanMode::Full, true).unwrap();
    assert_eq!(outcome.removed, 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_clean_dir_recurses_and_skips_bad_files() {
    let dir = tempdir().unwrap();
    let campsites = dir.path().join("campsites");
    let osm = dir.path().join("opencampingmap");
    fs::create_dir_all(&campsites).unwrap();
    fs::create_dir_all(&osm).unwrap();

    write_collection(
        &campsites.join("CA.geojson"),
        vec![
            feature("Lone Pine Campground", "established", -118.0, 36.6),
            feature("Whitestar Campground", "established", -118.5, 36.5),
        ],
    );
    write_collection(&osm.join("WY.geojson"), vec![feature("Jenny Lake", "established", -110.7, 43.8)]);
    // Unparseable file is reported, not fatal, and left alone
    fs::write(campsites.join("broken.geojson"), "{not json").unwrap();

    let summary = clean_dir(dir.path(), CleanMode::Full, false).unwrap();
    assert_eq!(summary.total_removed, 1);
    assert_eq!(summary.files_cleaned.len(), 1);
    assert_eq!(summary.errors.len(), 1);
    assert_eq!(fs::read_to_string(campsites.join("broken.geojson")).unwrap(), "{not json");
    // The untouched file keeps all features
    assert_eq!(feature_names(&osm.join("WY.geojson")), vec!["Jenny Lake"]);
}

#[test]
fn test_placeholders_only_mode() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("MT.geojson");
    write_collection(
        &path,
        vec![
            feature("Unnamed Site", "established", -110.0, 46.0),
            feature("Staff Showerhouse", "established", -110.1, 46.1),
        ],
    );

    let outcome = clean_file(&path, CleanMode::PlaceholdersOnly, false).unwrap();
    assert_eq!(outcome.removed, 1);
    assert_eq!(feature_names(&path), vec!["Unnamed Site"]);
}
