//! Placeholder/low-quality classification over GeoJSON features and the
//! in-place region-file cleanup built on it.
//!
//! Features are handled as untyped JSON because region files hold records
//! from several upstream schemas. Classification is pure and per-feature:
//! filtering a collection twice yields the same survivors as filtering it
//! once, and survivors are never mutated.

pub mod rules;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;
use rules::{BAD_TYPES, COORD_TOLERANCE, GENERIC_NAMES, PLACEHOLDER_COORDS, PLACEHOLDER_KEYWORDS};

/// Which rule set a cleanup pass applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanMode {
    /// Only placeholder keywords and known test coordinates
    PlaceholdersOnly,
    /// Placeholders plus generic names and unusable types
    Full,
}

/// Case-folded, trimmed string property; non-string values are stringified
/// so a numeric `name` still gets compared.
fn folded_property(feature: &Value, key: &str) -> String {
    match feature.get("properties").and_then(|p| p.get(key)) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_lowercase(),
        Some(other) => other.to_string().trim().to_lowercase(),
    }
}

fn point_coords(feature: &Value) -> Option<(f64, f64)> {
    let coords = feature
        .get("geometry")
        .and_then(|g| g.get("coordinates"))
        .and_then(Value::as_array)?;
    if coords.len() != 2 {
        return None;
    }
    Some((coords[0].as_f64()?, coords[1].as_f64()?))
}

fn name_matches_placeholder(name: &str) -> bool {
    PLACEHOLDER_KEYWORDS.iter().any(|k| name.contains(k))
}

fn coords_match_placeholder(feature: &Value) -> bool {
    let Some((lon, lat)) = point_coords(feature) else {
        return false;
    };
    PLACEHOLDER_COORDS.iter().any(|[known_lon, known_lat]| {
        (lon - known_lon).abs() < COORD_TOLERANCE && (lat - known_lat).abs() < COORD_TOLERANCE
    })
}

/// Test/placeholder entry: matched by name keyword or by proximity to a
/// known test-data coordinate pair.
pub fn is_placeholder(feature: &Value) -> bool {
    name_matches_placeholder(&folded_property(feature, "name")) || coords_match_placeholder(feature)
}

/// Entry not worth showing to users: a placeholder, an empty or generic
/// name, or an unusable type.
pub fn is_low_quality(feature: &Value) -> bool {
    let name = folded_property(feature, "name");
    if name_matches_placeholder(&name) {
        return true;
    }
    if name.is_empty() || GENERIC_NAMES.contains(&name.as_str()) {
        return true;
    }
    let site_type = folded_property(feature, "type");
    if BAD_TYPES.contains(&site_type.as_str()) {
        return true;
    }
    coords_match_placeholder(feature)
}

/// Keep/discard over a slice of features. Pure subset operation: survivors
/// are cloned unchanged, nothing is added.
pub fn filter_features(features: &[Value], mode: CleanMode) -> Vec<Value> {
    let discard: fn(&Value) -> bool = match mode {
        CleanMode::PlaceholdersOnly => is_placeholder,
        CleanMode::Full => is_low_quality,
    };
    features.iter().filter(|f| !discard(f)).cloned().collect()
}

/// Outcome of cleaning one file.
#[derive(Debug, Clone, Copy)]
pub struct CleanOutcome {
    pub original: usize,
    pub removed: usize,
}

/// Filter one GeoJSON file in place. The file is rewritten only when
/// something was removed (and never during a dry run); parse failures
/// surface as errors and leave the file untouched.
pub fn clean_file(path: &Path, mode: CleanMode, dry_run: bool) -> Result<CleanOutcome> {
    let text = fs::read_to_string(path)?;
    let mut data: Value = serde_json::from_str(&text)?;

    let features = data
        .get("features")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let original = features.len();

    let kept = filter_features(&features, mode);
    let removed = original - kept.len();

    if removed > 0 && !dry_run {
        data["features"] = Value::Array(kept);
        fs::write(path, serde_json::to_string(&data)?)?;
    }

    Ok(CleanOutcome { original, removed })
}

/// Aggregate result of a directory sweep.
#[derive(Debug, Default)]
pub struct CleanSummary {
    pub files_cleaned: Vec<(PathBuf, CleanOutcome)>,
    pub total_removed: usize,
    pub errors: Vec<String>,
}

/// Recursively clean every `.geojson` file under `dir`. Per-file failures
/// are collected, not fatal.
pub fn clean_dir(dir: &Path, mode: CleanMode, dry_run: bool) -> Result<CleanSummary> {
    let mut summary = CleanSummary::default();
    for path in geojson_files(dir)? {
        match clean_file(&path, mode, dry_run) {
            Ok(outcome) if outcome.removed > 0 => {
                summary.total_removed += outcome.removed;
                summary.files_cleaned.push((path, outcome));
            }
            Ok(_) => debug!("nothing to remove in {}", path.display()),
            Err(e) => {
                warn!("error processing {}: {e}", path.display());
                summary.errors.push(format!("{}: {e}", path.display()));
            }
        }
    }
    Ok(summary)
}

/// All `.geojson` files under `dir`, recursively, in sorted order.
fn geojson_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "geojson") {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}
