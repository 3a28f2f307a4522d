//! Coverage report over the two region-file directories: which of the 50
//! states have data from which source, plus structural and placeholder
//! checks on each file found. Auditing only reads; nothing is mutated.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::quality::rules::PLACEHOLDER_KEYWORDS;
use crate::states;

/// How many leading features get the placeholder check.
const PLACEHOLDER_SAMPLE: usize = 5;
/// How many leading features get the coordinate check.
const COORDINATE_SAMPLE: usize = 10;

/// Basic statistics for one region file.
#[derive(Debug, Default)]
pub struct FileStats {
    pub count: usize,
    pub sources: Vec<String>,
    pub size_kb: f64,
}

/// Coverage over the 50 states for one source directory.
#[derive(Debug)]
pub struct SourceCoverage {
    pub label: String,
    pub covered: BTreeSet<String>,
    pub total_sites: usize,
    /// Present states in table order, with their stats
    pub entries: Vec<(String, FileStats)>,
}

impl SourceCoverage {
    pub fn missing(&self) -> Vec<&'static str> {
        states::codes().filter(|c| !self.covered.contains(*c)).collect()
    }
}

/// Full audit result across both sources.
#[derive(Debug)]
pub struct AuditReport {
    pub ridb: SourceCoverage,
    pub osm: SourceCoverage,
    pub findings: Vec<String>,
}

impl AuditReport {
    /// Success means every state has data from both sources and no quality
    /// findings were raised; this drives the process exit code.
    pub fn is_complete_and_clean(&self) -> bool {
        self.ridb.missing().is_empty() && self.osm.missing().is_empty() && self.findings.is_empty()
    }
}

/// File-name variants accepted for a state in the campsites directory,
/// checked in order; the first existing file wins.
fn campsite_file_variants(state: &str) -> [String; 3] {
    [
        format!("{state}.geojson"),
        format!("{state}(1).geojson"),
        format!("{state}_merged.geojson"),
    ]
}

fn locate_region_file(dir: &Path, variants: &[String]) -> Option<PathBuf> {
    variants
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Count features, collect distinct `source` property values, note size.
/// Unreadable files yield zeroed stats; the structural checks report the
/// actual problem separately.
fn file_stats(path: &Path) -> FileStats {
    let size_kb = fs::metadata(path).map(|m| m.len() as f64 / 1024.0).unwrap_or(0.0);
    let data = match crate::store::load_geojson(path) {
        Ok(data) => data,
        Err(_) => return FileStats { size_kb, ..FileStats::default() },
    };
    let features = data.get("features").and_then(Value::as_array).cloned().unwrap_or_default();

    let mut sources = BTreeSet::new();
    for feature in &features {
        let source = feature
            .get("properties")
            .and_then(|p| p.get("source"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        sources.insert(source.to_string());
    }

    FileStats {
        count: features.len(),
        sources: sources.into_iter().collect(),
        size_kb,
    }
}

fn folded(feature: &Value, key: &str) -> String {
    feature
        .get("properties")
        .and_then(|p| p.get(key))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_lowercase()
}

/// Structural and placeholder checks for one region file.
pub fn check_file(path: &Path) -> Vec<String> {
    let mut findings = Vec::new();
    let display = path.display();

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            findings.push(format!("ERROR reading {display}: {e}"));
            return findings;
        }
    };
    let data: Value = match serde_json::from_str(&text) {
        Ok(data) => data,
        Err(e) => {
            findings.push(format!("JSON PARSE ERROR in {display}: {e}"));
            return findings;
        }
    };

    let Some(features) = data.get("features").and_then(Value::as_array) else {
        findings.push(format!("Invalid GeoJSON structure in {display}"));
        return findings;
    };

    if features.is_empty() {
        findings.push(format!("EMPTY FILE: {display} has 0 features"));
        return findings;
    }

    for (idx, feature) in features.iter().take(PLACEHOLDER_SAMPLE).enumerate() {
        let name = folded(feature, "name");
        let description = folded(feature, "description");
        if PLACEHOLDER_KEYWORDS
            .iter()
            .any(|k| name.contains(k) || description.contains(k))
        {
            let shown = feature
                .get("properties")
                .and_then(|p| p.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("");
            findings.push(format!(
                "PLACEHOLDER DETECTED in {display}, feature {idx}: name='{shown}'"
            ));
        }
    }

    for (idx, feature) in features.iter().take(COORDINATE_SAMPLE).enumerate() {
        let coords = feature
            .get("geometry")
            .and_then(|g| g.get("coordinates"))
            .and_then(Value::as_array);
        let pair = coords.and_then(|c| {
            if c.len() == 2 {
                Some((c[0].as_f64()?, c[1].as_f64()?))
            } else {
                None
            }
        });
        match pair {
            None => findings.push(format!("INVALID COORDINATES in {display}, feature {idx}")),
            Some((lon, lat)) => {
                if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
                    findings.push(format!(
                        "OUT OF RANGE COORDINATES in {display}, feature {idx}: [{lon}, {lat}]"
                    ));
                }
            }
        }
    }

    findings
}

fn audit_directory(
    dir: &Path,
    label: &str,
    variants_for: impl Fn(&str) -> Vec<String>,
) -> (SourceCoverage, Vec<String>) {
    let mut coverage = SourceCoverage {
        label: label.to_string(),
        covered: BTreeSet::new(),
        total_sites: 0,
        entries: Vec::new(),
    };
    let mut findings = Vec::new();

    for state in states::codes() {
        let Some(path) = locate_region_file(dir, &variants_for(state)) else {
            continue;
        };
        coverage.covered.insert(state.to_string());
        let stats = file_stats(&path);
        coverage.total_sites += stats.count;
        coverage.entries.push((state.to_string(), stats));
        findings.extend(check_file(&path));
    }

    (coverage, findings)
}

/// Run the full audit over both source directories.
pub fn run(campsites_dir: &Path, osm_dir: &Path) -> AuditReport {
    let (ridb, mut findings) = audit_directory(campsites_dir, "Recreation.gov", |state| {
        campsite_file_variants(state).to_vec()
    });
    let (osm, osm_findings) =
        audit_directory(osm_dir, "OpenStreetMap", |state| vec![format!("{state}.geojson")]);
    findings.extend(osm_findings);

    AuditReport { ridb, osm, findings }
}

fn push_source_section(out: &mut String, number: u32, coverage: &SourceCoverage) {
    let _ = writeln!(out, "\n{number}. {} DATA AUDIT", coverage.label.to_uppercase());
    let _ = writeln!(out, "{}", "-".repeat(80));

    for state in states::codes() {
        match coverage.entries.iter().find(|(code, _)| code == state) {
            Some((_, stats)) => {
                let sources = stats.sources.join(", ");
                let _ = writeln!(
                    out,
                    "  ✓ {state}: {:4} sites ({:7.1} KB) - {sources}",
                    stats.count, stats.size_kb
                );
            }
            None => {
                let _ = writeln!(out, "  ✗ {state}: MISSING");
            }
        }
    }

    let missing = coverage.missing();
    let _ = writeln!(out, "\n{} Summary:", coverage.label);
    let _ = writeln!(out, "  States with data: {}/50", coverage.covered.len());
    let _ = writeln!(out, "  Total campsites: {}", coverage.total_sites);
    let _ = writeln!(out, "  Missing states: {}", missing.join(", "));
}

/// Render the human-readable report.
pub fn render(report: &AuditReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "KAMPTRAIL CAMPSITE DATABASE AUDIT");
    let _ = writeln!(out, "{}", "=".repeat(80));

    push_source_section(&mut out, 1, &report.ridb);
    push_source_section(&mut out, 2, &report.osm);

    let _ = writeln!(out, "\n3. DATA QUALITY ISSUES");
    let _ = writeln!(out, "{}", "-".repeat(80));
    if report.findings.is_empty() {
        let _ = writeln!(out, "  ✓ No placeholder or quality issues detected!");
    } else {
        let _ = writeln!(out, "Found {} issues:", report.findings.len());
        for finding in &report.findings {
            let _ = writeln!(out, "  ⚠ {finding}");
        }
    }

    let _ = writeln!(out, "\n4. COVERAGE ANALYSIS");
    let _ = writeln!(out, "{}", "-".repeat(80));
    let both: Vec<&str> = states::codes()
        .filter(|c| report.ridb.covered.contains(*c) && report.osm.covered.contains(*c))
        .collect();
    let only_ridb: Vec<&str> = states::codes()
        .filter(|c| report.ridb.covered.contains(*c) && !report.osm.covered.contains(*c))
        .collect();
    let only_osm: Vec<&str> = states::codes()
        .filter(|c| !report.ridb.covered.contains(*c) && report.osm.covered.contains(*c))
        .collect();
    let neither: Vec<&str> = states::codes()
        .filter(|c| !report.ridb.covered.contains(*c) && !report.osm.covered.contains(*c))
        .collect();

    let _ = writeln!(out, "  States with BOTH sources: {}/50", both.len());
    let _ = writeln!(out, "    {}", both.join(", "));
    let _ = writeln!(out, "\n  States with ONLY Recreation.gov: {}", only_ridb.len());
    let _ = writeln!(out, "    {}", only_ridb.join(", "));
    let _ = writeln!(out, "\n  States with ONLY OSM: {}", only_osm.len());
    let _ = writeln!(out, "    {}", only_osm.join(", "));
    let _ = writeln!(out, "\n  States with NO data: {}", neither.len());
    if neither.is_empty() {
        let _ = writeln!(out, "    None - full coverage achieved!");
    } else {
        let _ = writeln!(out, "    {}", neither.join(", "));
    }

    let _ = writeln!(out, "\n5. RECOMMENDATIONS");
    let _ = writeln!(out, "{}", "-".repeat(80));
    let missing_ridb = report.ridb.missing();
    let missing_osm = report.osm.missing();
    if !missing_ridb.is_empty() {
        let _ = writeln!(
            out,
            "  → Fetch Recreation.gov data for {} missing states:",
            missing_ridb.len()
        );
        let _ = writeln!(out, "    {}", missing_ridb.join(", "));
    }
    if !missing_osm.is_empty() {
        let _ = writeln!(
            out,
            "  → Fetch OpenStreetMap data for {} missing states:",
            missing_osm.len()
        );
        let _ = writeln!(out, "    {}", missing_osm.join(", "));
    }
    if !report.findings.is_empty() {
        let _ = writeln!(out, "  → Fix {} data quality issues listed above", report.findings.len());
    }
    if report.is_complete_and_clean() {
        let _ = writeln!(out, "  ✓ Database is complete with all 50 states and no issues!");
    }

    let _ = writeln!(out, "\n{}", "=".repeat(80));
    out
}
