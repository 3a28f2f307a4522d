//! Pure transforms from heterogeneous upstream records to the canonical
//! campsite schema. Callers own all I/O; a record that cannot yield a
//! feature is skipped, never an error.

pub mod campflare;
pub mod osm;
pub mod ridb;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::constants::DEFAULT_FEE_ESTIMATE;
use crate::types::{Amenity, RigType, RoadDifficulty, SiteType};

/// First dollar amount in a fee description, e.g. the `25` in "$25 per night"
static COST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(\d+)").expect("valid cost pattern"));

/// Region-scoped site id: state code plus zero-padded sequence number.
/// Sequence numbers are positional and restart at 1 for every region.
pub fn site_id(state: &str, seq: usize) -> String {
    format!("{state}-{seq:03}")
}

/// Classify a free-text site/facility type. First matching rule wins;
/// `dispersed`/`primitive` must be checked before `backcountry` because the
/// terms co-occur in upstream descriptions.
pub fn classify_site_type(type_text: &str) -> SiteType {
    let lower = type_text.to_lowercase();
    if lower.contains("dispersed") || lower.contains("primitive") {
        SiteType::Dispersed
    } else if lower.contains("backcountry") {
        SiteType::Backcountry
    } else {
        SiteType::Established
    }
}

/// Derive a cost estimate from a free-text fee description.
///
/// No description at all means no fee information: cost 0. A description
/// containing `free` is 0; a `$`-prefixed amount is parsed; anything else
/// falls back to a fixed estimate because a fee exists but its amount is
/// unknown.
pub fn parse_cost(fee_text: Option<&str>) -> u32 {
    let text = match fee_text {
        Some(t) if !t.trim().is_empty() => t.to_lowercase(),
        _ => return 0,
    };
    if text.contains("free") {
        return 0;
    }
    match COST_RE.captures(&text) {
        Some(caps) => caps[1].parse().unwrap_or(DEFAULT_FEE_ESTIMATE),
        None => DEFAULT_FEE_ESTIMATE,
    }
}

/// Scan a description once; each keyword family contributes at most one tag
/// no matter how often its keywords recur.
pub fn amenities_from_text(description: &str) -> Vec<Amenity> {
    let lower = description.to_lowercase();
    let mut amenities = Vec::new();
    let families: [(&[&str], Amenity); 6] = [
        (&["toilet", "restroom"], Amenity::Toilets),
        (&["water", "potable"], Amenity::Water),
        (&["shower"], Amenity::Showers),
        (&["fire"], Amenity::FireRings),
        (&["picnic", "table"], Amenity::PicnicTables),
        (&["trash", "garbage"], Amenity::Trash),
    ];
    for (keywords, amenity) in families {
        if keywords.iter().any(|k| lower.contains(k)) && !amenities.contains(&amenity) {
            amenities.push(amenity);
        }
    }
    amenities
}

/// Rig suitability from a description. `rv` and `trailer` each imply both
/// RV and trailer access.
pub fn rigs_from_text(description: &str) -> Vec<RigType> {
    let lower = description.to_lowercase();
    let mut rigs = Vec::new();
    if lower.contains("tent") {
        rigs.push(RigType::Tent);
    }
    if lower.contains("rv") || lower.contains("trailer") {
        rigs.push(RigType::Rv);
        rigs.push(RigType::Trailer);
    }
    rigs
}

/// Road surface estimate from a description; paved unless stated otherwise.
pub fn classify_road(description: &str) -> RoadDifficulty {
    let lower = description.to_lowercase();
    if lower.contains("dirt") {
        RoadDifficulty::Dirt
    } else if lower.contains("gravel") || lower.contains("unpaved") {
        RoadDifficulty::Gravel
    } else {
        RoadDifficulty::Paved
    }
}

/// First 200 characters of a description, or `None` when empty.
pub fn truncate_description(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(200).collect())
}

/// Numeric field that may arrive as a JSON number or a numeric string.
/// Zero is treated as absent, matching the upstream convention of zeroed
/// placeholder coordinates.
pub fn coord_value(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    if number == 0.0 {
        None
    } else {
        Some(number)
    }
}

/// Non-empty string field.
pub fn text_value(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Opaque upstream identifier that may be a string or a number.
pub fn id_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
