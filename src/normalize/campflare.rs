//! Normalizer for Campflare campground records. Field names vary between
//! API versions, so lookups try candidates in priority order.

use serde_json::Value;

use crate::constants::CAMPFLARE_SOURCE;
use crate::normalize::COST_RE;
use crate::states;
use crate::types::{CampsiteFeature, Feature, RoadDifficulty, SiteProperties};

use super::{
    amenities_from_text, classify_site_type, coord_value, id_value, rigs_from_text, site_id,
    text_value, truncate_description,
};

/// Convert one Campflare campground into a canonical feature. Records with
/// no resolvable coordinate candidate are skipped.
pub fn to_feature(camp: &Value, state: &str, seq: usize) -> Option<CampsiteFeature> {
    let lat = first_coord(camp, &["latitude", "lat"], "lat")?;
    let lon = first_coord(camp, &["longitude", "lon", "lng"], "lon")?;

    let name = first_text(camp, &["name", "title"])
        .map(str::to_string)
        .unwrap_or_else(|| fallback_name(state, seq));

    let type_text = first_text(camp, &["type", "campgroundType"]).unwrap_or("");
    let description = first_text(camp, &["description"]).unwrap_or("");

    let properties = SiteProperties {
        id: site_id(state, seq),
        name,
        site_type: classify_site_type(type_text),
        cost: cost_estimate(camp),
        rating: camp.get("rating").and_then(Value::as_f64),
        reviews_count: reviews_count(camp),
        amenities: amenities_from_text(&amenity_text(camp)),
        rig_friendly: rigs_from_text(description),
        road_difficulty: RoadDifficulty::default(),
        state: state.to_string(),
        source: CAMPFLARE_SOURCE.to_string(),
        facility_id: None,
        campflare_id: id_value(camp.get("id")).or_else(|| id_value(camp.get("campgroundId"))),
        osm_id: None,
        description: truncate_description(description),
    };

    Some(Feature::point(lon, lat, properties))
}

/// Try top-level field candidates in order, then the nested `coords` object.
fn first_coord(camp: &Value, keys: &[&str], coords_key: &str) -> Option<f64> {
    for key in keys {
        if let Some(value) = coord_value(camp.get(*key)) {
            return Some(value);
        }
    }
    coord_value(camp.get("coords").and_then(|c| c.get(coords_key)))
}

fn first_text<'a>(camp: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| text_value(camp.get(*key)))
}

/// Cost from the first present of `cost`/`price`/`fee`. Numeric values are
/// taken as-is; strings must carry a dollar amount to count.
fn cost_estimate(camp: &Value) -> u32 {
    for key in ["cost", "price", "fee"] {
        let Some(value) = camp.get(key) else { continue };
        match value {
            Value::Number(n) => {
                if let Some(amount) = n.as_f64() {
                    return amount.max(0.0) as u32;
                }
            }
            Value::String(s) if s.contains('$') => {
                if let Some(caps) = COST_RE.captures(s) {
                    if let Ok(amount) = caps[1].parse() {
                        return amount;
                    }
                }
            }
            _ => {}
        }
    }
    0
}

fn reviews_count(camp: &Value) -> u32 {
    camp.get("reviewCount")
        .or_else(|| camp.get("reviews_count"))
        .and_then(Value::as_u64)
        .unwrap_or(0) as u32
}

/// Amenities arrive as an array of labels under `amenities` or `facilities`;
/// joining them lets the shared keyword scan run once over the whole list.
fn amenity_text(camp: &Value) -> String {
    let items = camp
        .get("amenities")
        .or_else(|| camp.get("facilities"))
        .and_then(Value::as_array);
    match items {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        None => String::new(),
    }
}

fn fallback_name(state: &str, seq: usize) -> String {
    let state_name = states::state_name(state).unwrap_or(state);
    format!("{state_name} Site {seq}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Amenity, RigType, SiteType};
    use serde_json::json;

    #[test]
    fn test_nested_coordinate_fallback() {
        let camp = json!({
            "name": "Hidden Valley",
            "coords": {"lat": 39.25, "lon": -106.3}
        });
        let feature = to_feature(&camp, "CO", 1).unwrap();
        assert_eq!(feature.geometry.coordinates, [-106.3, 39.25]);
    }

    #[test]
    fn test_top_level_coordinates_win_over_nested() {
        let camp = json!({
            "name": "Two Coords",
            "latitude": 40.0,
            "longitude": -105.0,
            "coords": {"lat": 1.0, "lon": 2.0}
        });
        let feature = to_feature(&camp, "CO", 1).unwrap();
        assert_eq!(feature.geometry.coordinates, [-105.0, 40.0]);
    }

    #[test]
    fn test_no_coordinates_skips_record() {
        let camp = json!({"name": "Nowhere"});
        assert!(to_feature(&camp, "CO", 1).is_none());
    }

    #[test]
    fn test_numeric_and_string_costs() {
        let numeric = json!({"lat": 39.0, "lng": -106.0, "price": 32});
        assert_eq!(to_feature(&numeric, "CO", 1).unwrap().properties.cost, 32);

        let text = json!({"lat": 39.0, "lng": -106.0, "fee": "$18/night"});
        assert_eq!(to_feature(&text, "CO", 1).unwrap().properties.cost, 18);

        let unparseable = json!({"lat": 39.0, "lng": -106.0, "fee": "varies"});
        assert_eq!(to_feature(&unparseable, "CO", 1).unwrap().properties.cost, 0);
    }

    #[test]
    fn test_type_and_amenity_mapping() {
        let camp = json!({
            "lat": 39.0,
            "lon": -106.0,
            "title": "High Lakes Dispersed Area",
            "campgroundType": "Primitive dispersed camping",
            "amenities": ["Vault Toilet", "Drinking Water"],
            "description": "Tent and trailer camping."
        });
        let props = to_feature(&camp, "CO", 2).unwrap().properties;
        assert_eq!(props.name, "High Lakes Dispersed Area");
        assert_eq!(props.site_type, SiteType::Dispersed);
        assert_eq!(props.amenities, vec![Amenity::Toilets, Amenity::Water]);
        assert_eq!(props.rig_friendly, vec![RigType::Tent, RigType::Rv, RigType::Trailer]);
        assert_eq!(props.id, "CO-002");
    }

    #[test]
    fn test_campflare_id_fallback_chain() {
        let camp = json!({"lat": 39.0, "lon": -106.0, "campgroundId": 5512});
        let props = to_feature(&camp, "CO", 1).unwrap().properties;
        assert_eq!(props.campflare_id.as_deref(), Some("5512"));
        assert_eq!(props.source, "campflare");
    }
}
