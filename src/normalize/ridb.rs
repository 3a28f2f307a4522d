//! Normalizer for Recreation.gov RIDB facility records.

use serde_json::Value;

use crate::constants::RIDB_SOURCE;
use crate::states;
use crate::types::{CampsiteFeature, Feature, SiteProperties};

use super::{
    amenities_from_text, classify_road, classify_site_type, coord_value, id_value, parse_cost,
    rigs_from_text, site_id, text_value, truncate_description,
};

/// Convert one RIDB facility into a canonical feature. Facilities without
/// usable coordinates are skipped.
pub fn to_feature(facility: &Value, state: &str, seq: usize) -> Option<CampsiteFeature> {
    let lat = coord_value(facility.get("FacilityLatitude"))?;
    let lon = coord_value(facility.get("FacilityLongitude"))?;

    let name = text_value(facility.get("FacilityName"))
        .map(str::to_string)
        .unwrap_or_else(|| fallback_name(state, seq));

    let type_text = text_value(facility.get("FacilityTypeDescription")).unwrap_or("");
    let description = text_value(facility.get("FacilityDescription")).unwrap_or("");
    let fee_text = text_value(facility.get("FacilityUseFeeDescription"));

    let properties = SiteProperties {
        id: site_id(state, seq),
        name,
        site_type: classify_site_type(type_text),
        cost: parse_cost(fee_text),
        rating: None, // would need the separate reviews API
        reviews_count: 0,
        amenities: amenities_from_text(description),
        rig_friendly: rigs_from_text(description),
        road_difficulty: classify_road(description),
        state: state.to_string(),
        source: RIDB_SOURCE.to_string(),
        facility_id: id_value(facility.get("FacilityID")),
        campflare_id: None,
        osm_id: None,
        description: truncate_description(description),
    };

    Some(Feature::point(lon, lat, properties))
}

fn fallback_name(state: &str, seq: usize) -> String {
    let state_name = states::state_name(state).unwrap_or(state);
    format!("{state_name} Site {seq}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Amenity, RigType, RoadDifficulty, SiteType};
    use serde_json::json;

    fn sample_facility() -> Value {
        json!({
            "FacilityID": "232447",
            "FacilityName": "Lone Pine Campground",
            "FacilityTypeDescription": "Campground",
            "FacilityDescription": "Vault toilets, potable water, fire rings and picnic tables. Tent and RV sites along a gravel road.",
            "FacilityUseFeeDescription": "$20 per night",
            "FacilityLatitude": 36.601,
            "FacilityLongitude": -118.062
        })
    }

    #[test]
    fn test_full_facility() {
        let feature = to_feature(&sample_facility(), "CA", 3).unwrap();
        assert_eq!(feature.geometry.coordinates, [-118.062, 36.601]);
        let props = feature.properties;
        assert_eq!(props.id, "CA-003");
        assert_eq!(props.name, "Lone Pine Campground");
        assert_eq!(props.site_type, SiteType::Established);
        assert_eq!(props.cost, 20);
        assert_eq!(props.amenities, vec![
            Amenity::Toilets,
            Amenity::Water,
            Amenity::FireRings,
            Amenity::PicnicTables,
        ]);
        assert_eq!(props.rig_friendly, vec![RigType::Tent, RigType::Rv, RigType::Trailer]);
        assert_eq!(props.road_difficulty, RoadDifficulty::Gravel);
        assert_eq!(props.source, "recreation.gov");
        assert_eq!(props.facility_id.as_deref(), Some("232447"));
    }

    #[test]
    fn test_missing_coordinates_skips_record() {
        let facility = json!({"FacilityName": "No Coords", "FacilityLatitude": null});
        assert!(to_feature(&facility, "CA", 1).is_none());

        let zeroed = json!({
            "FacilityName": "Zeroed",
            "FacilityLatitude": 0.0,
            "FacilityLongitude": -118.0
        });
        assert!(to_feature(&zeroed, "CA", 1).is_none());
    }

    #[test]
    fn test_name_fallback_uses_state_name() {
        let facility = json!({
            "FacilityLatitude": 44.5,
            "FacilityLongitude": -110.3
        });
        let feature = to_feature(&facility, "WY", 7).unwrap();
        assert_eq!(feature.properties.name, "Wyoming Site 7");
        assert_eq!(feature.properties.cost, 0);
        assert!(feature.properties.description.is_none());
    }

    #[test]
    fn test_numeric_facility_id_passes_through() {
        let facility = json!({
            "FacilityID": 98765,
            "FacilityLatitude": 44.5,
            "FacilityLongitude": -110.3
        });
        let feature = to_feature(&facility, "WY", 1).unwrap();
        assert_eq!(feature.properties.facility_id.as_deref(), Some("98765"));
    }
}
