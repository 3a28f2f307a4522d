//! Normalizers for Overpass API elements: campsites (`tourism=camp_site`/
//! `caravan_site`) and standalone POIs (dump stations, propane fills).

use serde_json::Value;

use crate::constants::{DEFAULT_FEE_ESTIMATE, OSM_SOURCE};
use crate::types::{
    Amenity, CampsiteFeature, Feature, PoiFeature, PoiProperties, RigType, RoadDifficulty,
    SiteProperties, SiteType,
};

use super::site_id;

/// Point coordinates for an element: nodes carry `lat`/`lon` directly,
/// ways and relations only a `center` sub-object. Zeroed or absent
/// coordinates skip the element.
pub fn element_coords(element: &Value) -> Option<(f64, f64)> {
    let holder = match element.get("type").and_then(Value::as_str)? {
        "node" => element,
        "way" | "relation" => element.get("center")?,
        _ => return None,
    };
    let lon = holder.get("lon").and_then(Value::as_f64)?;
    let lat = holder.get("lat").and_then(Value::as_f64)?;
    if lon == 0.0 || lat == 0.0 {
        return None;
    }
    Some((lon, lat))
}

fn tag<'a>(tags: &'a Value, key: &str) -> Option<&'a str> {
    tags.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn tag_is(tags: &Value, key: &str, expected: &str) -> bool {
    tag(tags, key) == Some(expected)
}

/// Convert one campsite element into a canonical feature.
pub fn campsite_feature(element: &Value, state: &str, seq: usize) -> Option<CampsiteFeature> {
    let (lon, lat) = element_coords(element)?;
    let empty = Value::Object(Default::default());
    let tags = element.get("tags").unwrap_or(&empty);

    // Sites missing a name get a recognizable label the quality filter can
    // later remove
    let name = tag(tags, "name")
        .or_else(|| tag(tags, "name:en"))
        .map(str::to_string)
        .unwrap_or_else(|| "Unnamed Site (OSM)".to_string());

    let properties = SiteProperties {
        id: site_id(state, seq),
        name,
        site_type: campsite_type(tags),
        cost: fee_estimate(tags),
        rating: None,
        reviews_count: 0,
        amenities: tag_amenities(tags),
        rig_friendly: tag_rigs(tags),
        road_difficulty: RoadDifficulty::default(),
        state: state.to_string(),
        source: OSM_SOURCE.to_string(),
        facility_id: None,
        campflare_id: None,
        osm_id: element.get("id").and_then(Value::as_i64),
        description: None,
    };

    Some(Feature::point(lon, lat, properties))
}

/// Informal/backcountry tagging takes precedence; tent-only sites with no
/// caravan access also count as backcountry.
fn campsite_type(tags: &Value) -> SiteType {
    if tag_is(tags, "backcountry", "yes") || tag_is(tags, "informal", "yes") {
        SiteType::Backcountry
    } else if tag_is(tags, "tents", "yes") && tag(tags, "caravans").is_none() {
        SiteType::Backcountry
    } else {
        SiteType::Established
    }
}

/// `fee=no` is explicit free camping; `fee=yes` means a fee exists with an
/// unknown amount, which maps to the fixed fallback estimate.
fn fee_estimate(tags: &Value) -> u32 {
    match tag(tags, "fee") {
        Some("no") => 0,
        Some(_) => DEFAULT_FEE_ESTIMATE,
        None => 0,
    }
}

fn tag_amenities(tags: &Value) -> Vec<Amenity> {
    let mut amenities = Vec::new();
    if tag_is(tags, "toilets", "yes") {
        amenities.push(Amenity::Toilets);
    }
    if tag_is(tags, "drinking_water", "yes") || tag_is(tags, "water", "yes") {
        amenities.push(Amenity::Water);
    }
    if tag_is(tags, "shower", "yes") || tag_is(tags, "showers", "yes") {
        amenities.push(Amenity::Showers);
    }
    if tag_is(tags, "bbq", "yes") || tag_is(tags, "fireplace", "yes") {
        amenities.push(Amenity::FireRings);
    }
    if tag_is(tags, "picnic_table", "yes") {
        amenities.push(Amenity::PicnicTables);
    }
    amenities
}

fn tag_rigs(tags: &Value) -> Vec<RigType> {
    let mut rigs = Vec::new();
    if tag_is(tags, "tents", "yes") {
        rigs.push(RigType::Tent);
    }
    if tag_is(tags, "caravans", "yes") {
        rigs.push(RigType::Rv);
        rigs.push(RigType::Trailer);
    }
    rigs
}

/// Convert one dump-station or propane element into a POI feature with
/// access/fee labels derived from the OSM tagging rules.
pub fn poi_feature(element: &Value, poi_type: SiteType) -> Option<PoiFeature> {
    let (lon, lat) = element_coords(element)?;
    let empty = Value::Object(Default::default());
    let tags = element.get("tags").unwrap_or(&empty);

    let name = tag(tags, "name")
        .or_else(|| tag(tags, "operator"))
        .map(str::to_string)
        .unwrap_or_else(|| default_poi_name(tags, poi_type));

    let access = if tag_is(tags, "sanitary_dump_station", "customers") {
        Some("Customers only".to_string())
    } else if tag_is(tags, "access", "private") {
        Some("Private".to_string())
    } else {
        None
    };

    let fee = if tag_is(tags, "fee", "yes") {
        Some("Fee may apply".to_string())
    } else {
        None
    };

    let properties = PoiProperties {
        name,
        site_type: poi_type,
        state: tag(tags, "addr:state").unwrap_or("").to_string(),
        source: OSM_SOURCE.to_string(),
        osm_id: element.get("id").and_then(Value::as_i64),
        access,
        fee,
        operator: tag(tags, "operator").map(str::to_string),
    };

    Some(Feature::point(lon, lat, properties))
}

fn default_poi_name(tags: &Value, poi_type: SiteType) -> String {
    match poi_type {
        SiteType::Dump => {
            let tourism = tag(tags, "tourism");
            if matches!(tourism, Some("camp_site") | Some("caravan_site")) {
                "Campground with Dump Station".to_string()
            } else {
                "Dump Station".to_string()
            }
        }
        SiteType::Propane => "Propane Fill Station".to_string(),
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_coords() {
        let node = json!({"type": "node", "id": 1, "lat": 44.1, "lon": -110.2});
        assert_eq!(element_coords(&node), Some((-110.2, 44.1)));
    }

    #[test]
    fn test_way_uses_center() {
        let way = json!({"type": "way", "id": 2, "center": {"lat": 44.1, "lon": -110.2}});
        assert_eq!(element_coords(&way), Some((-110.2, 44.1)));

        let bare_way = json!({"type": "way", "id": 3});
        assert_eq!(element_coords(&bare_way), None);
    }

    #[test]
    fn test_zeroed_coords_rejected() {
        let node = json!({"type": "node", "id": 4, "lat": 0.0, "lon": 0.0});
        assert_eq!(element_coords(&node), None);
    }

    #[test]
    fn test_campsite_feature_mapping() {
        let element = json!({
            "type": "node",
            "id": 100200,
            "lat": 46.9,
            "lon": -110.0,
            "tags": {
                "tourism": "camp_site",
                "name": "Elk Creek Camp",
                "toilets": "yes",
                "drinking_water": "yes",
                "tents": "yes",
                "caravans": "yes",
                "fee": "no"
            }
        });
        let feature = campsite_feature(&element, "MT", 5).unwrap();
        let props = feature.properties;
        assert_eq!(props.id, "MT-005");
        assert_eq!(props.name, "Elk Creek Camp");
        assert_eq!(props.site_type, SiteType::Established);
        assert_eq!(props.cost, 0);
        assert_eq!(props.amenities, vec![Amenity::Toilets, Amenity::Water]);
        assert_eq!(props.rig_friendly, vec![RigType::Tent, RigType::Rv, RigType::Trailer]);
        assert_eq!(props.osm_id, Some(100200));
        assert_eq!(props.source, "openstreetmap");
    }

    #[test]
    fn test_unnamed_campsite_gets_filterable_label() {
        let element = json!({"type": "node", "id": 7, "lat": 46.9, "lon": -110.0, "tags": {}});
        let feature = campsite_feature(&element, "MT", 1).unwrap();
        assert_eq!(feature.properties.name, "Unnamed Site (OSM)");
    }

    #[test]
    fn test_tent_only_site_is_backcountry_with_fee_fallback() {
        let element = json!({
            "type": "node",
            "id": 8,
            "lat": 46.9,
            "lon": -110.0,
            "tags": {"tents": "yes", "fee": "yes"}
        });
        let props = campsite_feature(&element, "MT", 1).unwrap().properties;
        assert_eq!(props.site_type, SiteType::Backcountry);
        assert_eq!(props.cost, 15);
    }

    #[test]
    fn test_dump_poi_access_and_fee_labels() {
        let element = json!({
            "type": "node",
            "id": 9,
            "lat": 41.0,
            "lon": -96.0,
            "tags": {
                "tourism": "camp_site",
                "sanitary_dump_station": "customers",
                "fee": "yes",
                "operator": "Riverside RV Park",
                "addr:state": "NE"
            }
        });
        let props = poi_feature(&element, SiteType::Dump).unwrap().properties;
        assert_eq!(props.name, "Riverside RV Park");
        assert_eq!(props.access.as_deref(), Some("Customers only"));
        assert_eq!(props.fee.as_deref(), Some("Fee may apply"));
        assert_eq!(props.state, "NE");
        assert_eq!(props.operator.as_deref(), Some("Riverside RV Park"));
    }

    #[test]
    fn test_unnamed_dump_station_fallback_names() {
        let standalone = json!({
            "type": "node", "id": 10, "lat": 41.0, "lon": -96.0,
            "tags": {"amenity": "sanitary_dump_station"}
        });
        let props = poi_feature(&standalone, SiteType::Dump).unwrap().properties;
        assert_eq!(props.name, "Dump Station");

        let campground = json!({
            "type": "node", "id": 11, "lat": 41.0, "lon": -96.0,
            "tags": {"tourism": "camp_site", "sanitary_dump_station": "yes"}
        });
        let props = poi_feature(&campground, SiteType::Dump).unwrap().properties;
        assert_eq!(props.name, "Campground with Dump Station");
    }
}
