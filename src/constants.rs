/// Source name constants to keep provenance tags consistent across the codebase.
/// These values end up in the `source` property of every persisted feature and
/// in the `source` field of `index.json`.

// Provenance tags, one per upstream system
pub const RIDB_SOURCE: &str = "recreation.gov";
pub const CAMPFLARE_SOURCE: &str = "campflare";
pub const OSM_SOURCE: &str = "openstreetmap";

// Output directory names under the data root, one per upstream source
pub const CAMPSITES_DIR: &str = "campsites";
pub const OPENCAMPINGMAP_DIR: &str = "opencampingmap";

// File name of the aggregated POI layer (dump/water/propane)
pub const POI_FILE: &str = "poi_dump_water_propane.geojson";

// Schema version stamped into index.json
pub const DATA_VERSION: &str = "2.0";

// Cost estimate applied when a fee description exists but no amount parses
pub const DEFAULT_FEE_ESTIMATE: u32 = 15;

// RIDB activity id for camping
pub const CAMPING_ACTIVITY_ID: u32 = 9;

// Environment variable fallbacks for the --api-key flags
pub const RIDB_API_KEY_ENV: &str = "RIDB_API_KEY";
pub const CAMPFLARE_API_KEY_ENV: &str = "CAMPFLARE_API_KEY";
