//! Single source of truth for the quality-filter and audit keyword lists.
//! Plain data, shared by the `clean` and `audit` commands so the two can
//! never disagree about what counts as junk.

/// Names containing any of these (case-insensitive) are test/placeholder
/// entries regardless of their other fields.
pub const PLACEHOLDER_KEYWORDS: &[&str] = &[
    "staff row",
    "commie row",
    "armstrong mcdonald",
    "staff showerhouse",
    "sample campsite",
    "sample campground",
    "sample meadow",
    "test site",
    "whitestar campground", // known test entry
    "placeholder",
    "example",
    "dummy",
    "fake",
    "lorem ipsum",
];

/// Generic names that carry no information; compared after case-folding
/// and trimming, exact match only.
pub const GENERIC_NAMES: &[&str] = &[
    "unnamed site",
    "unnamed site (osm)",
    "unnamed campsite",
    "no name",
    "untitled",
    "unknown",
    "site",
    "campsite",
    "camping",
];

/// Type values (case-folded, trimmed) that disqualify an entry.
pub const BAD_TYPES: &[&str] = &["", "none", "unknown", "undefined"];

/// Coordinates of known test-data sites, as `[lon, lat]`.
pub const PLACEHOLDER_COORDS: &[[f64; 2]] = &[
    [-96.5867918, 41.4314415], // Staff Row (NE/IA)
    [-96.5860439, 41.4310916], // Commie Row (NE/IA)
    [-96.5853365, 41.4311546], // Armstrong McDonald (NE/IA)
    [-91.2815206, 44.057368],  // Staff Row (WI/MN)
];

/// Absolute per-axis tolerance for coordinate matching, roughly 11 m.
pub const COORD_TOLERANCE: f64 = 1e-4;
