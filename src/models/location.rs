//! Catalog location types shared by the annotate and query binaries.

use serde::{Deserialize, Serialize};

/// A known wall site from the reference catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Human-readable address label
    pub address: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// Result of a nearest-location lookup.
///
/// Carries the winning catalog entry by value so callers never hold a
/// reference into the catalog, plus the great-circle distance to the
/// query point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestMatch {
    #[serde(flatten)]
    pub location: Location,
    /// Distance from the query point in kilometers
    pub distance_km: f64,
}
