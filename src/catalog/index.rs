//! Nearest-match index over the location catalog.

use tracing::info;

use super::distance::haversine_km;
use crate::models::{Location, NearestMatch};

/// Read-only nearest-match index over the known wall sites.
///
/// Lookups are a linear scan; catalogs stay in the tens-to-hundreds
/// range where a spatial index would not pay for itself. The catalog is
/// never mutated after construction, so the index can be shared across
/// threads without locks.
pub struct LocationIndex {
    locations: Vec<Location>,
}

impl LocationIndex {
    /// Build the index from validated catalog entries, preserving order.
    pub fn new(locations: Vec<Location>) -> Self {
        info!("Location index ready with {} entries", locations.len());
        Self { locations }
    }

    /// Find the catalog entry nearest to a query point.
    ///
    /// Returns `None` when the catalog is empty or either coordinate is
    /// not finite. Ties go to the earliest catalog entry: only a
    /// strictly smaller distance replaces the current best.
    pub fn find_nearest(&self, lat: f64, lon: f64) -> Option<NearestMatch> {
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }

        let mut best: Option<NearestMatch> = None;

        for location in &self.locations {
            let distance_km = haversine_km(lat, lon, location.latitude, location.longitude);
            let closer = match &best {
                Some(current) => distance_km < current.distance_km,
                None => true,
            };
            if closer {
                best = Some(NearestMatch {
                    location: location.clone(),
                    distance_km,
                });
            }
        }

        best
    }

    /// Catalog entries in load order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Number of indexed locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
