//! Uploaded wall-photo records as exported from the document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NearestMatch;

/// Geolocation pair captured with an uploaded photo.
///
/// Exports spell the fields either as plain `lat`/`long` or with the
/// SDK's `_lat`/`_long` spelling; both are accepted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPos {
    #[serde(alias = "_lat")]
    pub lat: f64,
    #[serde(alias = "_long")]
    pub long: f64,
}

/// One uploaded wall-painting record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallRecord {
    /// Contractor e-mail the upload belongs to
    pub email: String,

    /// Approval flag set by a manager
    #[serde(default)]
    pub approved: bool,

    /// Storage paths of the uploaded photos
    #[serde(default, rename = "imageid")]
    pub image_paths: Vec<String>,

    /// Where the photos were taken, if the device captured it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPos>,
}

/// A wall record enriched with its nearest catalog location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    #[serde(flatten)]
    pub record: WallRecord,

    /// Nearest known site, absent when the record carries no usable
    /// geolocation or the catalog is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest: Option<NearestMatch>,

    /// Annotation timestamp for refresh tracking
    pub annotated_at: DateTime<Utc>,
}
