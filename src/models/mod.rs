//! Core data models for the nearest-location system.

pub mod location;
pub mod record;

pub use location::{Location, NearestMatch};
pub use record::{AnnotatedRecord, GeoPos, WallRecord};
