//! Banyan - nearest-location annotation for wall-painting photo records
//!
//! This library provides shared types and modules for the annotate and query binaries.

pub mod catalog;
pub mod models;

pub use models::{AnnotatedRecord, GeoPos, Location, NearestMatch, WallRecord};
