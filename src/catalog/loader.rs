//! Catalog loading from static reference artifacts.
//!
//! The catalog ships as a JSON document in production (the shape the
//! dashboards bundle), with TOML and CSV renditions accepted for
//! hand-maintained site lists. Entries with unusable coordinates are
//! excluded from the load, not fatal.

use std::fs;
use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::Location;

/// Errors reading or parsing a catalog artifact.
///
/// Individual bad entries are not errors; they are excluded with a
/// warning during validation.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read CSV catalog: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV catalog is missing column '{0}'")]
    MissingColumn(&'static str),

    #[error("unsupported catalog format '{0}' (expected json, toml, or csv)")]
    UnsupportedFormat(String),
}

/// Raw catalog entry as it appears in the artifact.
///
/// Coordinates may be numbers or numeric strings depending on how the
/// artifact was exported.
#[derive(Debug, Deserialize)]
pub struct RawLocation {
    #[serde(alias = "Address")]
    pub address: String,

    #[serde(alias = "Latitude")]
    pub latitude: CoordField,

    #[serde(alias = "Longitude")]
    pub longitude: CoordField,
}

/// A coordinate spelled as either a number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CoordField {
    Number(f64),
    Text(String),
}

impl CoordField {
    /// The coordinate as a finite f64, or `None` for anything unusable.
    fn parse(&self) -> Option<f64> {
        let value = match self {
            CoordField::Number(n) => *n,
            CoordField::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// JSON artifact shape: the bundled `{"locations": [...]}` document or a
/// bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Wrapped { locations: Vec<RawLocation> },
    Bare(Vec<RawLocation>),
}

/// TOML artifact shape: `[[locations]]` tables.
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    locations: Vec<RawLocation>,
}

/// Load and validate the location catalog, dispatching on file extension.
pub fn load_catalog(path: &Path) -> Result<Vec<Location>, CatalogError> {
    info!("Loading location catalog from {}", path.display());

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "json" => {
            let content = fs::read_to_string(path)?;
            match serde_json::from_str::<JsonCatalog>(&content)? {
                JsonCatalog::Wrapped { locations } => locations,
                JsonCatalog::Bare(locations) => locations,
            }
        }
        "toml" => {
            let content = fs::read_to_string(path)?;
            toml::from_str::<TomlCatalog>(&content)?.locations
        }
        "csv" => read_csv(path)?,
        other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
    };

    let locations = validate_entries(raw);
    info!("Loaded {} catalog locations", locations.len());
    Ok(locations)
}

/// Parse raw entries into validated locations, preserving artifact order.
///
/// Entries whose coordinates cannot be parsed as finite numbers are a
/// configuration defect: logged and excluded, never fatal.
pub fn validate_entries(raw: Vec<RawLocation>) -> Vec<Location> {
    let mut locations = Vec::with_capacity(raw.len());

    for (pos, entry) in raw.into_iter().enumerate() {
        match (entry.latitude.parse(), entry.longitude.parse()) {
            (Some(latitude), Some(longitude)) => locations.push(Location {
                address: entry.address,
                latitude,
                longitude,
            }),
            _ => warn!(
                "Skipping catalog entry {} ('{}'): unparseable coordinates",
                pos, entry.address
            ),
        }
    }

    locations
}

/// Read a CSV catalog, locating columns by header name.
fn read_csv(path: &Path) -> Result<Vec<RawLocation>, CatalogError> {
    let file = File::open(path)?;
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let headers = csv_reader.headers()?.clone();

    let address_idx = find_column(&headers, "address")?;
    let latitude_idx = find_column(&headers, "latitude")?;
    let longitude_idx = find_column(&headers, "longitude")?;

    let mut raw = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        raw.push(RawLocation {
            address: record.get(address_idx).unwrap_or("").to_string(),
            latitude: CoordField::Text(record.get(latitude_idx).unwrap_or("").to_string()),
            longitude: CoordField::Text(record.get(longitude_idx).unwrap_or("").to_string()),
        });
    }

    Ok(raw)
}

fn find_column(
    headers: &csv::StringRecord,
    name: &'static str,
) -> Result<usize, CatalogError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or(CatalogError::MissingColumn(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_wrapped_with_string_coordinates() {
        // The shape the dashboards bundle
        let content = r#"{
            "locations": [
                {"Address": "Gateway of India", "Latitude": "18.9220", "Longitude": "72.8347"},
                {"Address": "Bandra Fort", "Latitude": "19.0428", "Longitude": "72.8190"}
            ]
        }"#;
        let parsed: JsonCatalog = serde_json::from_str(content).unwrap();
        let raw = match parsed {
            JsonCatalog::Wrapped { locations } => locations,
            JsonCatalog::Bare(locations) => locations,
        };
        let locations = validate_entries(raw);

        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].address, "Gateway of India");
        assert!((locations[0].latitude - 18.9220).abs() < 1e-9);
        assert!((locations[1].longitude - 72.8190).abs() < 1e-9);
    }

    #[test]
    fn test_json_bare_array_with_numeric_coordinates() {
        let content = r#"[
            {"address": "A", "latitude": 0.0, "longitude": 0.0},
            {"address": "B", "latitude": 0.0, "longitude": 1.0}
        ]"#;
        let parsed: JsonCatalog = serde_json::from_str(content).unwrap();
        let raw = match parsed {
            JsonCatalog::Wrapped { locations } => locations,
            JsonCatalog::Bare(locations) => locations,
        };
        let locations = validate_entries(raw);

        assert_eq!(locations.len(), 2);
        assert_eq!(locations[1].address, "B");
    }

    #[test]
    fn test_unparseable_entries_are_excluded() {
        let raw = vec![
            RawLocation {
                address: "good".to_string(),
                latitude: CoordField::Text("19.0760".to_string()),
                longitude: CoordField::Text("72.8777".to_string()),
            },
            RawLocation {
                address: "not a number".to_string(),
                latitude: CoordField::Text("abc".to_string()),
                longitude: CoordField::Text("72.0".to_string()),
            },
            RawLocation {
                address: "nan sneaks in as text".to_string(),
                latitude: CoordField::Text("NaN".to_string()),
                longitude: CoordField::Text("72.0".to_string()),
            },
            RawLocation {
                address: "empty".to_string(),
                latitude: CoordField::Text(String::new()),
                longitude: CoordField::Text(String::new()),
            },
        ];

        let locations = validate_entries(raw);
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].address, "good");
    }

    #[test]
    fn test_load_csv_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        fs::write(
            &path,
            "Address,Latitude,Longitude\n\
             Gateway of India,18.9220,72.8347\n\
             bad row,not-a-latitude,72.0\n",
        )
        .unwrap();

        let locations = load_catalog(&path).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].address, "Gateway of India");
    }

    #[test]
    fn test_csv_missing_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        fs::write(&path, "Address,Latitude\nGateway of India,18.9220\n").unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn("longitude")));
    }

    #[test]
    fn test_load_toml_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(
            &path,
            "[[locations]]\n\
             address = \"Gateway of India\"\n\
             latitude = 18.9220\n\
             longitude = 72.8347\n",
        )
        .unwrap();

        let locations = load_catalog(&path).unwrap();
        assert_eq!(locations.len(), 1);
        assert!((locations[0].latitude - 18.9220).abs() < 1e-9);
    }

    #[test]
    fn test_unsupported_format() {
        let err = load_catalog(Path::new("catalog.xml")).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(ref ext) if ext == "xml"));
    }
}
