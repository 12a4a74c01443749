use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::BoundaryError;
use crate::models::CenterPoint;

/// One ring of a polygon: `[lng, lat]` vertices in GeoJSON order.
pub type Ring = Vec<[f64; 2]>;

/// Boundary geometry as an explicit tagged union.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// One polygon; the first ring is the outer boundary, the rest are holes.
    Polygon(Vec<Ring>),
    /// An ordered sequence of polygons, each a sequence of rings.
    MultiPolygon(Vec<Vec<Ring>>),
}

/// A named geographic region loaded from the boundary document.
///
/// Immutable once loaded; held for the session's duration.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub name: String,
    pub iso_a3: Option<String>,
    pub adm0_a3: Option<String>,
    pub iso_a2: Option<String>,
    /// Authoritative label coordinates, when the source provides them.
    pub label_point: Option<CenterPoint>,
    pub geometry: Geometry,
}

impl BoundaryFeature {
    /// Best identifier code for joining against the remote store:
    /// ISO_A3, then ADM0_A3, then ISO_A2.
    pub fn country_code(&self) -> Option<&str> {
        self.iso_a3
            .as_deref()
            .or(self.adm0_a3.as_deref())
            .or(self.iso_a2.as_deref())
    }
}

#[derive(Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Map<String, Value>,
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    #[serde(other)]
    Unsupported,
}

/// Read a property as a non-placeholder string. Natural Earth uses "-99"
/// where a code is unknown.
fn prop_str(properties: &Map<String, Value>, key: &str) -> Option<String> {
    properties
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty() && *s != "-99")
        .map(str::to_owned)
}

fn prop_f64(properties: &Map<String, Value>, key: &str) -> Option<f64> {
    properties.get(key).and_then(Value::as_f64)
}

/// Label coordinates under either recognized key convention: `LAT`/`LONG`
/// first, then `LABEL_Y`/`LABEL_X`.
fn label_point(properties: &Map<String, Value>) -> Option<CenterPoint> {
    if let (Some(lat), Some(lng)) = (prop_f64(properties, "LAT"), prop_f64(properties, "LONG")) {
        return Some(CenterPoint::new(lat, lng));
    }
    if let (Some(lat), Some(lng)) = (
        prop_f64(properties, "LABEL_Y"),
        prop_f64(properties, "LABEL_X"),
    ) {
        return Some(CenterPoint::new(lat, lng));
    }
    None
}

/// Parse a GeoJSON FeatureCollection into boundary features.
///
/// Features with an unsupported or missing geometry are skipped with a
/// diagnostic; the document itself failing to parse is an error.
pub fn load_boundaries(reader: impl Read) -> Result<Vec<BoundaryFeature>, BoundaryError> {
    let collection: RawCollection = serde_json::from_reader(reader)?;

    let mut features = Vec::with_capacity(collection.features.len());
    for raw in collection.features {
        let name = prop_str(&raw.properties, "ADMIN")
            .or_else(|| prop_str(&raw.properties, "NAME"))
            .unwrap_or_else(|| "Unknown".to_string());

        let geometry = match raw.geometry {
            Some(RawGeometry::Polygon { coordinates }) => Geometry::Polygon(coordinates),
            Some(RawGeometry::MultiPolygon { coordinates }) => Geometry::MultiPolygon(coordinates),
            Some(RawGeometry::Unsupported) | None => {
                tracing::warn!("Skipping feature '{}' with unsupported geometry", name);
                continue;
            }
        };

        features.push(BoundaryFeature {
            iso_a3: prop_str(&raw.properties, "ISO_A3"),
            adm0_a3: prop_str(&raw.properties, "ADM0_A3"),
            iso_a2: prop_str(&raw.properties, "ISO_A2"),
            label_point: label_point(&raw.properties),
            name,
            geometry,
        });
    }

    Ok(features)
}

/// Load boundary features from a GeoJSON file on disk.
pub fn load_boundaries_from_path(path: impl AsRef<Path>) -> Result<Vec<BoundaryFeature>, BoundaryError> {
    let file = File::open(path)?;
    load_boundaries(BufReader::new(file))
}

/// Names of features that carry no usable identifier code and therefore
/// cannot be joined against the remote store.
pub fn features_missing_codes(features: &[BoundaryFeature]) -> Vec<&str> {
    features
        .iter()
        .filter(|f| f.country_code().is_none())
        .map(|f| f.name.as_str())
        .collect()
}
