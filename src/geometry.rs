use crate::boundaries::{BoundaryFeature, Geometry, Ring};
use crate::error::GeometryError;
use crate::models::CenterPoint;

/// Saturation applied to every derived region color, in percent.
pub const COLOR_SATURATION: u8 = 70;
/// Lightness applied to every derived region color, in percent.
pub const COLOR_LIGHTNESS: u8 = 50;

/// Derived colors stay inside [0, 60) degrees of hue so all regions read as
/// related warm tones instead of spanning the full color wheel.
const HUE_BAND: i32 = 60;

/// Camera altitude bounds for [`compute_view_distance`], in globe radii.
pub const MIN_VIEW_ALTITUDE: f64 = 0.5;
pub const MAX_VIEW_ALTITUDE: f64 = 2.5;

/// A display color in hue/saturation/lightness form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HslColor {
    /// Hue in degrees, always in [0, 60).
    pub hue: u16,
    /// Saturation in percent.
    pub saturation: u8,
    /// Lightness in percent.
    pub lightness: u8,
}

impl std::fmt::Display for HslColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Derive a stable display color from a region name.
///
/// Accumulates a 31-multiplier polynomial hash over the name's UTF-16 code
/// units with 32-bit wrapping arithmetic, then reduces it to a hue in the
/// warm band. Pure: the same name always yields the same color, across calls
/// and processes. The empty string hashes to 0 and yields hue 0.
pub fn derive_color(name: &str) -> HslColor {
    let mut hash: i32 = 0;
    for code in name.encode_utf16() {
        hash = (code as i32).wrapping_add((hash << 5).wrapping_sub(hash));
    }

    HslColor {
        hue: (hash % HUE_BAND).unsigned_abs() as u16,
        saturation: COLOR_SATURATION,
        lightness: COLOR_LIGHTNESS,
    }
}

/// Running bounding box over boundary vertices.
struct Bounds {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
    vertices: usize,
}

impl Bounds {
    fn new() -> Self {
        Self {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lng: f64::INFINITY,
            max_lng: f64::NEG_INFINITY,
            vertices: 0,
        }
    }

    fn update(&mut self, ring: &Ring) {
        for &[lng, lat] in ring {
            self.min_lat = self.min_lat.min(lat);
            self.max_lat = self.max_lat.max(lat);
            self.min_lng = self.min_lng.min(lng);
            self.max_lng = self.max_lng.max(lng);
            self.vertices += 1;
        }
    }

    /// Larger of the latitude and longitude spans, in degrees.
    fn max_span(&self) -> f64 {
        (self.max_lat - self.min_lat).max(self.max_lng - self.min_lng)
    }
}

/// Scan every vertex of every ring of every sub-polygon.
fn feature_bounds(feature: &BoundaryFeature) -> Result<Bounds, GeometryError> {
    let mut bounds = Bounds::new();

    match &feature.geometry {
        Geometry::Polygon(rings) => {
            for ring in rings {
                bounds.update(ring);
            }
        }
        Geometry::MultiPolygon(polygons) => {
            for polygon in polygons {
                for ring in polygon {
                    bounds.update(ring);
                }
            }
        }
    }

    if bounds.vertices == 0 {
        return Err(GeometryError::EmptyGeometry(feature.name.clone()));
    }
    Ok(bounds)
}

/// Representative center point for a boundary feature.
///
/// Prefers the source's label coordinates when present, returning them
/// verbatim; otherwise the midpoint of the geometry's bounding box. A
/// feature with no vertices is an error: a silently wrong center would
/// mis-point the camera with no visible failure.
pub fn compute_center(feature: &BoundaryFeature) -> Result<CenterPoint, GeometryError> {
    if let Some(point) = feature.label_point {
        return Ok(point);
    }

    let bounds = feature_bounds(feature)?;
    Ok(CenterPoint::new(
        (bounds.min_lat + bounds.max_lat) / 2.0,
        (bounds.min_lng + bounds.max_lng) / 2.0,
    ))
}

/// Camera altitude for framing a boundary feature, in globe radii.
///
/// Scales linearly with the feature's bounding-box span so small and large
/// regions both fill the viewport: a 60-degree span lands at 1.5, with the
/// result clamped to [`MIN_VIEW_ALTITUDE`, `MAX_VIEW_ALTITUDE`].
pub fn compute_view_distance(feature: &BoundaryFeature) -> Result<f64, GeometryError> {
    let span = feature_bounds(feature)?.max_span();
    Ok((span / 40.0).clamp(MIN_VIEW_ALTITUDE, MAX_VIEW_ALTITUDE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_feature(size: f64) -> BoundaryFeature {
        BoundaryFeature {
            name: "Square".to_string(),
            iso_a3: Some("SQR".to_string()),
            adm0_a3: None,
            iso_a2: None,
            label_point: None,
            geometry: Geometry::Polygon(vec![vec![
                [0.0, 0.0],
                [0.0, size],
                [size, size],
                [size, 0.0],
            ]]),
        }
    }

    #[test]
    fn test_derive_color_is_deterministic() {
        let a = derive_color("France");
        let b = derive_color("France");
        assert_eq!(a, b);
        assert_ne!(derive_color("France"), derive_color("Germany"));
    }

    #[test]
    fn test_derive_color_hue_stays_in_band() {
        for name in ["France", "Germany", "日本", "Åland", "a very long country name indeed"] {
            let color = derive_color(name);
            assert!(color.hue < 60, "hue {} out of band for {}", color.hue, name);
            assert_eq!(color.saturation, 70);
            assert_eq!(color.lightness, 50);
        }
    }

    #[test]
    fn test_derive_color_empty_string_is_hue_zero() {
        assert_eq!(derive_color("").hue, 0);
    }

    #[test]
    fn test_derive_color_single_char_matches_char_code() {
        // Hash of a one-character string is its code unit.
        assert_eq!(derive_color("A").hue, 65 % 60);
        assert_eq!(derive_color("a").hue, 97 % 60);
    }

    #[test]
    fn test_derive_color_display() {
        let color = derive_color("A");
        assert_eq!(color.to_string(), "hsl(5, 70%, 50%)");
    }

    #[test]
    fn test_compute_center_bounding_box_midpoint() {
        let center = compute_center(&square_feature(10.0)).unwrap();
        assert_eq!(center, CenterPoint::new(5.0, 5.0));
    }

    #[test]
    fn test_compute_center_prefers_label_point() {
        let mut feature = square_feature(10.0);
        feature.label_point = Some(CenterPoint::new(48.86, 2.35));

        let center = compute_center(&feature).unwrap();
        assert_eq!(center, CenterPoint::new(48.86, 2.35));
    }

    #[test]
    fn test_compute_center_scans_all_sub_polygons() {
        let feature = BoundaryFeature {
            name: "Archipelago".to_string(),
            iso_a3: None,
            adm0_a3: None,
            iso_a2: None,
            label_point: None,
            geometry: Geometry::MultiPolygon(vec![
                vec![vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0]]],
                vec![vec![[8.0, 8.0], [10.0, 8.0], [10.0, 10.0]]],
            ]),
        };

        let center = compute_center(&feature).unwrap();
        assert_eq!(center, CenterPoint::new(5.0, 5.0));
    }

    #[test]
    fn test_compute_center_empty_geometry_fails() {
        let feature = BoundaryFeature {
            name: "Nowhere".to_string(),
            iso_a3: None,
            adm0_a3: None,
            iso_a2: None,
            label_point: None,
            geometry: Geometry::Polygon(vec![]),
        };

        assert_eq!(
            compute_center(&feature),
            Err(GeometryError::EmptyGeometry("Nowhere".to_string()))
        );
    }

    #[test]
    fn test_view_distance_monotonic_in_span() {
        let small = compute_view_distance(&square_feature(25.0)).unwrap();
        let medium = compute_view_distance(&square_feature(40.0)).unwrap();
        let large = compute_view_distance(&square_feature(60.0)).unwrap();

        assert!(small < medium);
        assert!(medium < large);
        assert!((large - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_view_distance_clamped() {
        let tiny = compute_view_distance(&square_feature(0.001)).unwrap();
        assert_eq!(tiny, MIN_VIEW_ALTITUDE);

        let huge = compute_view_distance(&square_feature(179.0)).unwrap();
        assert_eq!(huge, MAX_VIEW_ALTITUDE);
    }

    #[test]
    fn test_view_distance_ignores_label_point() {
        let mut feature = square_feature(60.0);
        feature.label_point = Some(CenterPoint::new(0.0, 0.0));

        // Distance comes from the geometry span even when a label point exists.
        let distance = compute_view_distance(&feature).unwrap();
        assert!((distance - 1.5).abs() < 1e-9);
    }
}
