use crate::geometry::geojson::{Feature, Geometry};
use crate::geometry::Polyline;

slotmap::new_key_type! {
    /// Unique identifier for a line feature in the layer store.
    pub struct FeatureId;
}

/// A road-network line feature with postal attribution.
///
/// Read-only source data: supplied by an external import step, never
/// mutated by the polygon builder.
#[derive(Debug, Clone)]
pub struct LineFeatureData {
    /// ZIP code attributed to the feature, if any.
    pub zipcode: Option<String>,
    /// Administrative region the feature was sourced for.
    pub geocode: String,
    /// The centerline geometry.
    pub geometry: Polyline,
}

impl LineFeatureData {
    /// Creates a new line feature.
    #[must_use]
    pub fn new(zipcode: Option<String>, geocode: impl Into<String>, geometry: Polyline) -> Self {
        Self {
            zipcode,
            geocode: geocode.into(),
            geometry,
        }
    }

    /// Builds a line feature from an imported GeoJSON feature.
    ///
    /// Returns `None` for non-line geometries. The feature's own geocode
    /// property wins over `default_geocode`.
    #[must_use]
    pub fn from_feature(feature: &Feature, default_geocode: &str) -> Option<Self> {
        let Geometry::LineString { coordinates } = &feature.geometry else {
            return None;
        };
        let geocode = feature
            .properties
            .geocode
            .clone()
            .unwrap_or_else(|| default_geocode.to_owned());
        Some(Self {
            zipcode: feature.properties.zipcode.clone(),
            geocode,
            geometry: Polyline::from_coordinates(coordinates),
        })
    }

    /// Arc length of the centerline.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.geometry.length()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::geojson::FeatureProperties;

    fn line_feature(zipcode: Option<&str>, geocode: Option<&str>) -> Feature {
        Feature::new(
            FeatureProperties {
                zipcode: zipcode.map(str::to_owned),
                geocode: geocode.map(str::to_owned),
            },
            Geometry::LineString {
                coordinates: vec![[-84.4, 33.7], [-84.3, 33.8]],
            },
        )
    }

    #[test]
    fn imports_line_string_features() {
        let imported =
            LineFeatureData::from_feature(&line_feature(Some("30301"), None), "13121").unwrap();
        assert_eq!(imported.zipcode.as_deref(), Some("30301"));
        assert_eq!(imported.geocode, "13121");
        assert_eq!(imported.geometry.points.len(), 2);
    }

    #[test]
    fn feature_geocode_wins_over_default() {
        let imported =
            LineFeatureData::from_feature(&line_feature(None, Some("13089")), "13121").unwrap();
        assert_eq!(imported.geocode, "13089");
        assert!(imported.zipcode.is_none());
    }

    #[test]
    fn non_line_geometry_is_skipped() {
        let feature = Feature::new(
            FeatureProperties::default(),
            Geometry::MultiPoint {
                coordinates: vec![[0.0, 0.0]],
            },
        );
        assert!(LineFeatureData::from_feature(&feature, "13121").is_none());
    }
}
