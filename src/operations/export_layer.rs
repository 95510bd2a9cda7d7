use crate::error::Result;
use crate::geometry::geojson::{Feature, FeatureCollection, FeatureProperties, Geometry};
use crate::layers::LayerStore;

/// Serializes the finished polygon layer as a GeoJSON feature collection.
///
/// The collection carries the legacy `crs` member naming EPSG:4269; each
/// feature carries its `zipcode` and `geocode` properties.
pub struct ExportPolygonLayer {
    geocode: Option<String>,
}

impl ExportPolygonLayer {
    /// Exports the whole polygon layer.
    #[must_use]
    pub fn all() -> Self {
        Self { geocode: None }
    }

    /// Exports only the polygons built for one region.
    #[must_use]
    pub fn for_region(geocode: impl Into<String>) -> Self {
        Self {
            geocode: Some(geocode.into()),
        }
    }

    /// Executes the export, returning the serialized collection.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn execute(&self, store: &LayerStore) -> Result<String> {
        let features = store
            .polygons()
            .into_iter()
            .filter(|record| {
                self.geocode
                    .as_ref()
                    .is_none_or(|geocode| record.geocode == *geocode)
            })
            .map(|record| {
                Feature::new(
                    FeatureProperties {
                        zipcode: Some(record.zipcode.clone()),
                        geocode: Some(record.geocode.clone()),
                    },
                    Geometry::from(&record.geometry),
                )
            })
            .collect();

        Ok(serde_json::to_string(&FeatureCollection::new(features))?)
    }
}
