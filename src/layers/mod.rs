pub mod feature;
pub mod point;
pub mod polygon;

pub use feature::{FeatureId, LineFeatureData};
pub use point::{BoundaryPointData, PointId, SamplePosition, SampleSide, SampleTag};
pub use polygon::{PolygonId, ZipPolygonData};

use std::collections::{BTreeMap, HashMap, HashSet};

use slotmap::SlotMap;

use crate::error::LayerError;
use crate::geometry::PointCollection;

/// Central arena that owns all layer records: source line features,
/// sampled boundary points, and the output polygon layer.
///
/// Records reference each other via typed IDs (generational indices).
/// The polygon layer additionally maintains a unique ZIP code index:
/// insertion is the only mutation, and a second insert for the same code
/// is an error, never an overwrite.
#[derive(Debug, Default)]
pub struct LayerStore {
    features: SlotMap<FeatureId, LineFeatureData>,
    points: SlotMap<PointId, BoundaryPointData>,
    polygons: SlotMap<PolygonId, ZipPolygonData>,
    polygon_index: HashMap<String, PolygonId>,
}

impl LayerStore {
    /// Creates a new, empty layer store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Line feature layer ---

    /// Inserts a line feature and returns its ID.
    pub fn add_feature(&mut self, data: LineFeatureData) -> FeatureId {
        self.features.insert(data)
    }

    /// Returns a reference to the feature data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not found in the store.
    pub fn feature(&self, id: FeatureId) -> Result<&LineFeatureData, LayerError> {
        self.features
            .get(id)
            .ok_or_else(|| LayerError::EntityNotFound("feature".into()))
    }

    /// IDs of all line features sourced for a region.
    #[must_use]
    pub fn features_in(&self, geocode: &str) -> Vec<FeatureId> {
        self.features
            .iter()
            .filter(|(_, f)| f.geocode == geocode)
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of stored line features.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    // --- Boundary point layer ---

    /// Inserts a boundary point and returns its ID.
    pub fn add_point(&mut self, data: BoundaryPointData) -> PointId {
        self.points.insert(data)
    }

    /// Returns a reference to the point data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not found in the store.
    pub fn point(&self, id: PointId) -> Result<&BoundaryPointData, LayerError> {
        self.points
            .get(id)
            .ok_or_else(|| LayerError::EntityNotFound("point".into()))
    }

    /// Number of stored boundary points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    // --- ZIP polygon layer ---

    /// Whether a polygon is already stored for the ZIP code.
    #[must_use]
    pub fn has_polygon(&self, zipcode: &str) -> bool {
        self.polygon_index.contains_key(zipcode)
    }

    /// Inserts a polygon record, enforcing at-most-one per ZIP code.
    ///
    /// # Errors
    ///
    /// Returns `LayerError::DuplicateZipcode` if the code already has a
    /// stored polygon.
    pub fn insert_polygon(&mut self, data: ZipPolygonData) -> Result<PolygonId, LayerError> {
        if self.polygon_index.contains_key(&data.zipcode) {
            return Err(LayerError::DuplicateZipcode(data.zipcode));
        }
        let zipcode = data.zipcode.clone();
        let id = self.polygons.insert(data);
        self.polygon_index.insert(zipcode, id);
        Ok(id)
    }

    /// Returns a reference to the polygon data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not found in the store.
    pub fn polygon(&self, id: PolygonId) -> Result<&ZipPolygonData, LayerError> {
        self.polygons
            .get(id)
            .ok_or_else(|| LayerError::EntityNotFound("polygon".into()))
    }

    /// The stored polygon for a ZIP code, if any.
    #[must_use]
    pub fn polygon_for(&self, zipcode: &str) -> Option<&ZipPolygonData> {
        self.polygon_index
            .get(zipcode)
            .and_then(|id| self.polygons.get(*id))
    }

    /// All stored polygons, in ZIP code order.
    #[must_use]
    pub fn polygons(&self) -> Vec<&ZipPolygonData> {
        let mut all: Vec<&ZipPolygonData> = self.polygons.values().collect();
        all.sort_by(|a, b| a.zipcode.cmp(&b.zipcode));
        all
    }

    /// Number of stored polygons.
    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    // --- Walker queries ---

    /// One bounded page of pending work: up to `limit` ZIP codes in the
    /// region that have boundary points but no stored polygon and are not
    /// excluded, each paired with its full point collection.
    ///
    /// Codes are returned in ascending ZIP code order so pagination is
    /// deterministic.
    #[must_use]
    pub fn pending_point_clouds(
        &self,
        geocode: &str,
        exclude: &HashSet<String>,
        limit: usize,
    ) -> Vec<(String, PointCollection)> {
        let mut grouped: BTreeMap<&str, PointCollection> = BTreeMap::new();
        for data in self.points.values() {
            if data.geocode != geocode
                || self.has_polygon(&data.zipcode)
                || exclude.contains(&data.zipcode)
            {
                continue;
            }
            grouped
                .entry(data.zipcode.as_str())
                .or_default()
                .push(data.point);
        }
        grouped
            .into_iter()
            .take(limit)
            .map(|(zipcode, cloud)| (zipcode.to_owned(), cloud))
            .collect()
    }

    /// ZIP codes in the region that have boundary points but no stored
    /// polygon — the unresolved set after a run.
    #[must_use]
    pub fn pending_zipcodes(&self, geocode: &str) -> Vec<String> {
        let mut pending: Vec<String> = self
            .points
            .values()
            .filter(|p| p.geocode == geocode && !self.has_polygon(&p.zipcode))
            .map(|p| p.zipcode.clone())
            .collect();
        pending.sort();
        pending.dedup();
        pending
    }
}
