use crate::geometry::MultiPolygon;

slotmap::new_key_type! {
    /// Unique identifier for a stored ZIP polygon.
    pub struct PolygonId;
}

/// A reconstructed ZIP code boundary polygon.
///
/// Written exactly once per ZIP code; its presence is the sole signal
/// that the code is done.
#[derive(Debug, Clone)]
pub struct ZipPolygonData {
    /// The ZIP code this polygon bounds (unique across the layer).
    pub zipcode: String,
    /// Region the polygon was built for.
    pub geocode: String,
    /// Normalized multipolygon geometry (NAD83, 2D).
    pub geometry: MultiPolygon,
}

impl ZipPolygonData {
    /// Creates a new polygon record.
    #[must_use]
    pub fn new(
        zipcode: impl Into<String>,
        geocode: impl Into<String>,
        geometry: MultiPolygon,
    ) -> Self {
        Self {
            zipcode: zipcode.into(),
            geocode: geocode.into(),
            geometry,
        }
    }
}
