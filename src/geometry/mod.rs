pub mod geojson;
pub mod multipolygon;
pub mod point_collection;
pub mod polyline;

pub use multipolygon::{MultiPolygon, Polygon, Ring};
pub use point_collection::PointCollection;
pub use polyline::Polyline;

/// EPSG code of the geographic coordinate reference all geometry is
/// expressed in (NAD83, 2D).
pub const SRID_NAD83: u32 = 4269;
