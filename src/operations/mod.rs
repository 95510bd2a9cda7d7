mod alpha_shape;
mod build_layer;
mod build_polygons;
mod export_layer;
mod sample_points;
mod walker;

pub use alpha_shape::{AlphaShape, HullOutcome};
pub use build_layer::{BuildLayer, RegionReport};
pub use build_polygons::{BuildOutcome, BuildParams, BuildReport, BuildZipPolygons};
pub use export_layer::ExportPolygonLayer;
pub use sample_points::{SampleBoundaryPoints, SamplingParams};
pub use walker::{WorkItem, ZipWalker};
