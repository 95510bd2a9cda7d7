use serde::{Deserialize, Serialize};

use super::{MultiPolygon, PointCollection, SRID_NAD83};
use crate::math::Point2;

/// GeoJSON geometry payloads this crate exchanges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString { coordinates: Vec<[f64; 2]> },
    MultiPoint { coordinates: Vec<[f64; 2]> },
    MultiPolygon { coordinates: Vec<Vec<Vec<[f64; 2]>>> },
}

/// Properties carried by exchanged features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocode: Option<String>,
}

/// A single GeoJSON feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

impl Feature {
    /// Wraps a geometry and its properties as a feature.
    #[must_use]
    pub fn new(properties: FeatureProperties, geometry: Geometry) -> Self {
        Self {
            kind: "Feature".to_owned(),
            properties,
            geometry,
        }
    }
}

/// Legacy GeoJSON `crs` member naming the coordinate reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: CrsProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrsProperties {
    pub name: String,
}

impl Crs {
    /// The NAD83 geographic reference (EPSG:4269).
    #[must_use]
    pub fn nad83() -> Self {
        Self {
            kind: "name".to_owned(),
            properties: CrsProperties {
                name: format!("EPSG:{SRID_NAD83}"),
            },
        }
    }
}

/// A GeoJSON feature collection with an explicit coordinate reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub crs: Crs,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates a NAD83 feature collection.
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".to_owned(),
            crs: Crs::nad83(),
            features,
        }
    }
}

impl From<&PointCollection> for Geometry {
    fn from(cloud: &PointCollection) -> Self {
        Geometry::MultiPoint {
            coordinates: cloud.coordinates.clone(),
        }
    }
}

impl From<&MultiPolygon> for Geometry {
    fn from(multi: &MultiPolygon) -> Self {
        let coordinates = multi
            .polygons
            .iter()
            .map(|polygon| {
                std::iter::once(&polygon.exterior)
                    .chain(polygon.holes.iter())
                    .map(|ring| closed_coordinates(&ring.points))
                    .collect()
            })
            .collect();
        Geometry::MultiPolygon { coordinates }
    }
}

/// Converts a ring's vertices to a closed coordinate list (first vertex
/// repeated at the end, as GeoJSON requires).
fn closed_coordinates(points: &[Point2]) -> Vec<[f64; 2]> {
    let mut coords: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
    if let Some(&first) = coords.first() {
        coords.push(first);
    }
    coords
}
