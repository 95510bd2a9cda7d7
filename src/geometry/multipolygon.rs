use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

/// A closed ring of vertices. The closing edge from the last vertex back
/// to the first is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub points: Vec<Point2>,
}

impl Ring {
    /// Creates a ring from an ordered vertex list.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Signed area of the ring (positive = counter-clockwise).
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    /// Whether the ring winds counter-clockwise.
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }
}

/// A polygon: one exterior shell plus zero or more interior holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    /// Creates a polygon from a shell and its holes.
    #[must_use]
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }
}

/// The normalized output geometry: zero or more polygons.
///
/// Stored polygons are always multipolygon form even when a single shell
/// results, matching the result layer's geometry column type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiPolygon {
    pub polygons: Vec<Polygon>,
}

impl MultiPolygon {
    /// Creates a multipolygon from its member polygons.
    #[must_use]
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Whether the geometry contains no polygons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Total area (shells minus holes).
    #[must_use]
    pub fn area(&self) -> f64 {
        self.polygons
            .iter()
            .map(|p| {
                p.exterior.signed_area().abs()
                    - p.holes.iter().map(|h| h.signed_area().abs()).sum::<f64>()
            })
            .sum()
    }
}
