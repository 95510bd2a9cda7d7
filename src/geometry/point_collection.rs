use serde::{Deserialize, Serialize};

use crate::math::Point2;

/// A serialized point cloud: the `[x, y]`-pair list exchanged between the
/// walker and the hull engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCollection {
    pub coordinates: Vec<[f64; 2]>,
}

impl PointCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point.
    pub fn push(&mut self, point: Point2) {
        self.coordinates.push([point.x, point.y]);
    }

    /// Number of points in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether the collection holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let mut cloud = PointCollection::new();
        cloud.push(Point2::new(-84.39, 33.75));
        cloud.push(Point2::new(-84.38, 33.76));

        let text = serde_json::to_string(&cloud).unwrap();
        assert!(text.contains("coordinates"));

        let back: PointCollection = serde_json::from_str(&text).unwrap();
        assert_eq!(back, cloud);
        assert_eq!(back.len(), 2);
    }

    #[test]
    fn parses_bare_coordinate_list() {
        let cloud: PointCollection =
            serde_json::from_str(r#"{"coordinates": [[1.0, 2.0], [3.0, 4.0]]}"#).unwrap();
        assert_eq!(cloud.coordinates[1], [3.0, 4.0]);
    }
}
