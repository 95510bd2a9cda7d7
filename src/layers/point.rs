use std::fmt;

use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a boundary point in the layer store.
    pub struct PointId;
}

/// Which side of the centerline a sample was offset to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleSide {
    Left,
    Right,
}

/// Where along the offset curve a sample was interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplePosition {
    NearStart,
    Midpoint,
    NearEnd,
}

impl SamplePosition {
    /// The normalized arc-length fraction this position samples at.
    #[must_use]
    pub fn fraction(self) -> f64 {
        match self {
            SamplePosition::NearStart => 0.1,
            SamplePosition::Midpoint => 0.5,
            SamplePosition::NearEnd => 0.9,
        }
    }
}

/// Provenance tag of a boundary point: one of the six (position, side)
/// combinations a line feature can yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleTag {
    pub position: SamplePosition,
    pub side: SampleSide,
}

impl SampleTag {
    /// Creates a tag.
    #[must_use]
    pub fn new(position: SamplePosition, side: SampleSide) -> Self {
        Self { position, side }
    }
}

impl fmt::Display for SampleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = match self.position {
            SamplePosition::NearStart => "near_start",
            SamplePosition::Midpoint => "mid",
            SamplePosition::NearEnd => "near_end",
        };
        let side = match self.side {
            SampleSide::Left => "left",
            SampleSide::Right => "right",
        };
        write!(f, "{position}_{side}")
    }
}

/// A candidate boundary point derived from a line feature.
#[derive(Debug, Clone)]
pub struct BoundaryPointData {
    /// ZIP code the point votes for.
    pub zipcode: String,
    /// Region the parent feature was sourced for.
    pub geocode: String,
    /// Sampling provenance.
    pub tag: SampleTag,
    /// Geographic position.
    pub point: Point2,
}

impl BoundaryPointData {
    /// Creates a new boundary point.
    #[must_use]
    pub fn new(
        zipcode: impl Into<String>,
        geocode: impl Into<String>,
        tag: SampleTag,
        point: Point2,
    ) -> Self {
        Self {
            zipcode: zipcode.into(),
            geocode: geocode.into(),
            tag,
            point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_labels() {
        let tag = SampleTag::new(SamplePosition::NearStart, SampleSide::Left);
        assert_eq!(tag.to_string(), "near_start_left");
        let tag = SampleTag::new(SamplePosition::Midpoint, SampleSide::Right);
        assert_eq!(tag.to_string(), "mid_right");
    }

    #[test]
    fn position_fractions_ordered() {
        assert!(SamplePosition::NearStart.fraction() < SamplePosition::Midpoint.fraction());
        assert!(SamplePosition::Midpoint.fraction() < SamplePosition::NearEnd.fraction());
    }

    #[test]
    fn six_tag_combinations_are_distinct() {
        let mut tags = std::collections::HashSet::new();
        for position in [
            SamplePosition::NearStart,
            SamplePosition::Midpoint,
            SamplePosition::NearEnd,
        ] {
            for side in [SampleSide::Left, SampleSide::Right] {
                tags.insert(SampleTag::new(position, side));
            }
        }
        assert_eq!(tags.len(), 6);
    }
}
