use tracing::debug;

use crate::error::Result;
use crate::layers::{BoundaryPointData, LayerStore, SamplePosition, SampleSide, SampleTag};

/// Parameters controlling boundary point sampling.
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    /// Perpendicular offset magnitude, in degrees.
    pub offset_distance: f64,
    /// Lines at or below this length are excluded (their offsets are
    /// numerically unstable).
    pub min_length: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            offset_distance: 0.00005,
            min_length: 0.00003,
        }
    }
}

const SIDES: [SampleSide; 2] = [SampleSide::Left, SampleSide::Right];
const POSITIONS: [SamplePosition; 3] = [
    SamplePosition::NearStart,
    SamplePosition::Midpoint,
    SamplePosition::NearEnd,
];

/// Derives candidate boundary points from a region's line features.
///
/// Each attributed line is offset a small perpendicular distance to both
/// sides, and a point is interpolated near the start, midpoint, and end of
/// each offset curve: up to six points per feature, each tagged with its
/// (position, side) provenance.
pub struct SampleBoundaryPoints {
    geocode: String,
    params: SamplingParams,
}

impl SampleBoundaryPoints {
    /// Creates a new `SampleBoundaryPoints` operation.
    #[must_use]
    pub fn new(geocode: impl Into<String>, params: SamplingParams) -> Self {
        Self {
            geocode: geocode.into(),
            params,
        }
    }

    /// Executes the sampling, appending to the boundary point layer.
    ///
    /// Features without ZIP attribution or at or below the length floor
    /// contribute nothing; a feature whose offset curve cannot be built is
    /// skipped rather than failing the run. Returns the number of points
    /// inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced feature record disappears from the
    /// store mid-scan.
    pub fn execute(&self, store: &mut LayerStore) -> Result<usize> {
        debug!(geocode = %self.geocode, "sampling boundary points");

        let mut inserted = 0;
        for id in store.features_in(&self.geocode) {
            let feature = store.feature(id)?;
            let Some(zipcode) = feature.zipcode.clone() else {
                continue;
            };
            if feature.length() <= self.params.min_length {
                continue;
            }
            let centerline = feature.geometry.clone();

            for side in SIDES {
                let distance = match side {
                    SampleSide::Left => self.params.offset_distance,
                    SampleSide::Right => -self.params.offset_distance,
                };
                let Ok(offset_line) = centerline.offset(distance) else {
                    debug!(%zipcode, ?side, "skipping degenerate offset curve");
                    continue;
                };
                for position in POSITIONS {
                    let Ok(point) = offset_line.interpolate(position.fraction()) else {
                        continue;
                    };
                    store.add_point(BoundaryPointData::new(
                        zipcode.clone(),
                        self.geocode.clone(),
                        SampleTag::new(position, side),
                        point,
                    ));
                    inserted += 1;
                }
            }
        }

        debug!(geocode = %self.geocode, inserted, "sampled boundary points");
        Ok(inserted)
    }
}
