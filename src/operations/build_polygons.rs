use tracing::debug;

use super::alpha_shape::{AlphaShape, HullOutcome};
use super::walker::ZipWalker;
use crate::error::{GeometryError, Result};
use crate::layers::{LayerStore, ZipPolygonData};

/// Parameters of the convergence loop.
#[derive(Debug, Clone, Copy)]
pub struct BuildParams {
    /// Starting shape tightness. The first pass runs at `alpha0 * decay`.
    pub alpha0: f64,
    /// Per-pass shrink factor, in (0, 1).
    pub decay: f64,
    /// Tightness floor: the run exhausts once alpha falls to or below it.
    pub alpha_floor: f64,
    /// Walker pagination width.
    pub batch_size: usize,
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            alpha0: 225.0,
            decay: 0.8,
            alpha_floor: 0.01,
            batch_size: 5,
        }
    }
}

/// How a region build ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// A full pass completed with zero failures.
    Converged,
    /// The alpha budget ran out with codes still unresolved.
    Exhausted,
}

/// Summary of one region build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub outcome: BuildOutcome,
    /// Passes attempted, the terminating one included.
    pub passes: usize,
    /// Polygons stored by this run.
    pub built: usize,
}

/// Builds ZIP boundary polygons for one region by sweeping its pending
/// point clouds at geometrically decreasing shape tightness.
///
/// Each pass walks every pending code once: accepted hulls are stored
/// immediately, failures are excluded for the remainder of the pass and
/// retried at the next, looser tightness. The loop stops on the first
/// clean pass or when alpha reaches the floor.
pub struct BuildZipPolygons {
    geocode: String,
    params: BuildParams,
}

impl BuildZipPolygons {
    /// Creates a new `BuildZipPolygons` operation.
    #[must_use]
    pub fn new(geocode: impl Into<String>, params: BuildParams) -> Self {
        Self {
            geocode: geocode.into(),
            params,
        }
    }

    /// Runs passes until convergence or alpha exhaustion.
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-range loop parameters, or on a
    /// duplicate polygon insert (a bookkeeping invariant violation — the
    /// run aborts rather than overwriting).
    pub fn execute(&self, store: &mut LayerStore) -> Result<BuildReport> {
        let params = self.params;
        if params.decay <= 0.0 || params.decay >= 1.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "decay",
                value: params.decay,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        if params.alpha_floor <= 0.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "alpha_floor",
                value: params.alpha_floor,
                min: 0.0,
                max: params.alpha0,
            }
            .into());
        }

        let mut alpha = params.alpha0;
        let mut passes = 0;
        let mut built = 0;
        loop {
            // Alpha shrinks before any work is attempted, the first pass
            // included.
            alpha *= params.decay;
            passes += 1;
            let mut skipped = 0usize;
            let mut walker = ZipWalker::new(self.geocode.clone(), params.batch_size);
            debug!(geocode = %self.geocode, alpha, pass = passes, "starting polygon build pass");

            while let Some(item) = walker.next_item(store) {
                debug!(geocode = %self.geocode, zipcode = %item.zipcode, alpha, "building polygon");
                match AlphaShape::new(&item.points.coordinates, alpha).execute() {
                    HullOutcome::Accepted(geometry) => {
                        store.insert_polygon(ZipPolygonData::new(
                            item.zipcode.clone(),
                            self.geocode.clone(),
                            geometry,
                        ))?;
                        built += 1;
                        debug!(zipcode = %item.zipcode, alpha, "built polygon");
                    }
                    HullOutcome::Rejected => {
                        debug!(zipcode = %item.zipcode, alpha, "rejected non-areal hull");
                        walker.exclude(item.zipcode);
                        skipped += 1;
                    }
                    HullOutcome::NumericalFailure => {
                        debug!(zipcode = %item.zipcode, alpha, "hull undefined for point cloud");
                        walker.exclude(item.zipcode);
                        skipped += 1;
                    }
                }
            }

            if skipped == 0 {
                return Ok(BuildReport {
                    outcome: BuildOutcome::Converged,
                    passes,
                    built,
                });
            }
            if alpha <= params.alpha_floor {
                return Ok(BuildReport {
                    outcome: BuildOutcome::Exhausted,
                    passes,
                    built,
                });
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::layers::{BoundaryPointData, SamplePosition, SampleSide, SampleTag};
    use crate::math::Point2;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("ziphull=debug")
            .with_test_writer()
            .try_init();
    }

    fn tag() -> SampleTag {
        SampleTag::new(SamplePosition::Midpoint, SampleSide::Left)
    }

    fn seed_cloud(store: &mut LayerStore, zipcode: &str, coords: &[[f64; 2]]) {
        for c in coords {
            store.add_point(BoundaryPointData::new(
                zipcode,
                "13121",
                tag(),
                Point2::new(c[0], c[1]),
            ));
        }
    }

    fn square_cloud(store: &mut LayerStore, zipcode: &str) {
        seed_cloud(
            store,
            zipcode,
            &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        );
    }

    fn collinear_cloud(store: &mut LayerStore, zipcode: &str) {
        seed_cloud(store, zipcode, &[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
    }

    fn ring_cloud(store: &mut LayerStore, zipcode: &str) {
        let coords: Vec<[f64; 2]> = (0..12)
            .map(|i| {
                let theta = f64::from(i) * std::f64::consts::TAU / 12.0;
                [theta.cos(), theta.sin()]
            })
            .collect();
        seed_cloud(store, zipcode, &coords);
    }

    #[test]
    fn empty_region_converges_in_one_pass() {
        init_tracing();
        let mut store = LayerStore::new();
        let report = BuildZipPolygons::new("13121", BuildParams::default())
            .execute(&mut store)
            .unwrap();
        assert_eq!(report.outcome, BuildOutcome::Converged);
        assert_eq!(report.passes, 1);
        assert_eq!(report.built, 0);
    }

    #[test]
    fn well_formed_cloud_builds_one_polygon() {
        init_tracing();
        let mut store = LayerStore::new();
        square_cloud(&mut store, "30302");

        let params = BuildParams {
            alpha0: 0.5,
            ..BuildParams::default()
        };
        let report = BuildZipPolygons::new("13121", params)
            .execute(&mut store)
            .unwrap();
        assert_eq!(report.outcome, BuildOutcome::Converged);
        assert_eq!(report.built, 1);
        let stored = store.polygon_for("30302").unwrap();
        assert!(!stored.geometry.is_empty());
        assert_eq!(stored.geocode, "13121");
    }

    #[test]
    fn collinear_cloud_exhausts_the_alpha_budget() {
        init_tracing();
        let mut store = LayerStore::new();
        collinear_cloud(&mut store, "30301");

        let report = BuildZipPolygons::new("13121", BuildParams::default())
            .execute(&mut store)
            .unwrap();
        assert_eq!(report.outcome, BuildOutcome::Exhausted);
        assert_eq!(report.built, 0);
        // 225 * 0.8^p first dips to the 0.01 floor at p = 45.
        assert_eq!(report.passes, 45);
        assert!(!store.has_polygon("30301"));
        assert_eq!(store.pending_zipcodes("13121"), vec!["30301".to_owned()]);
    }

    #[test]
    fn over_tight_start_relaxes_until_accepted() {
        init_tracing();
        let mut store = LayerStore::new();
        ring_cloud(&mut store, "30302");

        // Unit-radius ring: every pass at alpha > 1 rejects, the first
        // pass at alpha < 1 accepts, well before the floor.
        let params = BuildParams {
            alpha0: 180.0,
            ..BuildParams::default()
        };
        let report = BuildZipPolygons::new("13121", params)
            .execute(&mut store)
            .unwrap();
        assert_eq!(report.outcome, BuildOutcome::Converged);
        assert_eq!(report.built, 1);
        assert!(report.passes > 1);
        assert!(store.has_polygon("30302"));
    }

    #[test]
    fn failures_defer_without_blocking_successes() {
        init_tracing();
        let mut store = LayerStore::new();
        collinear_cloud(&mut store, "30301");
        square_cloud(&mut store, "30302");

        let report = BuildZipPolygons::new("13121", BuildParams::default())
            .execute(&mut store)
            .unwrap();
        assert_eq!(report.outcome, BuildOutcome::Exhausted);
        assert_eq!(report.built, 1);
        assert!(store.has_polygon("30302"));
        assert!(!store.has_polygon("30301"));
        assert_eq!(store.pending_zipcodes("13121"), vec!["30301".to_owned()]);
    }

    #[test]
    fn rerun_converges_with_no_new_insertions() {
        init_tracing();
        let mut store = LayerStore::new();
        square_cloud(&mut store, "30302");

        let params = BuildParams {
            alpha0: 0.5,
            ..BuildParams::default()
        };
        let first = BuildZipPolygons::new("13121", params)
            .execute(&mut store)
            .unwrap();
        assert_eq!(first.built, 1);

        let second = BuildZipPolygons::new("13121", params)
            .execute(&mut store)
            .unwrap();
        assert_eq!(second.outcome, BuildOutcome::Converged);
        assert_eq!(second.passes, 1);
        assert_eq!(second.built, 0);
        assert_eq!(store.polygon_count(), 1);
    }

    #[test]
    fn rejects_out_of_range_decay() {
        let mut store = LayerStore::new();
        for decay in [0.0, 1.0, 1.5, -0.2] {
            let params = BuildParams {
                decay,
                ..BuildParams::default()
            };
            assert!(BuildZipPolygons::new("13121", params)
                .execute(&mut store)
                .is_err());
        }
    }

    #[test]
    fn rejects_non_positive_floor() {
        let mut store = LayerStore::new();
        let params = BuildParams {
            alpha_floor: 0.0,
            ..BuildParams::default()
        };
        assert!(BuildZipPolygons::new("13121", params)
            .execute(&mut store)
            .is_err());
    }
}
