use tracing::info;

use super::build_polygons::{BuildReport, BuildZipPolygons};
use super::sample_points::SampleBoundaryPoints;
use crate::config::Config;
use crate::error::Result;
use crate::layers::LayerStore;

/// Per-region result of a full pipeline run.
#[derive(Debug, Clone)]
pub struct RegionReport {
    pub geocode: String,
    /// Boundary points sampled for the region.
    pub sampled: usize,
    /// Convergence loop summary.
    pub report: BuildReport,
}

/// Runs the full pipeline — point sampling then polygon convergence — for
/// every configured region.
pub struct BuildLayer {
    config: Config,
}

impl BuildLayer {
    /// Creates a new `BuildLayer` pipeline.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the pipeline region by region.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by sampling or the convergence loop;
    /// regions already completed keep their stored polygons.
    pub fn execute(&self, store: &mut LayerStore) -> Result<Vec<RegionReport>> {
        let mut reports = Vec::with_capacity(self.config.geocodes.len());
        for geocode in &self.config.geocodes {
            info!(%geocode, "building ZIP boundary points");
            let sampled =
                SampleBoundaryPoints::new(geocode.clone(), self.config.sampling).execute(store)?;

            info!(%geocode, "building ZIP polygons");
            let report = BuildZipPolygons::new(geocode.clone(), self.config.build).execute(store)?;

            reports.push(RegionReport {
                geocode: geocode.clone(),
                sampled,
                report,
            });
        }
        info!("all regions built");
        Ok(reports)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polyline;
    use crate::layers::LineFeatureData;
    use crate::operations::{BuildOutcome, BuildParams};

    fn road(y: f64) -> Polyline {
        Polyline::from_coordinates(&[[0.0, y], [0.001, y]])
    }

    #[test]
    fn features_in_polygons_out() {
        let mut store = LayerStore::new();
        for y in [0.0, 0.0005, 0.001] {
            store.add_feature(LineFeatureData::new(Some("30303".into()), "13121", road(y)));
        }

        let mut config = Config::for_regions(["13121"]);
        // Coordinates span ~1e-3 degrees; even the first pass is loose
        // enough to keep every triangle.
        config.build = BuildParams {
            alpha0: 1.0,
            ..BuildParams::default()
        };

        let reports = BuildLayer::new(config).execute(&mut store).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].sampled, 18);
        assert_eq!(reports[0].report.outcome, BuildOutcome::Converged);
        assert_eq!(reports[0].report.built, 1);

        let stored = store.polygon_for("30303").unwrap();
        assert!(!stored.geometry.is_empty());
    }

    #[test]
    fn regions_are_processed_independently() {
        let mut store = LayerStore::new();
        store.add_feature(LineFeatureData::new(Some("30303".into()), "13121", road(0.0)));
        store.add_feature(LineFeatureData::new(
            Some("30303".into()),
            "13121",
            road(0.0005),
        ));
        store.add_feature(LineFeatureData::new(Some("40601".into()), "21121", road(0.0)));
        store.add_feature(LineFeatureData::new(
            Some("40601".into()),
            "21121",
            road(0.0005),
        ));

        let mut config = Config::for_regions(["13121", "21121"]);
        config.build = BuildParams {
            alpha0: 1.0,
            ..BuildParams::default()
        };

        let reports = BuildLayer::new(config).execute(&mut store).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(store.has_polygon("30303"));
        assert!(store.has_polygon("40601"));
        assert_eq!(store.polygon_for("30303").unwrap().geocode, "13121");
        assert_eq!(store.polygon_for("40601").unwrap().geocode, "21121");
    }
}
