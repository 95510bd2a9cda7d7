use crate::operations::{BuildParams, SamplingParams};

/// Process configuration, threaded explicitly into the pipeline
/// operations at construction time.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Administrative regions to build, by geocode.
    pub geocodes: Vec<String>,
    /// Boundary point sampling parameters.
    pub sampling: SamplingParams,
    /// Convergence loop parameters.
    pub build: BuildParams,
}

impl Config {
    /// Default parameters for the given regions.
    #[must_use]
    pub fn for_regions<I, S>(geocodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            geocodes: geocodes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}
