use thiserror::Error;

/// Top-level error type for the ziphull polygon builder.
#[derive(Debug, Error)]
pub enum ZiphullError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Layer(#[from] LayerError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the layer store.
#[derive(Debug, Error)]
pub enum LayerError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("a polygon for zipcode {0} already exists")]
    DuplicateZipcode(String),
}

/// Convenience type alias for results using [`ZiphullError`].
pub type Result<T> = std::result::Result<T, ZiphullError>;
