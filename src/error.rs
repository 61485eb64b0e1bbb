use thiserror::Error;

/// Top-level error type for geohatch.
#[derive(Debug, Error)]
pub enum HatchError {
    #[error(transparent)]
    Geodesy(#[from] GeodesyError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised by the Earth model.
#[derive(Debug, Error)]
pub enum GeodesyError {
    #[error("projection error: {0}")]
    Projection(String),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate segment of length {length} m cannot be extended")]
    DegenerateSegment { length: f64 },

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised while validating caller input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input contains no rings")]
    EmptyInput,

    #[error("ring has {count} points, at least {min} are required")]
    TooFewPoints { count: usize, min: usize },

    #[error("position {index} has {len} components, expected 2 or 3")]
    InvalidPosition { index: usize, len: usize },

    #[error("{name} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
}

/// Errors raised while running the hatching operation.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("{direction} sweep exceeded {limit} passes")]
    PassLimitExceeded {
        direction: &'static str,
        limit: usize,
    },
}

/// Convenience type alias for results using [`HatchError`].
pub type Result<T> = std::result::Result<T, HatchError>;
