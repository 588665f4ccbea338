use thiserror::Error;

/// Top-level error type for the track export kernel.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to node and curve geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised while exporting or serializing Bezier segments.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("maximum segment angle must be positive and finite, got {0}")]
    InvalidThreshold(f64),

    #[error("start parameter must lie in [0, 1), got {0}")]
    InvalidStartParam(f64),

    #[error("invalid {role} node: {source}")]
    InvalidNode {
        role: &'static str,
        #[source]
        source: GeometryError,
    },

    #[error("a {turn} degree turn needs pieces shorter than the subdivision limit to stay within {max_segment_angle} degrees")]
    SubdivisionLimit { turn: f64, max_segment_angle: f64 },

    #[error("chain needs at least two nodes, got {0}")]
    ChainTooShort(usize),

    #[error("export stream ended inside a record ({0} trailing bytes)")]
    TruncatedRecord(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to kernel configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown log level: {0}")]
    InvalidLogLevel(String),

    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Convenience type alias for results using [`TrackError`].
pub type Result<T> = std::result::Result<T, TrackError>;
