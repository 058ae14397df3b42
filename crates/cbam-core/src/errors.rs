use thiserror::Error;

/// Error type for the few fallible operations around the engine.
///
/// The calculation itself never fails; these only surface while loading
/// configuration or decoding a serialized snapshot.
#[derive(Error, Debug)]
pub enum CbamError {
    #[error("Could not parse engine parameters: {0}")]
    ParameterParse(#[from] toml::de::Error),
    #[error("Could not serialize engine parameters: {0}")]
    ParameterSerialize(#[from] toml::ser::Error),
    #[error("Could not parse data snapshot: {0}")]
    SnapshotParse(#[from] serde_json::Error),
    #[error("Invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },
}

/// Convenience type for `Result<T, CbamError>`.
pub type CbamResult<T> = Result<T, CbamError>;
