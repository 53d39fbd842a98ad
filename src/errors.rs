use thiserror::Error;

/// A result type for remnant computations
pub type Result<T> = std::result::Result<T, RemnantError>;

/// An error raised while loading or evaluating remnant fits
#[derive(Error, Debug)]
pub enum RemnantError {
    /// When an input parameter is out of range or not finite
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    /// When a closed-form fit is evaluated outside its domain of validity
    #[error("Out of fit domain: {0}")]
    OutOfDomain(String),
    /// When the fit artifact does not contain what the loader expects
    #[error("Invalid fit artifact: {0}")]
    InvalidArtifact(String),
    /// When the fallback download of the fit artifact fails
    #[error("Fit artifact fetch error: {0}")]
    FetchError(String),
    /// When reading or writing the fit artifact fails
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// When a fit record cannot be (de)serialized
    #[error("Fit record (de)serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<reqwest::Error> for RemnantError {
    fn from(error: reqwest::Error) -> RemnantError {
        RemnantError::FetchError(error.to_string())
    }
}
