use std::time::Duration;
use thiserror::Error;

use crate::bodies::Body;

/// Errors raised by an ephemeris backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    CalculationFailed {
        body: Body,
        julian_day: f64,
        message: String,
    },
    #[error("House calculation failed at JD {julian_day}: {message}")]
    HouseCalculationFailed { julian_day: f64, message: String },
    #[error("Ephemeris query for {target} timed out after {timeout:?}")]
    Timeout { target: String, timeout: Duration },
    #[error("Ephemeris task for {target} did not complete: {message}")]
    TaskFailed { target: String, message: String },
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    EphemerisFailure,
    InsufficientData,
    ConfigurationUnavailable,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("Insufficient price history: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },
    #[error("Configuration unavailable: {0}")]
    ConfigurationUnavailable(String),
}

impl ChartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChartError::InvalidInput(_) => ErrorKind::InvalidInput,
            ChartError::Ephemeris(_) => ErrorKind::EphemerisFailure,
            ChartError::InsufficientData { .. } => ErrorKind::InsufficientData,
            ChartError::ConfigurationUnavailable(_) => ErrorKind::ConfigurationUnavailable,
        }
    }
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
