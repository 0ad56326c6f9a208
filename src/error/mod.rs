// Error types for the voice detector
//
// This module defines the typed errors raised by the detection core. Signal
// errors are raised before feature extraction begins; feature errors indicate a
// defect in the numeric pipeline and are fatal to the current request.

mod feature;
mod signal;

pub use feature::{log_feature_error, FeatureError, FeatureErrorCodes};
pub use signal::{log_signal_error, SignalError, SignalErrorCodes};

use std::fmt;

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, so the service boundary can map them onto
/// user-facing status codes.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}

/// Any error surfaced by the detection pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// The input signal was rejected before extraction
    Signal(SignalError),
    /// A computed feature was not finite
    Feature(FeatureError),
}

impl ErrorCode for DetectionError {
    fn code(&self) -> i32 {
        match self {
            DetectionError::Signal(err) => err.code(),
            DetectionError::Feature(err) => err.code(),
        }
    }

    fn message(&self) -> String {
        match self {
            DetectionError::Signal(err) => err.message(),
            DetectionError::Feature(err) => err.message(),
        }
    }
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionError::Signal(err) => err.fmt(f),
            DetectionError::Feature(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for DetectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DetectionError::Signal(err) => Some(err),
            DetectionError::Feature(err) => Some(err),
        }
    }
}

impl From<SignalError> for DetectionError {
    fn from(err: SignalError) -> Self {
        DetectionError::Signal(err)
    }
}

impl From<FeatureError> for DetectionError {
    fn from(err: FeatureError) -> Self {
        DetectionError::Feature(err)
    }
}
