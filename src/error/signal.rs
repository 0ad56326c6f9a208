// Signal error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Signal error code constants
///
/// Error code range: 1001-1007
pub struct SignalErrorCodes {}

impl SignalErrorCodes {
    /// Signal has no samples
    pub const EMPTY: i32 = 1001;

    /// Sample rate is zero
    pub const INVALID_SAMPLE_RATE: i32 = 1002;

    /// A sample is NaN or infinite
    pub const NON_FINITE_SAMPLE: i32 = 1003;

    /// Audio source could not be read
    pub const READ_FAILED: i32 = 1004;

    /// Audio source uses a sample layout the loader cannot decode
    pub const UNSUPPORTED_FORMAT: i32 = 1005;

    /// A sample lies outside [-1.0, 1.0]
    pub const AMPLITUDE_OUT_OF_RANGE: i32 = 1006;

    /// Audio destination could not be written
    pub const WRITE_FAILED: i32 = 1007;
}

/// Log a signal error with structured context
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_signal_error(err: &SignalError, context: &str) {
    error!(
        "Signal error in {}: code={}, component=SignalLoader, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while validating or loading an input signal
///
/// These are always surfaced to the caller and never retried inside the core.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalError {
    /// No samples were supplied
    Empty,

    /// Sample rate must be positive
    InvalidSampleRate { sample_rate: u32 },

    /// Sample at `index` is NaN or infinite
    NonFiniteSample { index: usize },

    /// Sample at `index` has a magnitude above full scale
    AmplitudeOutOfRange { index: usize, value: f32 },

    /// Reading the audio source failed
    ReadFailed { reason: String },

    /// The audio source is in a format the loader does not handle
    UnsupportedFormat { reason: String },

    /// Writing the audio destination failed
    WriteFailed { reason: String },
}

impl ErrorCode for SignalError {
    fn code(&self) -> i32 {
        match self {
            SignalError::Empty => SignalErrorCodes::EMPTY,
            SignalError::InvalidSampleRate { .. } => SignalErrorCodes::INVALID_SAMPLE_RATE,
            SignalError::NonFiniteSample { .. } => SignalErrorCodes::NON_FINITE_SAMPLE,
            SignalError::ReadFailed { .. } => SignalErrorCodes::READ_FAILED,
            SignalError::UnsupportedFormat { .. } => SignalErrorCodes::UNSUPPORTED_FORMAT,
            SignalError::AmplitudeOutOfRange { .. } => SignalErrorCodes::AMPLITUDE_OUT_OF_RANGE,
            SignalError::WriteFailed { .. } => SignalErrorCodes::WRITE_FAILED,
        }
    }

    fn message(&self) -> String {
        match self {
            SignalError::Empty => "Signal contains no samples".to_string(),
            SignalError::InvalidSampleRate { sample_rate } => {
                format!("Sample rate must be greater than 0 (got {})", sample_rate)
            }
            SignalError::NonFiniteSample { index } => {
                format!("Non-finite sample at index {}", index)
            }
            SignalError::ReadFailed { reason } => format!("Failed to read audio: {}", reason),
            SignalError::UnsupportedFormat { reason } => {
                format!("Unsupported audio format: {}", reason)
            }
            SignalError::AmplitudeOutOfRange { index, value } => {
                format!("Sample {} at index {} is outside [-1.0, 1.0]", value, index)
            }
            SignalError::WriteFailed { reason } => format!("Failed to write audio: {}", reason),
        }
    }
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignalError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for SignalError {}

impl From<std::io::Error> for SignalError {
    fn from(err: std::io::Error) -> Self {
        SignalError::ReadFailed {
            reason: err.to_string(),
        }
    }
}
