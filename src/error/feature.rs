// Feature error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Feature error code constants
///
/// Error code range: 2001
pub struct FeatureErrorCodes {}

impl FeatureErrorCodes {
    /// A computed feature is NaN or infinite
    pub const NON_FINITE: i32 = 2001;
}

/// Log a feature error with structured context
pub fn log_feature_error(err: &FeatureError, context: &str) {
    error!(
        "Feature error in {}: code={}, component=FeatureExtractor, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised when a computed feature set is malformed
///
/// A valid signal must never produce one of these; seeing one means the
/// numeric pipeline has a defect. The value is never coerced to a default.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// Feature `feature` evaluated to a non-finite value
    NonFinite { feature: &'static str, value: f64 },
}

impl ErrorCode for FeatureError {
    fn code(&self) -> i32 {
        match self {
            FeatureError::NonFinite { .. } => FeatureErrorCodes::NON_FINITE,
        }
    }

    fn message(&self) -> String {
        match self {
            FeatureError::NonFinite { feature, value } => {
                format!("Feature {} is not finite (got {})", feature, value)
            }
        }
    }
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FeatureError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for FeatureError {}
