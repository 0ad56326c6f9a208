// Types module - Data structures for audio features
//
// This module defines the feature set produced once per signal and consumed
// once by the scoring engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FeatureError;

/// Stable identifiers for the seven statistics in a [`FeatureSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureName {
    MfccVariance,
    ZeroCrossingRateMean,
    SpectralCentroidVariance,
    SpectralRolloffMean,
    PitchStd,
    Jitter,
    RmsVariance,
}

impl FeatureName {
    /// Every feature, in declaration order
    pub const ALL: [FeatureName; 7] = [
        FeatureName::MfccVariance,
        FeatureName::ZeroCrossingRateMean,
        FeatureName::SpectralCentroidVariance,
        FeatureName::SpectralRolloffMean,
        FeatureName::PitchStd,
        FeatureName::Jitter,
        FeatureName::RmsVariance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureName::MfccVariance => "mfcc_variance",
            FeatureName::ZeroCrossingRateMean => "zero_crossing_rate_mean",
            FeatureName::SpectralCentroidVariance => "spectral_centroid_variance",
            FeatureName::SpectralRolloffMean => "spectral_rolloff_mean",
            FeatureName::PitchStd => "pitch_std",
            FeatureName::Jitter => "jitter",
            FeatureName::RmsVariance => "rms_variance",
        }
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statistics extracted from a whole signal
///
/// Each value is a pure function of the input samples and sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Variance over the full MFCC matrix (all frames, all kept coefficients)
    pub mfcc_variance: f64,

    /// Mean fraction of sign changes per frame (0.0 to 1.0)
    pub zero_crossing_rate_mean: f64,

    /// Variance of the per-frame spectral centroid, in Hz²
    pub spectral_centroid_variance: f64,

    /// Mean per-frame rolloff frequency in Hz
    ///
    /// Reported for telemetry only; no scoring rule reads it.
    pub spectral_rolloff_mean: f64,

    /// Standard deviation of voiced pitch estimates in Hz (0 without voiced frames)
    pub pitch_std: f64,

    /// Mean absolute successive pitch change divided by mean pitch
    pub jitter: f64,

    /// Variance of the per-frame RMS energy envelope
    pub rms_variance: f64,
}

impl FeatureSet {
    /// Look up a feature by name
    pub fn value(&self, name: FeatureName) -> f64 {
        match name {
            FeatureName::MfccVariance => self.mfcc_variance,
            FeatureName::ZeroCrossingRateMean => self.zero_crossing_rate_mean,
            FeatureName::SpectralCentroidVariance => self.spectral_centroid_variance,
            FeatureName::SpectralRolloffMean => self.spectral_rolloff_mean,
            FeatureName::PitchStd => self.pitch_std,
            FeatureName::Jitter => self.jitter,
            FeatureName::RmsVariance => self.rms_variance,
        }
    }

    /// Reject feature sets carrying NaN or infinite values
    pub fn validate(&self) -> Result<(), FeatureError> {
        for name in FeatureName::ALL {
            let value = self.value(name);
            if !value.is_finite() {
                return Err(FeatureError::NonFinite {
                    feature: name.as_str(),
                    value,
                });
            }
        }
        Ok(())
    }
}
