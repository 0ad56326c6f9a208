//! Configuration management for analysis parameter tuning
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling fast iteration on framing, filter bank and pitch-tracking
//! parameters without recompilation. The scoring rule table and the
//! classification threshold are not part of the file; they live with the
//! scoring engine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default on-disk location of the analysis configuration
pub const DEFAULT_CONFIG_PATH: &str = "assets/detector_config.json";

/// Complete analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub framing: FramingConfig,
    #[serde(default)]
    pub mfcc: MfccConfig,
    #[serde(default)]
    pub spectral: SpectralConfig,
    #[serde(default)]
    pub pitch: PitchConfig,
}

/// Analysis frame layout shared by the spectral and energy features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramingConfig {
    /// Analysis window length in milliseconds
    pub window_ms: f32,
    /// Hop between successive windows in milliseconds
    pub hop_ms: f32,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            window_ms: 25.0,
            hop_ms: 10.0,
        }
    }
}

/// Mel-frequency cepstral coefficient parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MfccConfig {
    /// Number of triangular mel filters spanning 0 Hz to Nyquist
    pub n_mels: usize,
    /// Number of cepstral coefficients kept per frame
    pub n_coefficients: usize,
    /// Energy floor applied before taking the logarithm
    pub log_floor: f64,
}

impl Default for MfccConfig {
    fn default() -> Self {
        Self {
            n_mels: 40,
            n_coefficients: 13,
            log_floor: 1e-10,
        }
    }
}

/// Spectral shape parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralConfig {
    /// Fraction of spectral energy below the rolloff frequency
    pub rolloff_fraction: f32,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            rolloff_fraction: 0.85,
        }
    }
}

/// Autocorrelation pitch tracker parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchConfig {
    /// Pitch analysis window in milliseconds (needs at least two periods of `min_hz`)
    pub window_ms: f32,
    /// Lowest fundamental frequency searched
    pub min_hz: f32,
    /// Highest fundamental frequency searched
    pub max_hz: f32,
    /// Minimum normalized autocorrelation peak for a frame to count as voiced
    pub voicing_threshold: f32,
    /// Frames with RMS below this are treated as unvoiced silence
    pub silence_rms: f32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            window_ms: 40.0,
            min_hz: 60.0,
            max_hz: 500.0,
            voicing_threshold: 0.5,
            silence_rms: 1e-4,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// Missing sections fall back to their defaults. A missing file or
    /// malformed JSON logs a warning and returns the default configuration.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default assets location
    pub fn load() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_PATH)
    }
}
