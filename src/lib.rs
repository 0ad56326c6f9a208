// Voice Detector Core - synthetic speech detection
// Deterministic acoustic features scored by an explicit rule table

// Module declarations
pub mod analysis;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod language;
pub mod signal;

// Re-exports for convenience
pub use analysis::batch::classify_batch;
pub use analysis::features::{FeatureExtractor, FeatureName, FeatureSet};
pub use analysis::scoring::{Classification, ScoreResult, Scorer};
pub use analysis::{ClassificationReport, VoiceDetector};
pub use config::AppConfig;
pub use error::{DetectionError, ErrorCode, FeatureError, SignalError};
pub use language::{FixedLanguage, LanguageIdentifier, LanguageLabel, UnknownLanguage};
pub use signal::AudioSignal;
