// Analysis module - extract-then-score pipeline for synthetic speech detection
//
// This module wires the feature extractor and the scoring engine into a
// single pure unit of work and assembles the final report.
//
// Architecture:
// - Pipeline: AudioSignal → FeatureExtractor → FeatureSet::validate → Scorer
// - Language: LanguageIdentifier output is copied into the report untouched
// - Output: ClassificationReport (serializable for the service boundary)

pub mod batch;
pub mod features;
pub mod scoring;

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{log_feature_error, log_signal_error, DetectionError};
use crate::language::{LanguageIdentifier, LanguageLabel};
use crate::signal::AudioSignal;

use features::{FeatureExtractor, FeatureSet};
use scoring::{Classification, ScoreResult, Scorer};

/// Final classification returned to the service boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// AI_GENERATED or HUMAN
    pub classification: Classification,
    /// Confidence (0.70-0.95, two decimals)
    pub confidence_score: f64,
    /// Heuristic score (0-10)
    pub ai_score: u8,
    pub explanation: String,
    /// Language name from the external identifier
    pub language: String,
    /// Language code from the external identifier
    pub language_code: String,
}

impl ClassificationReport {
    pub fn new(score: &ScoreResult, language: LanguageLabel) -> Self {
        Self {
            classification: score.classification,
            confidence_score: score.confidence,
            ai_score: score.ai_score,
            explanation: score.explanation.to_string(),
            language: language.name,
            language_code: language.code,
        }
    }
}

/// Stateless detector combining extraction and scoring
///
/// `Send + Sync`; concurrent requests may share one instance.
#[derive(Debug, Clone, Default)]
pub struct VoiceDetector {
    extractor: FeatureExtractor,
    scorer: Scorer,
}

impl VoiceDetector {
    pub fn new(config: AppConfig) -> Self {
        Self {
            extractor: FeatureExtractor::new(config),
            scorer: Scorer::new(),
        }
    }

    /// Detector with a custom scorer (e.g. a tuned rule table)
    pub fn with_scorer(config: AppConfig, scorer: Scorer) -> Self {
        Self {
            extractor: FeatureExtractor::new(config),
            scorer,
        }
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Extract and validate features, then score them
    ///
    /// # Errors
    /// `DetectionError::Feature` when any extracted feature is non-finite
    pub fn analyze(
        &self,
        signal: &AudioSignal,
    ) -> Result<(FeatureSet, ScoreResult), DetectionError> {
        let features = self.extractor.extract(signal);
        if let Err(err) = features.validate() {
            log_feature_error(&err, "VoiceDetector::analyze");
            return Err(err.into());
        }

        let score = self.scorer.score(&features);
        log::info!(
            "[VoiceDetector] classification={} ai_score={} confidence={:.2} duration={:.2}s",
            score.classification,
            score.ai_score,
            score.confidence,
            signal.duration_secs()
        );
        Ok((features, score))
    }

    /// Classify a signal and attach its language label
    pub fn classify(
        &self,
        signal: &AudioSignal,
        identifier: &dyn LanguageIdentifier,
    ) -> Result<ClassificationReport, DetectionError> {
        let (_, score) = self.analyze(signal)?;
        let language = identifier.identify(signal);
        Ok(ClassificationReport::new(&score, language))
    }

    /// Validate raw decoded samples, then classify them
    ///
    /// # Errors
    /// `DetectionError::Signal` for empty input, a zero sample rate or
    /// non-finite samples; `DetectionError::Feature` as for [`Self::analyze`]
    pub fn classify_samples(
        &self,
        samples: Vec<f32>,
        sample_rate: u32,
        identifier: &dyn LanguageIdentifier,
    ) -> Result<ClassificationReport, DetectionError> {
        let signal = AudioSignal::new(samples, sample_rate).map_err(|err| {
            log_signal_error(&err, "VoiceDetector::classify_samples");
            err
        })?;
        self.classify(&signal, identifier)
    }
}
