// Scoring - heuristic rule-based synthetic speech scoring
//
// This module maps a FeatureSet to an integer AI score by folding over an
// explicit rule table. Every rule is evaluated unconditionally and adds its
// weight when its condition holds; rules are independent of each other and
// of evaluation order. The score then selects the classification, the
// confidence and a fixed explanation string.
//
// Decision:
//   ai_score >= AI_SCORE_THRESHOLD  => AI_GENERATED
//   otherwise                       => HUMAN

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::features::{FeatureName, FeatureSet};

/// Minimum AI score that classifies a signal as synthetic
pub const AI_SCORE_THRESHOLD: u8 = 5;

/// Upper bound of the AI score
pub const MAX_AI_SCORE: u8 = 10;

pub const MIN_CONFIDENCE: f64 = 0.70;
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Confidence gained per AI score point when classified AI_GENERATED
const AI_CONFIDENCE_STEP: f64 = 0.04;

/// Confidence gained per missing AI score point when classified HUMAN
const HUMAN_CONFIDENCE_STEP: f64 = 0.03;

pub const AI_EXPLANATION: &str = "Synthetic speech characteristics detected.";
pub const HUMAN_EXPLANATION: &str = "Natural speech patterns detected.";

/// Binary classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "AI_GENERATED")]
    AiGenerated,
    #[serde(rename = "HUMAN")]
    Human,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::AiGenerated => "AI_GENERATED",
            Classification::Human => "HUMAN",
        }
    }

    /// Fixed explanation string for this outcome
    pub fn explanation(&self) -> &'static str {
        match self {
            Classification::AiGenerated => AI_EXPLANATION,
            Classification::Human => HUMAN_EXPLANATION,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate applied to a single feature value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// value < threshold
    Below(f64),
    /// value < low or value > high
    Outside { low: f64, high: f64 },
}

impl Condition {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Condition::Below(threshold) => value < threshold,
            Condition::Outside { low, high } => value < low || value > high,
        }
    }
}

/// One row of the rule table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub feature: FeatureName,
    pub condition: Condition,
    pub weight: u8,
}

impl ScoringRule {
    /// Weight contributed by this rule for `features`
    pub fn evaluate(&self, features: &FeatureSet) -> u8 {
        if self.condition.matches(features.value(self.feature)) {
            self.weight
        } else {
            0
        }
    }
}

/// Default rule table; weights sum to MAX_AI_SCORE
pub const DEFAULT_RULES: [ScoringRule; 6] = [
    ScoringRule {
        feature: FeatureName::MfccVariance,
        condition: Condition::Below(100.0),
        weight: 2,
    },
    ScoringRule {
        feature: FeatureName::ZeroCrossingRateMean,
        condition: Condition::Outside {
            low: 0.05,
            high: 0.15,
        },
        weight: 1,
    },
    ScoringRule {
        feature: FeatureName::SpectralCentroidVariance,
        condition: Condition::Below(1e10),
        weight: 2,
    },
    ScoringRule {
        feature: FeatureName::PitchStd,
        condition: Condition::Below(50.0),
        weight: 2,
    },
    ScoringRule {
        feature: FeatureName::Jitter,
        condition: Condition::Below(0.01),
        weight: 2,
    },
    ScoringRule {
        feature: FeatureName::RmsVariance,
        condition: Condition::Below(0.001),
        weight: 1,
    },
];

/// Outcome of scoring one feature set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Sum of matched rule weights (0 to MAX_AI_SCORE)
    pub ai_score: u8,
    pub classification: Classification,
    /// Bounded confidence (0.70 to 0.95), rounded to two decimals
    pub confidence: f64,
    pub explanation: &'static str,
    /// Features whose rule fired, in rule-table order
    pub matched_rules: Vec<FeatureName>,
}

/// Scorer applies the rule table to feature sets
#[derive(Debug, Clone)]
pub struct Scorer {
    rules: Vec<ScoringRule>,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer {
    /// Scorer using DEFAULT_RULES
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }

    /// Scorer using a custom rule table
    ///
    /// The summed score is still clamped to MAX_AI_SCORE and compared with
    /// AI_SCORE_THRESHOLD.
    pub fn with_rules(rules: Vec<ScoringRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    /// Score a feature set
    ///
    /// Total over finite inputs; callers reject non-finite feature sets with
    /// `FeatureSet::validate` first.
    pub fn score(&self, features: &FeatureSet) -> ScoreResult {
        let (total, matched_rules) = self.rules.iter().fold(
            (0u32, Vec::new()),
            |(total, mut matched), rule| match rule.evaluate(features) {
                0 => (total, matched),
                weight => {
                    matched.push(rule.feature);
                    (total + weight as u32, matched)
                }
            },
        );

        let ai_score = total.min(MAX_AI_SCORE as u32) as u8;
        let classification = classify_score(ai_score);

        ScoreResult {
            ai_score,
            classification,
            confidence: confidence_for(ai_score, classification),
            explanation: classification.explanation(),
            matched_rules,
        }
    }
}

/// Map an AI score to a classification
pub fn classify_score(ai_score: u8) -> Classification {
    if ai_score >= AI_SCORE_THRESHOLD {
        Classification::AiGenerated
    } else {
        Classification::Human
    }
}

/// Confidence for a score and its classification
///
/// * AI_GENERATED: min(0.70 + score × 0.04, 0.95)
/// * HUMAN: min(0.70 + (10 − score) × 0.03, 0.95)
///
/// Clamped to [0.70, 0.95] and rounded to two decimals.
pub fn confidence_for(ai_score: u8, classification: Classification) -> f64 {
    let ai_score = ai_score.min(MAX_AI_SCORE) as f64;
    let raw = match classification {
        Classification::AiGenerated => MIN_CONFIDENCE + ai_score * AI_CONFIDENCE_STEP,
        Classification::Human => {
            MIN_CONFIDENCE + (MAX_AI_SCORE as f64 - ai_score) * HUMAN_CONFIDENCE_STEP
        }
    };
    round_to_hundredths(raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE))
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "scoring_tests.rs"]
mod tests;
