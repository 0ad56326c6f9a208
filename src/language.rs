//! Spoken-language label collaborator.
//!
//! Language identification runs outside the detection core (typically a
//! pretrained speech model). The core only needs a `(code, name)` pair to copy
//! into the final report; the label never influences the score.

use serde::{Deserialize, Serialize};

use crate::signal::AudioSignal;

/// Code reported when no language could be identified
pub const UNKNOWN_LANGUAGE_CODE: &str = "unknown";
pub const UNKNOWN_LANGUAGE_NAME: &str = "Unknown";

/// Spoken-language code and display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageLabel {
    pub code: String,
    pub name: String,
}

impl LanguageLabel {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Sentinel label for an unidentified language
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_LANGUAGE_CODE, UNKNOWN_LANGUAGE_NAME)
    }

    pub fn is_unknown(&self) -> bool {
        self.code == UNKNOWN_LANGUAGE_CODE
    }
}

impl Default for LanguageLabel {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Source of spoken-language labels
///
/// Implementations must always return a label, falling back to
/// [`LanguageLabel::unknown`] instead of failing.
pub trait LanguageIdentifier: Send + Sync {
    fn identify(&self, signal: &AudioSignal) -> LanguageLabel;
}

/// Identifier that never recognises a language
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownLanguage;

impl LanguageIdentifier for UnknownLanguage {
    fn identify(&self, _signal: &AudioSignal) -> LanguageLabel {
        LanguageLabel::unknown()
    }
}

/// Identifier returning a preset label, e.g. one supplied by the caller
#[derive(Debug, Clone)]
pub struct FixedLanguage(pub LanguageLabel);

impl LanguageIdentifier for FixedLanguage {
    fn identify(&self, _signal: &AudioSignal) -> LanguageLabel {
        self.0.clone()
    }
}

impl<F> LanguageIdentifier for F
where
    F: Fn(&AudioSignal) -> LanguageLabel + Send + Sync,
{
    fn identify(&self, signal: &AudioSignal) -> LanguageLabel {
        self(signal)
    }
}
