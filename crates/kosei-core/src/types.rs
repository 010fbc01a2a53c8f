use serde::{Deserialize, Serialize};

/// A validated unit of work for one correction round trip.
///
/// Construction trims all three fields and refuses whitespace-only input, so
/// downstream code never has to re-validate the text it is asked to correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    input_text: String,
    policy: String,
    reference: String,
}

impl ConversionRequest {
    /// Build a request from raw user input plus the active settings.
    ///
    /// Returns `None` when the input text is empty after trimming.
    pub fn new(input_text: &str, policy: &str, reference: &str) -> Option<Self> {
        let input_text = input_text.trim();
        if input_text.is_empty() {
            return None;
        }
        Some(Self {
            input_text: input_text.to_string(),
            policy: policy.trim().to_string(),
            reference: reference.trim().to_string(),
        })
    }

    /// The transcribed text to correct, trimmed.
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Extra correction instructions, trimmed. May be empty.
    pub fn policy(&self) -> &str {
        &self.policy
    }

    /// Style reference text, trimmed. May be empty.
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

/// Terminal result of one conversion round trip.
///
/// Exactly one outcome is emitted per accepted request, after the session has
/// already returned to idle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Corrected text recovered from the model response.
    Corrected(String),
    /// Human-readable description of what went wrong.
    Error(String),
}

/// Audible feedback category for the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    /// A conversion completed with corrected text.
    Success,
    /// Input was rejected or a conversion failed.
    Warning,
}

/// User-adjustable correction settings, persisted across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionSettings {
    /// Extra instructions appended to the system prompt.
    pub conversion_policy: String,
    /// Style reference text appended to the system prompt.
    pub reference_text: String,
    /// Name of the reference file the reference text was loaded from, if any.
    pub selected_reference_file: String,
}
