//! Typed schema for the provider's understand responses.
//!
//! The NLU provider returns a deeply nested payload; only a small slice of
//! it carries routing information.  Every layer here is optional or
//! defaulted so that partial payloads still deserialize, and validation
//! happens once at the client boundary — the interpretation engine never
//! touches raw JSON maps.
//!
//! The shape mirrors the provider wire format:
//!
//! ```text
//! nlu_interpretation_results.payload.interpretations[0]
//!     .action.intent.{value, confidence}
//!     .concepts.{name}[0].value
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level understand response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnderstandResponse {
    /// Interpretation results; absent when the provider produced nothing.
    #[serde(default)]
    pub nlu_interpretation_results: Option<InterpretationResults>,
}

/// The `nlu_interpretation_results` envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterpretationResults {
    /// Provider-reported status string (e.g. `"success"`).
    #[serde(default)]
    pub status: Option<String>,

    /// The interpretation payload proper.
    #[serde(default)]
    pub payload: Option<InterpretationPayload>,
}

/// The `payload` layer carrying the ordered interpretation list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterpretationPayload {
    /// Ordered interpretations; the first one is authoritative.
    #[serde(default)]
    pub interpretations: Vec<Interpretation>,
}

/// One interpretation of the user's utterance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Interpretation {
    /// The recognized action, if the provider produced one.
    #[serde(default)]
    pub action: Option<Action>,

    /// The literal text the provider recognized.
    #[serde(default)]
    pub literal: Option<String>,

    /// Named argument slots, each an ordered list of candidate values.
    #[serde(default)]
    pub concepts: HashMap<String, Vec<ConceptValue>>,
}

/// The `action` layer wrapping the intent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Action {
    /// The matched intent, if any.
    #[serde(default)]
    pub intent: Option<Intent>,
}

/// A matched intent with its confidence score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    /// Encoded intent name, `{module}__{capacity}` or the literal
    /// `"NO_MATCH"`.
    pub value: String,

    /// Match confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f64,
}

/// One candidate value for a named concept slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConceptValue {
    /// The extracted value.  Kept as JSON because the provider emits
    /// strings, numbers, and structured values depending on the grammar.
    #[serde(default)]
    pub value: serde_json::Value,
}

impl UnderstandResponse {
    /// Flatten the nested envelope down to the interpretation list.
    ///
    /// Returns an empty slice when any intermediate layer is absent.
    pub fn interpretations(&self) -> &[Interpretation] {
        self.nlu_interpretation_results
            .as_ref()
            .and_then(|r| r.payload.as_ref())
            .map(|p| p.interpretations.as_slice())
            .unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
