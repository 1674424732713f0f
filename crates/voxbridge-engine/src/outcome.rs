//! Classification outcomes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The result of classifying one understand response.
///
/// Exactly one interpretation (the first returned by the provider) is ever
/// acted upon; every variant below describes what should happen to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A confident, routable command for a live component.
    Route {
        /// Target module, dot-path decoded (e.g. `tux.aptitudes.light`).
        module: String,
        /// Capacity (operation) of the module to invoke.
        capacity: String,
        /// Named arguments extracted from the interpretation's concepts.
        arguments: HashMap<String, serde_json::Value>,
        /// Provider confidence in `[0, 1]`.
        confidence: f64,
    },

    /// The intent matched but confidence fell below the threshold; the user
    /// should be asked to repeat or confirm.
    NeedConfirmation {
        /// Provider confidence that was judged insufficient.
        confidence: f64,
    },

    /// The provider explicitly matched nothing (`NO_MATCH`).
    NoMatch,

    /// The intent value was not encoded as `{module}__{capacity}`.
    ///
    /// This means a definition was misnamed on the provider side; the raw
    /// value is kept for diagnostics.
    BadIntentName {
        /// The offending intent value as returned by the provider.
        raw_value: String,
    },

    /// The target module is known but not currently alive.
    CapacityUnavailable {
        /// Decoded target module.
        module: String,
        /// Requested capacity.
        capacity: String,
    },

    /// The provider returned no usable interpretation at all (muted
    /// microphone, silence, empty result).
    NoInterpretation,
}
