//! The interpretation engine.
//!
//! [`classify`] turns one typed understand response into an [`Outcome`].
//! It is a pure function of its inputs plus a single synchronous liveness
//! query; it performs no I/O of its own, which keeps the whole decision
//! table unit-testable without any transport.

use std::collections::HashMap;

use voxbridge_provider::UnderstandResponse;

use crate::outcome::Outcome;
use crate::registry::LivenessLookup;

/// Intent value the provider returns when nothing matched.
const NO_MATCH: &str = "NO_MATCH";

/// Separator between module and capacity inside an intent value.  Module
/// names may themselves be dot-path encoded with the same separator, since
/// the provider's grammar format forbids dots in intent names.
const SEPARATOR: &str = "__";

/// Classify an understand response into a routable outcome.
///
/// Only the first interpretation is authoritative; any additional ones are
/// logged and ignored.  The confidence comparison is strict: a confidence
/// exactly equal to `confidence_threshold` is sufficient to route.
pub fn classify(
    response: &UnderstandResponse,
    confidence_threshold: f64,
    liveness: &dyn LivenessLookup,
) -> Outcome {
    let interpretations = response.interpretations();

    if interpretations.is_empty() {
        tracing::warn!("no interpretation found");
        return Outcome::NoInterpretation;
    }

    if interpretations.len() > 1 {
        let literals: Vec<_> = interpretations
            .iter()
            .map(|i| i.literal.as_deref().unwrap_or(""))
            .collect();
        tracing::debug!(count = interpretations.len(), literals = ?literals,
            "multiple interpretations returned; using the first");
    }

    let interpretation = &interpretations[0];

    // A present interpretation without an intent carries nothing actionable;
    // treated the same as an empty result.
    let Some(intent) = interpretation.action.as_ref().and_then(|a| a.intent.as_ref()) else {
        tracing::warn!("first interpretation has no intent");
        return Outcome::NoInterpretation;
    };

    if intent.value == NO_MATCH {
        tracing::info!(confidence = intent.confidence, "no intent matched");
        return Outcome::NoMatch;
    }

    let Some((module_part, capacity)) = intent.value.rsplit_once(SEPARATOR) else {
        tracing::error!(value = %intent.value, "intent value is not module__capacity encoded");
        return Outcome::BadIntentName {
            raw_value: intent.value.clone(),
        };
    };

    if intent.confidence < confidence_threshold {
        tracing::info!(
            confidence = intent.confidence,
            threshold = confidence_threshold,
            "confidence below threshold, confirmation needed"
        );
        return Outcome::NeedConfirmation {
            confidence: intent.confidence,
        };
    }

    let module = module_part.replace(SEPARATOR, ".");

    if !liveness.is_alive(&module) {
        tracing::warn!(module = %module, capacity = %capacity, "target module is not alive");
        return Outcome::CapacityUnavailable {
            module,
            capacity: capacity.to_owned(),
        };
    }

    // First candidate value of each named concept becomes an argument.
    let arguments: HashMap<String, serde_json::Value> = interpretation
        .concepts
        .iter()
        .filter_map(|(name, values)| {
            values.first().map(|v| (name.clone(), v.value.clone()))
        })
        .collect();

    tracing::info!(
        module = %module,
        capacity = %capacity,
        confidence = intent.confidence,
        "intent classified"
    );

    Outcome::Route {
        module,
        capacity: capacity.to_owned(),
        arguments,
        confidence: intent.confidence,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(value: &str, confidence: f64) -> UnderstandResponse {
        serde_json::from_value(serde_json::json!({
            "nlu_interpretation_results": {"payload": {"interpretations": [
                {"action": {"intent": {"value": value, "confidence": confidence}}}
            ]}}
        }))
        .unwrap()
    }

    fn all_alive(_: &str) -> bool {
        true
    }

    fn none_alive(_: &str) -> bool {
        false
    }

    #[test]
    fn empty_interpretations_yield_no_interpretation() {
        let response = UnderstandResponse::default();
        assert_eq!(
            classify(&response, 0.7, &all_alive),
            Outcome::NoInterpretation
        );
    }

    #[test]
    fn missing_intent_yields_no_interpretation() {
        let response: UnderstandResponse = serde_json::from_value(serde_json::json!({
            "nlu_interpretation_results": {"payload": {"interpretations": [
                {"literal": "mumbling"}
            ]}}
        }))
        .unwrap();
        assert_eq!(
            classify(&response, 0.7, &all_alive),
            Outcome::NoInterpretation
        );
    }

    #[test]
    fn no_match_wins_regardless_of_confidence() {
        let response = response_with("NO_MATCH", 1.0);
        assert_eq!(classify(&response, 0.7, &all_alive), Outcome::NoMatch);

        let response = response_with("NO_MATCH", 0.0);
        assert_eq!(classify(&response, 0.7, &all_alive), Outcome::NoMatch);
    }

    #[test]
    fn single_underscore_is_a_bad_intent_name() {
        let response = response_with("light_toggle", 0.95);
        assert_eq!(
            classify(&response, 0.7, &all_alive),
            Outcome::BadIntentName {
                raw_value: "light_toggle".to_owned()
            }
        );
    }

    #[test]
    fn bad_name_is_reported_before_confidence() {
        // A misnamed intent must surface as such even when the confidence
        // would also have triggered a confirmation.
        let response = response_with("light_toggle", 0.1);
        assert!(matches!(
            classify(&response, 0.7, &all_alive),
            Outcome::BadIntentName { .. }
        ));
    }

    #[test]
    fn confident_intent_routes() {
        let response = response_with("light__toggle", 0.95);
        let outcome = classify(&response, 0.7, &all_alive);
        assert_eq!(
            outcome,
            Outcome::Route {
                module: "light".to_owned(),
                capacity: "toggle".to_owned(),
                arguments: HashMap::new(),
                confidence: 0.95,
            }
        );
    }

    #[test]
    fn low_confidence_needs_confirmation() {
        let response = response_with("light__toggle", 0.4);
        assert_eq!(
            classify(&response, 0.7, &all_alive),
            Outcome::NeedConfirmation { confidence: 0.4 }
        );
    }

    #[test]
    fn threshold_boundary_routes() {
        // Strict less-than: confidence equal to the threshold is enough.
        let response = response_with("light__toggle", 0.7);
        assert!(matches!(
            classify(&response, 0.7, &all_alive),
            Outcome::Route { .. }
        ));
    }

    #[test]
    fn dead_module_is_capacity_unavailable() {
        let response = response_with("light__toggle", 0.95);
        assert_eq!(
            classify(&response, 0.7, &none_alive),
            Outcome::CapacityUnavailable {
                module: "light".to_owned(),
                capacity: "toggle".to_owned(),
            }
        );
    }

    #[test]
    fn module_dot_path_is_decoded_from_double_underscores() {
        // Split happens on the *last* separator; the remaining ones encode
        // the module's dot path.
        let response = response_with("tux__aptitudes__light__toggle", 0.9);
        let alive = |module: &str| module == "tux.aptitudes.light";
        match classify(&response, 0.7, &alive) {
            Outcome::Route {
                module, capacity, ..
            } => {
                assert_eq!(module, "tux.aptitudes.light");
                assert_eq!(capacity, "toggle");
            }
            other => panic!("expected Route, got {other:?}"),
        }
    }

    #[test]
    fn first_concept_value_becomes_argument() {
        let response: UnderstandResponse = serde_json::from_value(serde_json::json!({
            "nlu_interpretation_results": {"payload": {"interpretations": [{
                "action": {"intent": {"value": "light__toggle", "confidence": 0.9}},
                "concepts": {
                    "room": [{"value": "kitchen"}, {"value": "cuisine"}],
                    "level": [{"value": 80}]
                }
            }]}}
        }))
        .unwrap();

        match classify(&response, 0.7, &all_alive) {
            Outcome::Route { arguments, .. } => {
                assert_eq!(arguments["room"], serde_json::json!("kitchen"));
                assert_eq!(arguments["level"], serde_json::json!(80));
            }
            other => panic!("expected Route, got {other:?}"),
        }
    }

    #[test]
    fn only_first_interpretation_is_used() {
        let response: UnderstandResponse = serde_json::from_value(serde_json::json!({
            "nlu_interpretation_results": {"payload": {"interpretations": [
                {"action": {"intent": {"value": "light__toggle", "confidence": 0.9}}},
                {"action": {"intent": {"value": "heater__on", "confidence": 1.0}}}
            ]}}
        }))
        .unwrap();

        match classify(&response, 0.7, &all_alive) {
            Outcome::Route { module, .. } => assert_eq!(module, "light"),
            other => panic!("expected Route, got {other:?}"),
        }
    }
}
