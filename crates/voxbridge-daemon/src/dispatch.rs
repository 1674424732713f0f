//! Outcome dispatcher.
//!
//! Thin glue between the interpretation engine and the bus: a routable
//! outcome becomes one published command, every failure outcome becomes a
//! spoken dialog, and `NoInterpretation` stays silent.

use std::sync::Arc;

use voxbridge_engine::Outcome;

use crate::dialog::{DialogKey, DialogSource};
use crate::error::Result;
use crate::messaging::{Messaging, SPEECH_SAY};

/// Turns an [`Outcome`] into an outbound message or a dialog playback.
#[derive(Clone)]
pub struct Dispatcher {
    messaging: Arc<dyn Messaging>,
    dialogs: Arc<dyn DialogSource>,
}

impl Dispatcher {
    /// Create a dispatcher over the given bus and dialog source.
    pub fn new(messaging: Arc<dyn Messaging>, dialogs: Arc<dyn DialogSource>) -> Self {
        Self { messaging, dialogs }
    }

    /// Act on one classification outcome.
    pub async fn dispatch(&self, outcome: &Outcome, language: &str) -> Result<()> {
        match outcome {
            Outcome::Route {
                module,
                capacity,
                arguments,
                confidence,
            } => {
                let topic = format!("{module}/{capacity}");
                let payload = serde_json::json!({ "arguments": arguments });
                tracing::info!(topic = %topic, confidence, "publishing routed command");
                self.messaging.publish(&topic, payload).await
            }

            Outcome::NoMatch => {
                tracing::info!("nothing matched, playing not-understood dialog");
                self.say(language, DialogKey::NotUnderstand).await
            }

            Outcome::BadIntentName { raw_value } => {
                // A misnamed definition on the provider side; the user hears
                // the same dialog as for a plain miss.
                tracing::error!(raw_value = %raw_value, "bad intent name from provider");
                self.say(language, DialogKey::NotUnderstand).await
            }

            Outcome::NeedConfirmation { confidence } => {
                tracing::info!(confidence, "confidence too low, asking for confirmation");
                self.say(language, DialogKey::Uncertain).await
            }

            Outcome::CapacityUnavailable { module, capacity } => {
                tracing::warn!(module = %module, capacity = %capacity, "target module not alive");
                self.say(language, DialogKey::CanNotDoIt).await
            }

            Outcome::NoInterpretation => {
                tracing::debug!("no interpretation, staying silent");
                Ok(())
            }
        }
    }

    /// Request playback of the dialog behind `key`.
    pub async fn say(&self, language: &str, key: DialogKey) -> Result<()> {
        let text = self.dialogs.dialog(language, key)?;
        self.messaging
            .call(SPEECH_SAY, serde_json::json!({ "text": text }))
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::testutil::{BusEvent, RecordingMessaging, StaticDialogs};

    use super::*;

    fn dispatcher() -> (Dispatcher, Arc<RecordingMessaging>) {
        let messaging = Arc::new(RecordingMessaging::default());
        let dispatcher = Dispatcher::new(messaging.clone(), Arc::new(StaticDialogs));
        (dispatcher, messaging)
    }

    #[tokio::test]
    async fn route_publishes_module_slash_capacity() {
        let (dispatcher, messaging) = dispatcher();
        let outcome = Outcome::Route {
            module: "light".to_owned(),
            capacity: "toggle".to_owned(),
            arguments: HashMap::from([("room".to_owned(), serde_json::json!("kitchen"))]),
            confidence: 0.95,
        };

        dispatcher.dispatch(&outcome, "en_US").await.unwrap();

        assert_eq!(
            messaging.events(),
            vec![BusEvent::Publish {
                topic: "light/toggle".to_owned(),
                payload: serde_json::json!({"arguments": {"room": "kitchen"}}),
            }]
        );
    }

    #[tokio::test]
    async fn miss_outcomes_play_the_not_understood_dialog() {
        for outcome in [
            Outcome::NoMatch,
            Outcome::BadIntentName {
                raw_value: "light_toggle".to_owned(),
            },
        ] {
            let (dispatcher, messaging) = dispatcher();
            dispatcher.dispatch(&outcome, "en_US").await.unwrap();
            assert_eq!(
                messaging.events(),
                vec![BusEvent::Call {
                    procedure: "speech.say".to_owned(),
                    args: serde_json::json!({"text": "[en_US] not_understand"}),
                }]
            );
        }
    }

    #[tokio::test]
    async fn confirmation_plays_the_uncertain_dialog() {
        let (dispatcher, messaging) = dispatcher();
        dispatcher
            .dispatch(&Outcome::NeedConfirmation { confidence: 0.4 }, "en_US")
            .await
            .unwrap();
        assert_eq!(
            messaging.events(),
            vec![BusEvent::Call {
                procedure: "speech.say".to_owned(),
                args: serde_json::json!({"text": "[en_US] uncertain"}),
            }]
        );
    }

    #[tokio::test]
    async fn unavailable_capacity_plays_cannot_do_it() {
        let (dispatcher, messaging) = dispatcher();
        dispatcher
            .dispatch(
                &Outcome::CapacityUnavailable {
                    module: "light".to_owned(),
                    capacity: "toggle".to_owned(),
                },
                "en_US",
            )
            .await
            .unwrap();
        assert_eq!(
            messaging.events(),
            vec![BusEvent::Call {
                procedure: "speech.say".to_owned(),
                args: serde_json::json!({"text": "[en_US] can_not_do_it"}),
            }]
        );
    }

    #[tokio::test]
    async fn no_interpretation_is_silent() {
        let (dispatcher, messaging) = dispatcher();
        dispatcher
            .dispatch(&Outcome::NoInterpretation, "en_US")
            .await
            .unwrap();
        assert!(messaging.events().is_empty());
    }
}
