//! Voice entry points: text understanding, the audio listening loop, and
//! the self test.
//!
//! The audio loop carries the one hard resource-safety invariant in the
//! daemon: the wake-word detector is suppressed before each listen attempt
//! and resumed as soon as the provider call returns — on success and on
//! failure alike.  A listen attempt must never leave the detector
//! suppressed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use voxbridge_engine::{LivenessLookup, Outcome, classify};
use voxbridge_provider::ProviderClient;

use crate::config::ConfigHandle;
use crate::dialog::{DialogKey, DialogSource};
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::messaging::{HOTWORD_DISABLE, HOTWORD_ENABLE, Messaging};

/// The daemon's voice-facing surface.
pub struct VoiceBridge {
    provider: Arc<dyn ProviderClient>,
    messaging: Arc<dyn Messaging>,
    dispatcher: Dispatcher,
    liveness: Arc<dyn LivenessLookup + Send + Sync>,
    config: ConfigHandle,
    running: Arc<AtomicBool>,
}

impl VoiceBridge {
    /// Wire up a bridge over its collaborators.
    pub fn new(
        provider: Arc<dyn ProviderClient>,
        messaging: Arc<dyn Messaging>,
        dialogs: Arc<dyn DialogSource>,
        liveness: Arc<dyn LivenessLookup + Send + Sync>,
        config: ConfigHandle,
    ) -> Self {
        let dispatcher = Dispatcher::new(messaging.clone(), dialogs);
        Self {
            provider,
            messaging,
            dispatcher,
            liveness,
            config,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Flag the confirmation re-listen loop checks; clear it on shutdown.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Understand a text utterance and act on the outcome.
    pub async fn handle_text(&self, text: &str, context_tag: &str) -> Result<Outcome> {
        let config = self.config.snapshot();
        tracing::info!(text = %text, context_tag = %context_tag, "understanding text");

        let response = self
            .provider
            .understand_text(&config.app_credentials(), context_tag, &config.language, text)
            .await?;

        let outcome = classify(&response, config.confidence_threshold, &*self.liveness);
        self.dispatcher.dispatch(&outcome, &config.language).await?;
        Ok(outcome)
    }

    /// Listen on the microphone until a terminal outcome.
    ///
    /// A low-confidence result plays the uncertain dialog and re-enters the
    /// listening state while the running flag is set; every other outcome is
    /// terminal.
    pub async fn listen(&self, context_tag: &str) -> Result<Outcome> {
        loop {
            let config = self.config.snapshot();

            self.messaging
                .call(HOTWORD_DISABLE, serde_json::json!({}))
                .await?;

            let result = self
                .provider
                .understand_audio(&config.app_credentials(), context_tag, &config.language)
                .await;

            // Resume the detector before even looking at the result; the
            // suppress/resume pair brackets exactly one provider call.
            if let Err(e) = self
                .messaging
                .call(HOTWORD_ENABLE, serde_json::json!({}))
                .await
            {
                tracing::error!(error = %e, "failed to resume hotword detector");
            }

            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(error = %e, "listen attempt failed");
                    return Err(e.into());
                }
            };

            let outcome = classify(&response, config.confidence_threshold, &*self.liveness);
            self.dispatcher.dispatch(&outcome, &config.language).await?;

            match outcome {
                Outcome::NeedConfirmation { .. } => {
                    if !self.running.load(Ordering::SeqCst) {
                        return Ok(outcome);
                    }
                    // Back to listening for the corrected utterance.
                }
                _ => return Ok(outcome),
            }
        }
    }

    /// Speak the "I understand" dialog; wired to the bus `test` topic.
    pub async fn self_test(&self) -> Result<()> {
        let config = self.config.snapshot();
        self.dispatcher
            .say(&config.language, DialogKey::IUnderstand)
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
