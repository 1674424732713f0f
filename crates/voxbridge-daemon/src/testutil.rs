//! Shared test doubles for the daemon crate.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use voxbridge_provider::{
    AppCredentials, AttachOutcome, BuildRecord, BuildStatus, ModelSummary, ProviderClient,
    Result as ProviderResult, UnderstandResponse,
};

use crate::dialog::{DialogKey, DialogSource};
use crate::error::Result;
use crate::messaging::Messaging;

/// One recorded bus interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum BusEvent {
    Publish {
        topic: String,
        payload: serde_json::Value,
    },
    Call {
        procedure: String,
        args: serde_json::Value,
    },
}

/// Messaging double that records every interaction in order.
#[derive(Default)]
pub struct RecordingMessaging {
    events: Mutex<Vec<BusEvent>>,
}

impl RecordingMessaging {
    pub fn events(&self) -> Vec<BusEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Procedure names of all `call` events, in order.
    pub fn procedures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                BusEvent::Call { procedure, .. } => Some(procedure),
                BusEvent::Publish { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl Messaging for RecordingMessaging {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<()> {
        self.events.lock().unwrap().push(BusEvent::Publish {
            topic: topic.to_owned(),
            payload,
        });
        Ok(())
    }

    async fn call(&self, procedure: &str, args: serde_json::Value) -> Result<()> {
        self.events.lock().unwrap().push(BusEvent::Call {
            procedure: procedure.to_owned(),
            args,
        });
        Ok(())
    }
}

/// Dialog source returning `[{language}] {key}` for any request.
pub struct StaticDialogs;

impl DialogSource for StaticDialogs {
    fn dialog(&self, language: &str, key: DialogKey) -> Result<String> {
        Ok(format!("[{language}] {key}"))
    }
}

/// Provider double with scripted understand responses and permissive
/// model-management behavior (everything succeeds, builds complete
/// immediately).
#[derive(Default)]
pub struct ScriptedProvider {
    /// Responses returned by `understand_text`/`understand_audio`, in order.
    pub responses: Mutex<VecDeque<ProviderResult<UnderstandResponse>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn push_response(&self, response: ProviderResult<UnderstandResponse>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_owned());
    }

    fn next_response(&self) -> ProviderResult<UnderstandResponse> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("test script ran out of understand responses")
    }
}

#[async_trait]
impl ProviderClient for ScriptedProvider {
    async fn understand_text(
        &self,
        _app: &AppCredentials,
        _context_tag: &str,
        _language: &str,
        _text: &str,
    ) -> ProviderResult<UnderstandResponse> {
        self.record("understand_text");
        self.next_response()
    }

    async fn understand_audio(
        &self,
        _app: &AppCredentials,
        _context_tag: &str,
        _language: &str,
    ) -> ProviderResult<UnderstandResponse> {
        self.record("understand_audio");
        self.next_response()
    }

    async fn list_models(&self) -> ProviderResult<Vec<ModelSummary>> {
        self.record("list_models");
        Ok(Vec::new())
    }

    async fn create_model(&self, name: &str, _language: &str) -> ProviderResult<()> {
        self.record(&format!("create_model:{name}"));
        Ok(())
    }

    async fn upload_model(&self, name: &str, _content: &str) -> ProviderResult<()> {
        self.record(&format!("upload_model:{name}"));
        Ok(())
    }

    async fn train_model(&self, name: &str) -> ProviderResult<()> {
        self.record(&format!("train_model:{name}"));
        Ok(())
    }

    async fn create_build(&self, name: &str, _note: &str) -> ProviderResult<()> {
        self.record(&format!("create_build:{name}"));
        Ok(())
    }

    async fn list_builds(&self, name: &str) -> ProviderResult<Vec<BuildRecord>> {
        self.record(&format!("list_builds:{name}"));
        Ok(vec![BuildRecord {
            created_at: Utc::now(),
            status: BuildStatus::Completed,
        }])
    }

    async fn attach_build(
        &self,
        name: &str,
        context_tag: &str,
    ) -> ProviderResult<AttachOutcome> {
        self.record(&format!("attach_build:{name}:{context_tag}"));
        Ok(AttachOutcome::Attached)
    }
}

/// Credential double; the scripted provider never expires its session.
pub struct NoopCredentials;

#[async_trait]
impl voxbridge_provider::CredentialStore for NoopCredentials {
    async fn refresh(&self, _force: bool) -> ProviderResult<()> {
        Ok(())
    }
}

/// A minimal valid daemon configuration for tests.
pub fn test_config() -> crate::config::DaemonConfig {
    crate::config::DaemonConfig {
        language: "en_US".to_owned(),
        confidence_threshold: 0.7,
        app_id: "app".to_owned(),
        app_key: "key".to_owned(),
        username: "user".to_owned(),
        password: "pass".to_owned(),
        workdir: std::path::PathBuf::from("/tmp/voxbridge-test"),
        dialogs: None,
        mqtt: crate::mqtt::MqttConfig::default(),
    }
}
