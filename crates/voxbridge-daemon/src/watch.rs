//! Intent definition watch loop.
//!
//! An external intent source delivers definition changes one at a time as a
//! lazy, infinite stream.  Each delivery drives one sync, and a changed
//! definition is followed by a build.  Failures are logged and the loop
//! moves on: the store only advances past a successful upload, so the next
//! delivery of the same definition retries naturally.

use async_trait::async_trait;
use tokio::sync::mpsc;
use voxbridge_pipeline::{IntentUpdate, ModelSyncPipeline, SyncOutcome};

/// Ordered stream of intent definition changes.
///
/// The stream is non-restartable; when it ends the watch loop returns.
#[async_trait]
pub trait IntentChangeStream: Send {
    /// The next change, or `None` when the stream has ended.
    async fn next_change(&mut self) -> Option<IntentUpdate>;
}

/// [`IntentChangeStream`] over a tokio channel, for wiring the watch loop
/// to whatever transport delivers changes.
pub struct ChannelChangeStream {
    receiver: mpsc::Receiver<IntentUpdate>,
}

impl ChannelChangeStream {
    /// Wrap a channel receiver.
    #[must_use]
    pub fn new(receiver: mpsc::Receiver<IntentUpdate>) -> Self {
        Self { receiver }
    }
}

#[async_trait]
impl IntentChangeStream for ChannelChangeStream {
    async fn next_change(&mut self) -> Option<IntentUpdate> {
        self.receiver.recv().await
    }
}

/// Drive the pipeline from a change stream until the stream ends.
pub async fn watch_intents<S: IntentChangeStream>(pipeline: &ModelSyncPipeline, stream: &mut S) {
    while let Some(update) = stream.next_change().await {
        tracing::info!(
            intent = %update.intent,
            language = %update.language,
            component = %update.component,
            file = %update.file,
            "intent definition change received"
        );

        match pipeline.sync(&update).await {
            Ok(SyncOutcome::Unchanged) => {}
            Ok(SyncOutcome::Changed) => {
                if let Err(e) = pipeline.build(&update.intent, &update.language).await {
                    tracing::error!(intent = %update.intent, error = %e, "build failed");
                }
            }
            Err(e) => {
                tracing::error!(intent = %update.intent, error = %e, "sync failed");
            }
        }
    }

    tracing::info!("intent change stream ended");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use voxbridge_pipeline::PipelineConfig;
    use voxbridge_store::ModelStore;

    use crate::testutil::{NoopCredentials, ScriptedProvider};

    use super::*;

    fn update(content: &str) -> IntentUpdate {
        IntentUpdate {
            language: "en_US".to_owned(),
            intent: "light".to_owned(),
            component: "aptitudes".to_owned(),
            file: "light.trsx".to_owned(),
            content: content.to_owned(),
        }
    }

    #[tokio::test]
    async fn changed_definitions_are_synced_and_built() {
        let provider = Arc::new(ScriptedProvider::default());
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ModelSyncPipeline::new(
            provider.clone(),
            Arc::new(NoopCredentials),
            ModelStore::new(dir.path()),
            PipelineConfig {
                poll_interval: Duration::from_millis(1),
                max_polls: Some(10),
                build_note: "test".to_owned(),
            },
        );

        let (tx, rx) = mpsc::channel(4);
        let mut stream = ChannelChangeStream::new(rx);

        tx.send(update("<grammar v1/>")).await.unwrap();
        // Re-delivery of identical content must not trigger a second build.
        tx.send(update("<grammar v1/>")).await.unwrap();
        drop(tx);

        watch_intents(&pipeline, &mut stream).await;

        let calls = provider.calls();
        let builds = calls
            .iter()
            .filter(|c| c.starts_with("create_build"))
            .count();
        let uploads = calls
            .iter()
            .filter(|c| c.starts_with("upload_model"))
            .count();
        assert_eq!(uploads, 1);
        assert_eq!(builds, 1);
        assert!(calls.contains(&"attach_build:light__en_US:light".to_owned()));
    }
}
