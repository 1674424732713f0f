//! The model synchronization and build pipeline.
//!
//! [`ModelSyncPipeline::sync`] converges the remote provider with one local
//! intent definition: change detection against the local store first, then
//! (only when the content actually changed) list/create/upload against the
//! provider.  [`ModelSyncPipeline::build`] drives a changed model through
//! train → build → poll → attach.
//!
//! Ordering invariant: the local store is written **after** a successful
//! upload.  A failed upload therefore leaves the store untouched and the
//! next delivery of the same definition retries the whole sync.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use voxbridge_provider::{AttachOutcome, BuildStatus, CredentialStore, ModelSummary,
                         ProviderClient, ProviderError};
use voxbridge_store::{ModelKey, ModelStore};

use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One intent definition change, as delivered by the watch stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentUpdate {
    /// Language tag (e.g. `en_US`).
    pub language: String,
    /// Intent name; also the provider context tag a build attaches to.
    pub intent: String,
    /// Component that owns the definition.
    pub component: String,
    /// Definition file name.
    pub file: String,
    /// Raw definition text in the provider's grammar format.
    pub content: String,
}

impl IntentUpdate {
    /// Storage key for this update.
    pub fn key(&self) -> ModelKey {
        ModelKey {
            language: self.language.clone(),
            intent: self.intent.clone(),
            component: self.component.clone(),
            file: self.file.clone(),
        }
    }
}

/// Whether a sync changed anything remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The definition was uploaded; a build should follow.
    Changed,
    /// The definition matched the last-synchronized copy; nothing was sent.
    Unchanged,
}

/// Tuning knobs for the build wait.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Fixed delay between build status polls.
    pub poll_interval: Duration,

    /// Upper bound on the number of polls before giving up.  `None`
    /// reproduces the unbounded legacy behavior; production deployments
    /// should set a bound.
    pub max_polls: Option<u32>,

    /// Free-text note attached to every build.
    pub build_note: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            max_polls: None,
            build_note: "Created by voxbridge".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Orchestrates the local store and the provider client to keep remote
/// models in sync with local intent definitions.
pub struct ModelSyncPipeline {
    provider: Arc<dyn ProviderClient>,
    credentials: Arc<dyn CredentialStore>,
    store: ModelStore,
    config: PipelineConfig,
}

impl ModelSyncPipeline {
    /// Create a pipeline over the given collaborators.
    pub fn new(
        provider: Arc<dyn ProviderClient>,
        credentials: Arc<dyn CredentialStore>,
        store: ModelStore,
        config: PipelineConfig,
    ) -> Self {
        Self {
            provider,
            credentials,
            store,
            config,
        }
    }

    /// Synchronize one definition with the remote provider.
    ///
    /// Returns [`SyncOutcome::Unchanged`] without any remote call when the
    /// definition matches the last-synchronized copy byte-for-byte.
    pub async fn sync(&self, update: &IntentUpdate) -> Result<SyncOutcome> {
        let key = update.key();

        if self.store.is_current(&key, &update.content)? {
            tracing::info!(key = %key, "definition unchanged, skipping sync");
            return Ok(SyncOutcome::Unchanged);
        }

        let remote_name = key.remote_name();
        let models = self.list_models_with_refresh().await?;

        if !models.iter().any(|m| m.name == remote_name) {
            tracing::info!(model = %remote_name, language = %key.language, "creating remote model");
            self.provider
                .create_model(&remote_name, &key.language)
                .await?;
        }

        tracing::info!(key = %key, model = %remote_name, "uploading definition");
        self.provider
            .upload_model(&remote_name, &update.content)
            .await?;

        // Only a successful upload advances the local record.
        self.store.write(&key, &update.content)?;

        tracing::info!(key = %key, model = %remote_name, "definition synchronized");
        Ok(SyncOutcome::Changed)
    }

    /// Train, build, and attach the model for `(intent, language)`.
    ///
    /// Blocks (with a fixed sleep between polls) until the newest build
    /// settles.  Attach failures are logged and swallowed — a build that is
    /// already attached is not an error.
    pub async fn build(&self, intent: &str, language: &str) -> Result<()> {
        let model = format!("{intent}__{language}");

        tracing::info!(model = %model, "training model");
        self.provider.train_model(&model).await?;

        tracing::info!(model = %model, note = %self.config.build_note, "creating build");
        self.provider
            .create_build(&model, &self.config.build_note)
            .await?;

        let status = self.wait_for_newest_build(&model).await?;

        match status {
            BuildStatus::Completed => {
                tracing::info!(model = %model, "build completed");
                self.attach(&model, intent).await;
                Ok(())
            }
            BuildStatus::Failed => {
                tracing::error!(model = %model, "build failed");
                Err(PipelineError::BuildFailed { model })
            }
            other => {
                let status = String::from(other);
                tracing::warn!(model = %model, status = %status, "build settled in unexpected status");
                Err(PipelineError::UnexpectedBuildStatus { model, status })
            }
        }
    }

    // -- Private helpers ----------------------------------------------------

    /// List remote models, force-refreshing credentials once on an expired
    /// session.  A second expiry is [`PipelineError::Auth`].
    async fn list_models_with_refresh(&self) -> Result<Vec<ModelSummary>> {
        match self.provider.list_models().await {
            Ok(models) => Ok(models),
            Err(ProviderError::SessionExpired) => {
                tracing::warn!("provider session expired, refreshing credentials");
                self.credentials.refresh(true).await?;
                match self.provider.list_models().await {
                    Ok(models) => Ok(models),
                    Err(ProviderError::SessionExpired) => Err(PipelineError::Auth),
                    Err(e) => Err(e.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Poll the build list until the newest build (maximum `created_at`)
    /// leaves `PENDING`/`STARTED`, then return its status.
    async fn wait_for_newest_build(&self, model: &str) -> Result<BuildStatus> {
        let mut polls: u32 = 0;

        loop {
            let builds = self.provider.list_builds(model).await?;
            let newest = builds.iter().max_by_key(|b| b.created_at);

            match newest {
                Some(build) if !build.status.is_in_flight() => {
                    return Ok(build.status.clone());
                }
                Some(build) => {
                    tracing::debug!(
                        model = %model,
                        status = ?build.status,
                        polls,
                        "build still in flight"
                    );
                }
                // The provider may briefly list nothing right after a build
                // is created; treat that as in flight.
                None => {
                    tracing::debug!(model = %model, polls, "no builds listed yet");
                }
            }

            polls += 1;
            if let Some(max) = self.config.max_polls {
                if polls >= max {
                    return Err(PipelineError::BuildTimedOut {
                        model: model.to_owned(),
                        polls,
                    });
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Attach the newest build to its context tag.  Never fails: an already
    /// attached build and any provider error are logged and ignored.
    async fn attach(&self, model: &str, context_tag: &str) {
        match self.provider.attach_build(model, context_tag).await {
            Ok(AttachOutcome::Attached) => {
                tracing::info!(model = %model, context_tag = %context_tag, "build attached");
            }
            Ok(AttachOutcome::AlreadyAttached) => {
                tracing::debug!(model = %model, context_tag = %context_tag, "build already attached");
            }
            Err(e) => {
                tracing::warn!(model = %model, error = %e, "attach failed, ignoring");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
