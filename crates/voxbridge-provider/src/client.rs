//! Provider client trait and model-management types.
//!
//! [`ProviderClient`] is the single seam between the core and the remote
//! NLU/model-management service.  The transport behind it (HTTP, browser
//! automation, a test double) is deliberately out of scope; the core only
//! depends on this trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::UnderstandResponse;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// Application credentials for the understand endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppCredentials {
    /// Provider-issued application identifier.
    pub app_id: String,
    /// Provider-issued application key.
    pub app_key: String,
}

/// One entry in the remote model listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Composite remote model name, `{intent}__{language}`.
    pub name: String,
}

/// Status of a remote model build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildStatus {
    /// Queued, not yet started.
    Pending,
    /// Build in progress.
    Started,
    /// Build finished successfully and can be attached.
    Completed,
    /// Build finished with an error.
    Failed,
    /// A status string this client does not know about.
    Unknown(String),
}

impl From<String> for BuildStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDING" => Self::Pending,
            "STARTED" => Self::Started,
            "COMPLETED" => Self::Completed,
            "FAILED" => Self::Failed,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<BuildStatus> for String {
    fn from(status: BuildStatus) -> Self {
        match status {
            BuildStatus::Pending => "PENDING".to_owned(),
            BuildStatus::Started => "STARTED".to_owned(),
            BuildStatus::Completed => "COMPLETED".to_owned(),
            BuildStatus::Failed => "FAILED".to_owned(),
            BuildStatus::Unknown(raw) => raw,
        }
    }
}

impl BuildStatus {
    /// Whether the build is still in flight and worth polling again.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Pending | Self::Started)
    }
}

/// One build of a remote model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRecord {
    /// When the build was created; the newest build is authoritative.
    pub created_at: DateTime<Utc>,
    /// Current build status.
    pub status: BuildStatus,
}

/// Result of attaching a build to a context tag.
///
/// The legacy client signalled "already attached" by throwing; here it is a
/// first-class, non-error outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// The build was attached.
    Attached,
    /// The build was already attached to this context tag.
    AlreadyAttached,
}

// ---------------------------------------------------------------------------
// Core trait
// ---------------------------------------------------------------------------

/// Remote NLU and model-management service.
///
/// Implementations own their session state; the pipeline only signals a
/// forced refresh through [`CredentialStore`](crate::CredentialStore) when
/// a call reports [`ProviderError::SessionExpired`](crate::ProviderError::SessionExpired).
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Run NLU over a text utterance.
    async fn understand_text(
        &self,
        app: &AppCredentials,
        context_tag: &str,
        language: &str,
        text: &str,
    ) -> Result<UnderstandResponse>;

    /// Run NLU over a live audio capture (the provider records from the
    /// microphone until end-of-speech).
    async fn understand_audio(
        &self,
        app: &AppCredentials,
        context_tag: &str,
        language: &str,
    ) -> Result<UnderstandResponse>;

    /// List all remote models owned by the current session.
    async fn list_models(&self) -> Result<Vec<ModelSummary>>;

    /// Create an empty remote model for the given language.
    async fn create_model(&self, name: &str, language: &str) -> Result<()>;

    /// Upload a definition (grammar) into an existing remote model.
    async fn upload_model(&self, name: &str, content: &str) -> Result<()>;

    /// Trigger training of a remote model.
    async fn train_model(&self, name: &str) -> Result<()>;

    /// Create a new build of a trained model, with a free-text note.
    async fn create_build(&self, name: &str, note: &str) -> Result<()>;

    /// List the builds of a remote model, in provider order.
    async fn list_builds(&self, name: &str) -> Result<Vec<BuildRecord>>;

    /// Attach the newest build of a model to a context tag.
    async fn attach_build(&self, name: &str, context_tag: &str) -> Result<AttachOutcome>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
