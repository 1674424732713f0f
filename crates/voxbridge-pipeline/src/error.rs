//! Pipeline error types.
//!
//! A pipeline failure is never fatal to the hosting process: the caller
//! logs it and the next delivery of the same definition retries naturally,
//! because the local store only advances past a successful upload.

use voxbridge_provider::ProviderError;
use voxbridge_store::StoreError;

/// Errors surfaced by the model sync and build pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The provider session stayed invalid after one forced credential
    /// refresh.
    #[error("provider session invalid after forced credential refresh")]
    Auth,

    /// The newest build of the model finished with `FAILED`.
    #[error("build failed for model `{model}`")]
    BuildFailed { model: String },

    /// The build wait exceeded the configured poll bound.
    #[error("build wait for model `{model}` exceeded {polls} polls")]
    BuildTimedOut { model: String, polls: u32 },

    /// The newest build settled in a status this pipeline does not handle.
    #[error("unexpected build status `{status}` for model `{model}`")]
    UnexpectedBuildStatus { model: String, status: String },

    /// A provider call failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Reading or writing the local model store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PipelineError>;
