//! Model lifecycle pipeline for voxbridge.
//!
//! Converges remote NLU models with local intent definitions:
//! content-based change detection against the local store, idempotent
//! create/upload, and an asynchronous train → build → poll → attach chain.

pub mod error;
pub mod sync;

pub use error::{PipelineError, Result};
pub use sync::{IntentUpdate, ModelSyncPipeline, PipelineConfig, SyncOutcome};
