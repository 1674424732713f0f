//! Typed NLU provider boundary for voxbridge.
//!
//! This crate defines:
//!
//! - **Response schema**: a strongly typed, serde-validated view of the
//!   provider's understand responses via [`schema::UnderstandResponse`].
//! - **Client trait**: the [`ProviderClient`] capability interface covering
//!   understanding, model management, and the build lifecycle.
//! - **Credentials**: the [`CredentialStore`] trait for session renewal.

pub mod client;
pub mod credentials;
pub mod error;
pub mod schema;

pub use client::{
    AppCredentials, AttachOutcome, BuildRecord, BuildStatus, ModelSummary, ProviderClient,
};
pub use credentials::CredentialStore;
pub use error::{ProviderError, Result};
pub use schema::{Interpretation, UnderstandResponse};
