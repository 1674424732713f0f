//! Session credential management.
//!
//! Model-management endpoints authenticate with a persisted session (the
//! provider has no API tokens for these; a login produces session cookies
//! that the [`ProviderClient`](crate::ProviderClient) implementation reads
//! from disk).  The pipeline never sees the credentials themselves — it only
//! asks for a refresh when the provider reports an expired session.

use async_trait::async_trait;

use crate::error::Result;

/// Persists session credentials for the provider's management endpoints.
///
/// Implementations hold the account username/password and know where the
/// session material lives.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Ensure valid session credentials are persisted.
    ///
    /// With `force = false` an implementation may keep an existing session;
    /// with `force = true` it must renew unconditionally.
    async fn refresh(&self, force: bool) -> Result<()>;
}
