//! Provider error types.
//!
//! Every [`ProviderClient`](crate::ProviderClient) method surfaces failures
//! through [`ProviderError`].  The variants are typed so callers can
//! distinguish a recoverable session expiry from a hard transport failure
//! without inspecting opaque strings.

/// Unified error type for NLU provider interactions.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The stored session credentials were rejected or have expired.
    ///
    /// This replaces the legacy sentinel "no result" returned by the model
    /// listing endpoint; callers may refresh credentials and retry once.
    #[error("provider session expired or not authenticated")]
    SessionExpired,

    /// The underlying transport failed (connection, timeout, protocol).
    #[error("provider transport failure: {reason}")]
    Transport { reason: String },

    /// The provider accepted the request but rejected its content.
    #[error("provider rejected request: {reason}")]
    Rejected { reason: String },

    /// A response arrived but could not be decoded into the typed schema.
    #[error("malformed provider response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Convenience alias used throughout the provider crate.
pub type Result<T> = std::result::Result<T, ProviderError>;
