//! Daemon error types.

use voxbridge_provider::ProviderError;

/// Errors surfaced by the daemon glue layer.
#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    /// Publishing or calling over the message bus failed.
    #[error("messaging failure: {reason}")]
    Messaging { reason: String },

    /// No dialog text exists for the given language/key pair.
    #[error("dialog `{key}` not found for language `{language}`")]
    DialogMissing { language: String, key: String },

    /// A provider call failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The configuration is missing a required parameter.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, DaemonError>;
