//! Daemon configuration.
//!
//! Configuration is an immutable snapshot: every pipeline and engine call
//! receives an `Arc<DaemonConfig>` taken at entry, and reconfiguration
//! replaces the whole snapshot atomically through [`ConfigHandle`].  Nothing
//! in the daemon mutates configuration fields in place.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use voxbridge_provider::AppCredentials;

use crate::error::{DaemonError, Result};
use crate::mqtt::MqttConfig;

fn default_confidence_threshold() -> f64 {
    0.7
}

/// Complete daemon configuration, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Active language tag (e.g. `en_US`).
    pub language: String,

    /// Minimum confidence to route without confirmation.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Provider application id for the understand endpoints.
    pub app_id: String,
    /// Provider application key for the understand endpoints.
    pub app_key: String,
    /// Provider account username, used for session renewal.
    pub username: String,
    /// Provider account password, used for session renewal.
    pub password: String,

    /// Working directory; model records live under `{workdir}/models`.
    pub workdir: PathBuf,

    /// Dialog text directory; defaults to `{workdir}/dialogs`.
    #[serde(default)]
    pub dialogs: Option<PathBuf>,

    /// Message bus connection.
    #[serde(default)]
    pub mqtt: MqttConfig,
}

impl DaemonConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations missing a required credential.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("app_id", &self.app_id),
            ("app_key", &self.app_key),
            ("username", &self.username),
            ("password", &self.password),
            ("language", &self.language),
        ] {
            if value.is_empty() {
                return Err(DaemonError::InvalidConfig {
                    reason: format!("missing parameter `{name}`"),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(DaemonError::InvalidConfig {
                reason: format!(
                    "confidence_threshold {} outside [0, 1]",
                    self.confidence_threshold
                ),
            });
        }
        Ok(())
    }

    /// Application credentials for the understand endpoints.
    pub fn app_credentials(&self) -> AppCredentials {
        AppCredentials {
            app_id: self.app_id.clone(),
            app_key: self.app_key.clone(),
        }
    }

    /// Directory holding the last-synchronized model records.
    pub fn models_dir(&self) -> PathBuf {
        self.workdir.join("models")
    }

    /// Directory holding the localized dialog texts.
    pub fn dialogs_dir(&self) -> PathBuf {
        self.dialogs
            .clone()
            .unwrap_or_else(|| self.workdir.join("dialogs"))
    }
}

/// Shared handle to the current configuration snapshot.
///
/// Readers take a cheap `Arc` clone; reconfiguration swaps the snapshot in
/// one write.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<Arc<DaemonConfig>>>,
}

impl ConfigHandle {
    /// Wrap an initial configuration.
    #[must_use]
    pub fn new(config: DaemonConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<DaemonConfig> {
        self.inner.read().unwrap().clone()
    }

    /// Atomically replace the configuration.
    ///
    /// In-flight operations keep the snapshot they started with.
    pub fn replace(&self, config: DaemonConfig) {
        tracing::info!(language = %config.language, "configuration replaced");
        *self.inner.write().unwrap() = Arc::new(config);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
