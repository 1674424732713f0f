//! Filesystem-backed record of the last-synchronized intent definitions.
//!
//! The store exists for one purpose: change detection.  Before touching the
//! remote provider, the sync pipeline compares the incoming definition text
//! against the copy recorded here; a byte-for-byte match means the remote
//! provider already holds this definition and the sync is a no-op.
//!
//! Records are keyed by `(language, intent, component, file)` and live at a
//! deterministic path under the store's base directory.  The pipeline only
//! writes a record after a successful upload, so the stored content always
//! equals the most recently uploaded definition — never an in-flight one.
//! Records are never deleted by the store itself.

pub mod error;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use error::{Result, StoreError};

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Identity of one intent definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelKey {
    /// BCP-47-ish language tag (e.g. `en_US`).
    pub language: String,
    /// Intent name, doubling as the provider context tag.
    pub intent: String,
    /// The component that published this definition.
    pub component: String,
    /// Definition file name within the component.
    pub file: String,
}

impl ModelKey {
    /// Relative storage path for this key: `{language}/{intent}/{component}/{file}`.
    fn relative_path(&self) -> PathBuf {
        Path::new(&self.language)
            .join(&self.intent)
            .join(&self.component)
            .join(&self.file)
    }

    /// Composite remote model name, `{intent}__{language}`.
    ///
    /// The provider namespaces models by a single flat name, so intent and
    /// language are joined with the same `__` separator used inside intent
    /// values.
    pub fn remote_name(&self) -> String {
        format!("{}__{}", self.intent, self.language)
    }
}

impl std::fmt::Display for ModelKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.language, self.intent, self.component, self.file
        )
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Filesystem-backed store of last-synchronized definition texts.
#[derive(Debug, Clone)]
pub struct ModelStore {
    base_dir: PathBuf,
}

impl ModelStore {
    /// Create a store rooted at `base_dir`.
    ///
    /// The directory is created lazily on first write.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Absolute path of the record for `key`.
    pub fn path_for(&self, key: &ModelKey) -> PathBuf {
        self.base_dir.join(key.relative_path())
    }

    /// Read the recorded definition for `key`, if one exists.
    pub fn read(&self, key: &ModelKey) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether the recorded definition for `key` equals `content`
    /// byte-for-byte.
    pub fn is_current(&self, key: &ModelKey, content: &str) -> Result<bool> {
        Ok(self.read(key)?.as_deref() == Some(content))
    }

    /// Record `content` as the last-synchronized definition for `key`.
    ///
    /// Creates intermediate directories as needed and overwrites any
    /// previous record.
    pub fn write(&self, key: &ModelKey, content: &str) -> Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        tracing::debug!(key = %key, path = %path.display(), "model record written");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
