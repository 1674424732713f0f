//! Spoken-dialog text source.
//!
//! Every non-routable outcome maps to a fixed dialog key; the text behind a
//! key is language-dependent and owned by the deployment, not the code.
//! [`FsDialogSource`] is the default implementation, reading
//! `{base}/{language}/{key}.txt`.

use std::path::PathBuf;

use crate::error::{DaemonError, Result};

/// Well-known dialog keys the daemon can request playback for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKey {
    /// Spoken when the provider matched nothing or an intent was misnamed.
    NotUnderstand,
    /// Spoken when confidence fell below the threshold.
    Uncertain,
    /// Spoken when the target module is not alive.
    CanNotDoIt,
    /// Spoken by the self test.
    IUnderstand,
}

impl DialogKey {
    /// File-name stem for this key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotUnderstand => "not_understand",
            Self::Uncertain => "uncertain",
            Self::CanNotDoIt => "can_not_do_it",
            Self::IUnderstand => "i_understand",
        }
    }
}

impl std::fmt::Display for DialogKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of localized dialog texts.
pub trait DialogSource: Send + Sync {
    /// Dialog text for `key` in `language`.
    fn dialog(&self, language: &str, key: DialogKey) -> Result<String>;
}

/// Filesystem-backed dialog source reading `{base}/{language}/{key}.txt`.
#[derive(Debug, Clone)]
pub struct FsDialogSource {
    base_dir: PathBuf,
}

impl FsDialogSource {
    /// Create a source rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl DialogSource for FsDialogSource {
    fn dialog(&self, language: &str, key: DialogKey) -> Result<String> {
        let path = self
            .base_dir
            .join(language)
            .join(format!("{}.txt", key.as_str()));

        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text.trim_end().to_owned()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DaemonError::DialogMissing {
                    language: language.to_owned(),
                    key: key.as_str().to_owned(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_dialog_for_language_and_key() {
        let dir = tempfile::tempdir().unwrap();
        let lang_dir = dir.path().join("en_US");
        std::fs::create_dir_all(&lang_dir).unwrap();
        std::fs::write(lang_dir.join("uncertain.txt"), "Sorry, could you repeat?\n").unwrap();

        let source = FsDialogSource::new(dir.path());
        let text = source.dialog("en_US", DialogKey::Uncertain).unwrap();
        assert_eq!(text, "Sorry, could you repeat?");
    }

    #[test]
    fn missing_dialog_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsDialogSource::new(dir.path());

        let err = source.dialog("fr_FR", DialogKey::CanNotDoIt).unwrap_err();
        match err {
            DaemonError::DialogMissing { language, key } => {
                assert_eq!(language, "fr_FR");
                assert_eq!(key, "can_not_do_it");
            }
            other => panic!("expected DialogMissing, got {other:?}"),
        }
    }
}
