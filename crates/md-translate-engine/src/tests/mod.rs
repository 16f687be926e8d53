use std::{fs, path::PathBuf};
use tempfile::TempDir;

use crate::translate::{TranslationError, Translator};

/// Create a temporary directory for test documents
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test markdown file with content, creating parent folders as needed
pub fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Translator double that prefixes the target language and records every call.
#[derive(Debug, Default)]
pub struct RecordingTranslator {
    pub calls: Vec<String>,
    pub acquired: usize,
    pub released: usize,
    active: bool,
    fail_on: Option<String>,
    unavailable: bool,
}

impl RecordingTranslator {
    pub fn failing_on(text: &str) -> Self {
        Self {
            fail_on: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

impl Translator for RecordingTranslator {
    fn acquire(&mut self) -> Result<(), TranslationError> {
        if self.unavailable {
            return Err(TranslationError::Unavailable("offline".into()));
        }
        self.acquired += 1;
        self.active = true;
        Ok(())
    }

    fn translate(&mut self, text: &str, _from: &str, to: &str) -> Result<String, TranslationError> {
        if !self.active {
            return Err(TranslationError::NotAcquired);
        }
        self.calls.push(text.to_string());
        if self.fail_on.as_deref() == Some(text) {
            return Err(TranslationError::Failed {
                text: text.to_string(),
                reason: "refused".into(),
            });
        }
        Ok(format!("[{to}] {text}"))
    }

    fn release(&mut self) {
        self.released += 1;
        self.active = false;
    }
}
