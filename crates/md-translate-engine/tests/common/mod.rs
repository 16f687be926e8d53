#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use md_translate_engine::{TranslationError, Translator};

/// Translator double shared across clones so batch runs can be inspected.
#[derive(Debug, Clone, Default)]
pub struct MockTranslator {
    calls: Arc<Mutex<Vec<String>>>,
    fail_on: Option<String>,
    active: bool,
}

impl MockTranslator {
    pub fn failing_on(text: &str) -> Self {
        Self {
            fail_on: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Translator for MockTranslator {
    fn acquire(&mut self) -> Result<(), TranslationError> {
        self.active = true;
        Ok(())
    }

    fn translate(&mut self, text: &str, _from: &str, to: &str) -> Result<String, TranslationError> {
        if !self.active {
            return Err(TranslationError::NotAcquired);
        }
        self.calls.lock().unwrap().push(text.to_string());
        if self.fail_on.as_deref() == Some(text) {
            return Err(TranslationError::Failed {
                text: text.to_string(),
                reason: "refused".into(),
            });
        }
        Ok(format!("[{to}] {text}"))
    }

    fn release(&mut self) {
        self.active = false;
    }
}
