use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("translation already set to {existing:?}, refusing to replace it with {attempted:?}")]
    TranslationAlreadySet { existing: String, attempted: String },
}

/// Source text paired with its (optional) translation.
///
/// # Invariants
///
/// - `original` never changes after construction
/// - `translated` moves from `None` to `Some` once; replacing an existing
///   translation with a different value requires [`Translatable::force_translation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translatable {
    original: String,
    translated: Option<String>,
}

impl Translatable {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: None,
        }
    }

    /// Rebuilds a leaf with a previously stored translation (used by the cache codec).
    pub fn with_translation(original: impl Into<String>, translated: Option<String>) -> Self {
        Self {
            original: original.into(),
            translated,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn translated(&self) -> Option<&str> {
        self.translated.as_deref()
    }

    pub fn is_translated(&self) -> bool {
        self.translated.is_some()
    }

    /// True until a translation is stored, whatever the original holds.
    pub fn needs_translation(&self) -> bool {
        self.translated.is_none()
    }

    /// Stores a translation.
    ///
    /// Setting the same value twice is a no-op; setting a different value
    /// once a translation exists fails with [`ModelError::TranslationAlreadySet`].
    pub fn set_translation(&mut self, translated: impl Into<String>) -> Result<(), ModelError> {
        let translated = translated.into();
        match &self.translated {
            None => {
                self.translated = Some(translated);
                Ok(())
            }
            Some(existing) if *existing == translated => Ok(()),
            Some(existing) => Err(ModelError::TranslationAlreadySet {
                existing: existing.clone(),
                attempted: translated,
            }),
        }
    }

    /// Replaces any existing translation.
    pub fn force_translation(&mut self, translated: impl Into<String>) {
        self.translated = Some(translated.into());
    }

    /// Renders the original and, when present, the translation below it
    /// separated by a blank line.
    pub fn render_with(&self, render_one: impl Fn(&str) -> String) -> String {
        match &self.translated {
            None => render_one(&self.original),
            Some(translated) => format!("{}\n\n{}", render_one(&self.original), render_one(translated)),
        }
    }
}
