use log::debug;

use super::TranslationError;

/// An external translation capability.
///
/// Implementations may hold a scarce resource (a process, a connection);
/// [`TranslatorSession`] brackets its use between `acquire` and `release`.
pub trait Translator {
    fn acquire(&mut self) -> Result<(), TranslationError> {
        Ok(())
    }

    fn translate(&mut self, text: &str, from: &str, to: &str) -> Result<String, TranslationError>;

    fn release(&mut self) {}
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn acquire(&mut self) -> Result<(), TranslationError> {
        (**self).acquire()
    }

    fn translate(&mut self, text: &str, from: &str, to: &str) -> Result<String, TranslationError> {
        (**self).translate(text, from, to)
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Language pair plus a label (usually the file path) for log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationContext {
    pub from_language: String,
    pub to_language: String,
    pub label: String,
}

impl TranslationContext {
    pub fn new(
        from_language: impl Into<String>,
        to_language: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            from_language: from_language.into(),
            to_language: to_language.into(),
            label: label.into(),
        }
    }
}

/// An acquired translator. Released exactly once when dropped, whichever way
/// the scope is left.
pub struct TranslatorSession<'t, T: Translator> {
    translator: &'t mut T,
}

impl<'t, T: Translator> TranslatorSession<'t, T> {
    pub fn open(translator: &'t mut T) -> Result<Self, TranslationError> {
        translator.acquire()?;
        debug!("translator acquired");
        Ok(Self { translator })
    }

    pub fn translate(&mut self, text: &str, from: &str, to: &str) -> Result<String, TranslationError> {
        self.translator.translate(text, from, to)
    }
}

impl<T: Translator> Drop for TranslatorSession<'_, T> {
    fn drop(&mut self) {
        self.translator.release();
        debug!("translator released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::RecordingTranslator;

    #[test]
    fn session_releases_on_drop() {
        let mut translator = RecordingTranslator::default();
        {
            let mut session = TranslatorSession::open(&mut translator).unwrap();
            assert_eq!(session.translate("Hola", "es", "en").unwrap(), "[en] Hola");
        }
        assert_eq!(translator.acquired, 1);
        assert_eq!(translator.released, 1);
    }

    #[test]
    fn session_releases_after_failure() {
        let mut translator = RecordingTranslator::failing_on("boom");
        {
            let mut session = TranslatorSession::open(&mut translator).unwrap();
            assert!(session.translate("boom", "es", "en").is_err());
        }
        assert_eq!(translator.released, 1);
    }

    #[test]
    fn failed_acquire_is_not_released() {
        let mut translator = RecordingTranslator::unavailable();
        assert!(matches!(
            TranslatorSession::open(&mut translator),
            Err(TranslationError::Unavailable(_))
        ));
        assert_eq!(translator.released, 0);
    }

    #[test]
    fn boxed_translator_delegates() {
        let mut boxed: Box<dyn Translator> = Box::new(RecordingTranslator::default());
        let mut session = TranslatorSession::open(&mut boxed).unwrap();
        assert_eq!(session.translate("x", "a", "b").unwrap(), "[b] x");
    }
}
