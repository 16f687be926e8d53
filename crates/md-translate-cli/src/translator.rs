use log::debug;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use md_translate_engine::{TranslationError, Translator};

const FROM_PLACEHOLDER: &str = "{from}";
const TO_PLACEHOLDER: &str = "{to}";

/// Translates by running an external program once per text run.
///
/// The text goes to the program's stdin and the translation is read from its
/// stdout. `{from}` and `{to}` in the arguments are replaced by the language
/// codes.
#[derive(Debug, Clone)]
pub struct CommandTranslator {
    command: String,
    args: Vec<String>,
    active: bool,
}

impl CommandTranslator {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            active: false,
        }
    }

    fn build(&self, from: &str, to: &str) -> Command {
        let mut command = Command::new(&self.command);
        command
            .args(
                self.args
                    .iter()
                    .map(|arg| arg.replace(FROM_PLACEHOLDER, from).replace(TO_PLACEHOLDER, to)),
            )
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl Translator for CommandTranslator {
    fn acquire(&mut self) -> Result<(), TranslationError> {
        self.active = true;
        debug!("using translator command {}", self.command);
        Ok(())
    }

    fn translate(&mut self, text: &str, from: &str, to: &str) -> Result<String, TranslationError> {
        if !self.active {
            return Err(TranslationError::NotAcquired);
        }
        let unavailable = |e: std::io::Error| TranslationError::Unavailable(format!("{}: {e}", self.command));

        let mut child = self.build(from, to).spawn().map_err(unavailable)?;
        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(text.as_bytes())
            && e.kind() != ErrorKind::BrokenPipe
        {
            return Err(unavailable(e));
        }
        let output = child.wait_with_output().map_err(unavailable)?;

        if !output.status.success() {
            return Err(TranslationError::Failed {
                text: text.to_string(),
                reason: format!(
                    "{} exited with {}: {}",
                    self.command,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        let translated = String::from_utf8_lossy(&output.stdout);
        Ok(translated.trim_end_matches(['\n', '\r']).to_string())
    }

    fn release(&mut self) {
        self.active = false;
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use md_translate_engine::TranslatorSession;
    use pretty_assertions::assert_eq;

    #[test]
    fn pipes_text_through_command() {
        let mut translator = CommandTranslator::new("cat", vec![]);
        let mut session = TranslatorSession::open(&mut translator).unwrap();

        assert_eq!(session.translate("Hola mundo", "es", "en").unwrap(), "Hola mundo");
    }

    #[test]
    fn substitutes_language_placeholders() {
        let mut translator = CommandTranslator::new("echo", vec!["{from}->{to}".into()]);
        let mut session = TranslatorSession::open(&mut translator).unwrap();

        assert_eq!(session.translate("ignored", "es", "en").unwrap(), "es->en");
    }

    #[test]
    fn failing_command_is_a_failure() {
        let mut translator =
            CommandTranslator::new("sh", vec!["-c".into(), "echo nope >&2; exit 3".into()]);
        let mut session = TranslatorSession::open(&mut translator).unwrap();

        let err = session.translate("Hola", "es", "en").unwrap_err();

        assert!(matches!(err, TranslationError::Failed { ref reason, .. } if reason.contains("nope")));
    }

    #[test]
    fn missing_command_is_unavailable() {
        let mut translator = CommandTranslator::new("/nonexistent/translator", vec![]);
        let mut session = TranslatorSession::open(&mut translator).unwrap();

        assert!(matches!(
            session.translate("Hola", "es", "en"),
            Err(TranslationError::Unavailable(_))
        ));
    }

    #[test]
    fn must_be_acquired() {
        let mut translator = CommandTranslator::new("cat", vec![]);
        assert!(matches!(
            translator.translate("Hola", "es", "en"),
            Err(TranslationError::NotAcquired)
        ));
    }
}
