//! Per-document pipeline and the batch runner that drives it.
//!
//! `process_document` reads a source file, decides whether it needs work,
//! reuses translations from the previous run's cache, fills in the rest
//! through a translator session and writes the rendered result.

pub mod batch;
pub mod cache;
pub mod document;

use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::io::IoError;
use crate::translate::{
    TranslationContext, TranslationError, Translator, TranslatorSession, inherit_translations,
    translate_document,
};

pub use batch::{BatchError, BatchReport, run_batch};
pub use cache::{CacheEnvelope, CacheError, load_cache, remove_cache, store_cache};
pub use document::{DocumentPaths, MarkdownDocument};

/// Settings that shape a single document run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub from_language: String,
    pub to_language: String,
    pub ignore_cache: bool,
    pub new_file: bool,
    pub overwrite: bool,
    pub save_temp_on_complete: bool,
}

impl PipelineOptions {
    pub fn new(from_language: impl Into<String>, to_language: impl Into<String>) -> Self {
        Self {
            from_language: from_language.into(),
            to_language: to_language.into(),
            ignore_cache: false,
            new_file: false,
            overwrite: false,
            save_temp_on_complete: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    #[error("Failed to translate {path}: {source}")]
    Translation {
        path: PathBuf,
        #[source]
        source: TranslationError,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: IoError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Translated {
        output: PathBuf,
        /// Capability calls made for this run.
        translated: usize,
        /// Leaves reused from the cache.
        inherited: usize,
    },
    /// A translated copy already exists.
    Skipped,
}

/// Runs one document through read, gate, cache, translation and write.
pub fn process_document<T: Translator>(
    translator: &mut T,
    path: &Path,
    options: &PipelineOptions,
) -> Result<DocumentOutcome, PipelineError> {
    info!("Processing file: {}", path.display());
    let mut document = MarkdownDocument::from_file(path).map_err(|source| {
        error!("Error reading file {}: {}", path.display(), source);
        PipelineError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if !document.should_be_translated(options.new_file, options.overwrite) {
        info!("Skipping file: {}. Already translated", path.display());
        return Ok(DocumentOutcome::Skipped);
    }

    let inherited = if options.ignore_cache {
        0
    } else {
        load_cache(&document.paths.cache, options)
            .map(|cached| inherit_translations(&mut document.tree, &cached))
            .unwrap_or(0)
    };
    if inherited > 0 {
        info!("{}: reused {} cached translations", path.display(), inherited);
    }

    let ctx = TranslationContext::new(
        options.from_language.as_str(),
        options.to_language.as_str(),
        path.display().to_string(),
    );
    let result = TranslatorSession::open(translator)
        .and_then(|mut session| translate_document(&mut document.tree, &mut session, &ctx));

    let translated = match result {
        Ok(calls) => calls,
        Err(source) => {
            error!("Error while translating file {}: {}", path.display(), source);
            keep_cache(&document, options);
            return Err(PipelineError::Translation {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let output = document
        .write(options.new_file)
        .map_err(|source| {
            error!("Error writing file {}: {}", path.display(), source);
            keep_cache(&document, options);
            PipelineError::Write {
                path: document.paths.output(options.new_file).to_path_buf(),
                source,
            }
        })?
        .to_path_buf();

    if options.save_temp_on_complete {
        keep_cache(&document, options);
    } else if let Err(e) = remove_cache(&document.paths.cache) {
        warn!("Could not remove cache {}: {}", document.paths.cache.display(), e);
    }

    info!("Processed file: {}", output.display());
    Ok(DocumentOutcome::Translated {
        output,
        translated,
        inherited,
    })
}

fn keep_cache(document: &MarkdownDocument, options: &PipelineOptions) {
    if let Err(e) = store_cache(&document.paths.cache, &document.tree, options) {
        warn!("Could not store cache {}: {}", document.paths.cache.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_file;
    use crate::tests::{RecordingTranslator, create_test_dir, create_test_file};

    fn new_file_options() -> PipelineOptions {
        PipelineOptions {
            new_file: true,
            ..PipelineOptions::new("es", "en")
        }
    }

    #[test]
    fn translates_into_sibling_file() {
        let dir = create_test_dir();
        let source = create_test_file(&dir, "doc.md", "Hola");
        let mut translator = RecordingTranslator::default();

        let outcome = process_document(&mut translator, &source, &new_file_options()).unwrap();

        let output = dir.path().join("doc_translated.md");
        assert_eq!(
            outcome,
            DocumentOutcome::Translated {
                output: output.clone(),
                translated: 1,
                inherited: 0
            }
        );
        assert_eq!(read_file(&output).unwrap(), "Hola\n\n[en] Hola\n");
        assert_eq!(translator.released, 1);
        assert!(!dir.path().join(".doc.md.translate-cache.json").exists());
    }

    #[test]
    fn existing_output_is_skipped() {
        let dir = create_test_dir();
        let source = create_test_file(&dir, "doc.md", "Hola");
        create_test_file(&dir, "doc_translated.md", "done");
        let mut translator = RecordingTranslator::default();

        let outcome =
            process_document(&mut translator, &source, &PipelineOptions::new("es", "en")).unwrap();

        assert_eq!(outcome, DocumentOutcome::Skipped);
        assert_eq!(translator.acquired, 0);
    }

    #[test]
    fn failure_writes_nothing_and_keeps_cache() {
        let dir = create_test_dir();
        let source = create_test_file(&dir, "doc.md", "Uno\n\nboom");
        let mut translator = RecordingTranslator::failing_on("boom");

        let result = process_document(&mut translator, &source, &new_file_options());

        assert!(matches!(result, Err(PipelineError::Translation { .. })));
        assert!(!dir.path().join("doc_translated.md").exists());
        let cached = load_cache(
            &dir.path().join(".doc.md.translate-cache.json"),
            &new_file_options(),
        )
        .unwrap();
        assert_eq!(cached.pending_count(), 1);
        assert_eq!(translator.released, 1);
    }

    #[test]
    fn unavailable_translator_is_a_translation_error() {
        let dir = create_test_dir();
        let source = create_test_file(&dir, "doc.md", "Hola");
        let mut translator = RecordingTranslator::unavailable();

        let result = process_document(&mut translator, &source, &new_file_options());

        assert!(matches!(
            result,
            Err(PipelineError::Translation {
                source: TranslationError::Unavailable(_),
                ..
            })
        ));
    }

    #[test]
    fn missing_source_is_a_read_error() {
        let dir = create_test_dir();
        let mut translator = RecordingTranslator::default();
        let result =
            process_document(&mut translator, &dir.path().join("gone.md"), &new_file_options());
        assert!(matches!(result, Err(PipelineError::Read { .. })));
    }
}
