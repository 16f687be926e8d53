use log::info;
use rayon::prelude::*;
use std::path::PathBuf;

use crate::translate::Translator;

use super::{DocumentOutcome, PipelineError, PipelineOptions, process_document};

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Per-document results in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<(PathBuf, Result<DocumentOutcome, PipelineError>)>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn translated(&self) -> usize {
        self.count(|result| matches!(result, Ok(DocumentOutcome::Translated { .. })))
    }

    pub fn skipped(&self) -> usize {
        self.count(|result| matches!(result, Ok(DocumentOutcome::Skipped)))
    }

    pub fn failed(&self) -> usize {
        self.count(Result::is_err)
    }

    fn count(&self, predicate: impl Fn(&Result<DocumentOutcome, PipelineError>) -> bool) -> usize {
        self.results.iter().filter(|(_, result)| predicate(result)).count()
    }
}

/// Processes every file, one translator per worker.
///
/// With `workers <= 1` everything runs on the calling thread with a single
/// translator. Otherwise a dedicated rayon pool of `workers` threads is built
/// and each worker creates its own translator through `make_translator`.
/// A failing document never stops the others.
pub fn run_batch<T, F>(
    files: &[PathBuf],
    options: &PipelineOptions,
    workers: usize,
    make_translator: F,
) -> Result<BatchReport, BatchError>
where
    T: Translator,
    F: Fn() -> T + Sync + Send,
{
    let results = if workers <= 1 {
        let mut translator = make_translator();
        files
            .iter()
            .map(|path| (path.clone(), process_document(&mut translator, path, options)))
            .collect()
    } else {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
        pool.install(|| {
            files
                .par_iter()
                .map_init(&make_translator, |translator, path| {
                    (path.clone(), process_document(translator, path, options))
                })
                .collect()
        })
    };

    let report = BatchReport { results };
    info!(
        "Batch finished: {} translated, {} skipped, {} failed",
        report.translated(),
        report.skipped(),
        report.failed()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{RecordingTranslator, create_test_dir, create_test_file};

    fn options() -> PipelineOptions {
        PipelineOptions {
            new_file: true,
            ..PipelineOptions::new("es", "en")
        }
    }

    #[test]
    fn sequential_batch_reports_each_file() {
        let dir = create_test_dir();
        let good = create_test_file(&dir, "a.md", "Hola");
        let done = create_test_file(&dir, "b.md", "Adiós");
        create_test_file(&dir, "b_translated.md", "done");
        let missing = dir.path().join("c.md");
        let opts = PipelineOptions::new("es", "en");

        let report = run_batch(
            &[good.clone(), done, missing],
            &opts,
            1,
            RecordingTranslator::default,
        )
        .unwrap();

        assert_eq!(report.results.len(), 3);
        assert_eq!(report.results[0].0, good);
        assert_eq!((report.translated(), report.skipped(), report.failed()), (1, 1, 1));
        assert!(report.has_failures());
    }

    #[test]
    fn parallel_batch_keeps_input_order() {
        let dir = create_test_dir();
        let files: Vec<PathBuf> = (0..6)
            .map(|i| create_test_file(&dir, &format!("doc{i}.md"), &format!("Texto {i}")))
            .collect();

        let report = run_batch(&files, &options(), 3, RecordingTranslator::default).unwrap();

        let order: Vec<&PathBuf> = report.results.iter().map(|(path, _)| path).collect();
        assert_eq!(order, files.iter().collect::<Vec<_>>());
        assert_eq!(report.translated(), 6);
        assert!(!report.has_failures());
        assert!(dir.path().join("doc5_translated.md").exists());
    }

    #[test]
    fn empty_batch() {
        let report = run_batch(&[], &options(), 4, RecordingTranslator::default).unwrap();
        assert!(report.results.is_empty());
        assert!(!report.has_failures());
    }
}
