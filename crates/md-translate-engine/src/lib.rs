pub mod codec;
pub mod io;
pub mod model;
pub mod parsing;
pub mod pipeline;
pub mod render;
pub mod translate;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use codec::CodecError;
pub use io::{IoError, SourceFile, find_markdown_files};
pub use model::{Block, Document, Translatable};
pub use parsing::parse_document;
pub use pipeline::{
    BatchReport, DocumentOutcome, PipelineError, PipelineOptions, process_document, run_batch,
};
pub use translate::{TranslationContext, TranslationError, Translator, TranslatorSession};
