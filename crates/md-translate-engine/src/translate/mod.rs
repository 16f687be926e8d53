//! # Translation
//!
//! - **`session`**: the [`Translator`] capability and the [`TranslatorSession`]
//!   guard that acquires it once and releases it on drop
//! - **`merge`**: cache inheritance and the depth-first pass that fills
//!   missing translations

pub mod merge;
pub mod session;

use thiserror::Error;

use crate::model::ModelError;

pub use merge::{inherit_translations, translate_document};
pub use session::{TranslationContext, Translator, TranslatorSession};

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translator used before it was acquired")]
    NotAcquired,
    #[error("translator unavailable: {0}")]
    Unavailable(String),
    #[error("failed to translate {text:?}: {reason}")]
    Failed { text: String, reason: String },
    #[error(transparent)]
    Model(#[from] ModelError),
}
