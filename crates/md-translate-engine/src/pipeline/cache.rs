use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::codec;
use crate::io::{self, IoError};
use crate::model::Document;

use super::PipelineOptions;

/// On-disk cache file: the encoded tree plus the language pair it was
/// translated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEnvelope {
    pub from_language: String,
    pub to_language: String,
    pub document: serde_json::Value,
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("Invalid cache file: {0}")]
    Json(#[from] serde_json::Error),
}

fn read_envelope(path: &Path) -> Result<Option<CacheEnvelope>, CacheError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = io::read_file(path)?;
    Ok(Some(codec::read_json(&content)?))
}

/// Loads the cached tree for a document, if there is a usable one.
///
/// A cache for another language pair is ignored. An unreadable or
/// undecodable cache is logged and ignored, so the document is translated
/// from scratch.
pub fn load_cache(path: &Path, options: &PipelineOptions) -> Option<Document> {
    let envelope = match read_envelope(path) {
        Ok(Some(envelope)) => envelope,
        Ok(None) => {
            debug!("No cache at {}", path.display());
            return None;
        }
        Err(e) => {
            warn!("Ignoring cache {}: {}", path.display(), e);
            return None;
        }
    };
    if envelope.from_language != options.from_language
        || envelope.to_language != options.to_language
    {
        info!(
            "Ignoring cache {}: made for {} -> {}",
            path.display(),
            envelope.from_language,
            envelope.to_language
        );
        return None;
    }
    match codec::decode(&envelope.document) {
        Ok(document) => Some(document),
        Err(e) => {
            warn!("Ignoring cache {}: {}", path.display(), e);
            None
        }
    }
}

pub fn store_cache(path: &Path, document: &Document, options: &PipelineOptions) -> Result<(), CacheError> {
    let envelope = CacheEnvelope {
        from_language: options.from_language.clone(),
        to_language: options.to_language.clone(),
        document: codec::encode(document),
    };
    io::write_file(path, &serde_json::to_string_pretty(&envelope)?)?;
    debug!("Stored cache {}", path.display());
    Ok(())
}

pub fn remove_cache(path: &Path) -> Result<(), CacheError> {
    if path.exists() {
        fs::remove_file(path).map_err(IoError::Io)?;
        debug!("Removed cache {}", path.display());
    }
    Ok(())
}
