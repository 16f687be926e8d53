mod source_file;

use log::{debug, info, warn};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub use source_file::SourceFile;

/// Marker in file names of generated output; such files are never inputs.
pub const TRANSLATED_MARKER: &str = "_translated";

const MARKDOWN_GLOB: &str = "**/*.md";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Failed to scan directory: {0}")]
    Glob(#[from] glob::GlobError),
}

/// Read a markdown file and return its content
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write content to a file, creating parent directories if they don't exist
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }
    fs::write(path, content).map_err(IoError::Io)
}

pub fn is_translated_output(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().contains(TRANSLATED_MARKER))
}

/// Collects the markdown files to translate.
///
/// Every input must exist. Files are taken as given, directories are searched
/// recursively for `*.md`. Generated `_translated` files are dropped.
pub fn find_markdown_files(paths: &[PathBuf]) -> Result<Vec<SourceFile>, IoError> {
    let mut found = Vec::new();
    for path in paths {
        if !path.exists() {
            return Err(IoError::NotFound(path.clone()));
        }
        if path.is_file() {
            debug!("Found file: {}", path.display());
            found.push(path.clone());
            continue;
        }
        let pattern = path.join(MARKDOWN_GLOB);
        for entry in glob::glob(&pattern.to_string_lossy())? {
            let file = entry?;
            if file.is_file() {
                debug!("Found file: {}", file.display());
                found.push(file);
            }
        }
    }

    found.retain(|file| !is_translated_output(file));
    found.sort();
    found.dedup();

    let Some(root) = common_root(&found) else {
        warn!("No markdown files to process");
        return Ok(vec![]);
    };
    let files: Vec<SourceFile> = found
        .into_iter()
        .map(|path| SourceFile::new(path, &root))
        .collect();
    info!(
        "Found {} files to process: {}",
        files.len(),
        files
            .iter()
            .map(|file| file.relative_path().as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(files)
}

/// Longest directory prefix shared by every path.
pub fn common_root(paths: &[PathBuf]) -> Option<PathBuf> {
    let (first, rest) = paths.split_first()?;
    let mut shared: Vec<Component<'_>> = first.parent().unwrap_or(first).components().collect();
    for path in rest {
        let parent = path.parent().unwrap_or(path);
        let common = shared
            .iter()
            .zip(parent.components())
            .take_while(|(a, b)| *a == b)
            .count();
        shared.truncate(common);
    }
    Some(shared.iter().collect())
}
