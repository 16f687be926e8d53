use std::path::{Path, PathBuf};

use crate::io::{self, IoError};
use crate::model::Document;
use crate::parsing::parse_document;

/// Suffix appended to the file stem of a translated copy.
pub const TRANSLATED_SUFFIX: &str = "_translated";
const CACHE_SUFFIX: &str = ".translate-cache.json";

/// Where a source document, its translated copy and its cache live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPaths {
    pub source: PathBuf,
    pub translated: PathBuf,
    pub cache: PathBuf,
}

impl DocumentPaths {
    pub fn for_source(source: &Path) -> Self {
        let dir = source.parent().unwrap_or(Path::new(""));
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            source: source.to_path_buf(),
            translated: dir.join(format!("{stem}{TRANSLATED_SUFFIX}.md")),
            cache: dir.join(format!(".{file_name}{CACHE_SUFFIX}")),
        }
    }

    /// Output path: the translated sibling for `new_file`, the source otherwise.
    pub fn output(&self, new_file: bool) -> &Path {
        if new_file { &self.translated } else { &self.source }
    }
}

/// A parsed source document and the paths it reads from and writes to.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownDocument {
    pub paths: DocumentPaths,
    pub tree: Document,
}

impl MarkdownDocument {
    pub fn from_file(path: &Path) -> Result<Self, IoError> {
        let content = io::read_file(path)?;
        Ok(Self {
            paths: DocumentPaths::for_source(path),
            tree: parse_document(&content),
        })
    }

    /// False only when a translated copy already exists and neither
    /// `new_file` nor `overwrite` asks for another run.
    pub fn should_be_translated(&self, new_file: bool, overwrite: bool) -> bool {
        new_file || overwrite || !self.paths.translated.exists()
    }

    /// Renders the tree and writes it; returns the path written.
    pub fn write(&self, new_file: bool) -> Result<&Path, IoError> {
        let output = self.paths.output(new_file);
        let mut rendered = self.tree.render();
        rendered.push('\n');
        io::write_file(output, &rendered)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};

    #[test]
    fn derived_paths() {
        let paths = DocumentPaths::for_source(Path::new("docs/guide.md"));
        assert_eq!(paths.translated, PathBuf::from("docs/guide_translated.md"));
        assert_eq!(paths.cache, PathBuf::from("docs/.guide.md.translate-cache.json"));
        assert_eq!(paths.output(true), Path::new("docs/guide_translated.md"));
        assert_eq!(paths.output(false), Path::new("docs/guide.md"));
    }

    #[test]
    fn gate_follows_existing_output() {
        let dir = create_test_dir();
        let source = create_test_file(&dir, "doc.md", "Hola");
        let document = MarkdownDocument::from_file(&source).unwrap();

        assert!(document.should_be_translated(false, false));

        create_test_file(&dir, "doc_translated.md", "Hola\n\nHello");
        assert!(!document.should_be_translated(false, false));
        assert!(document.should_be_translated(true, false));
        assert!(document.should_be_translated(false, true));
    }

    #[test]
    fn write_to_translated_sibling() {
        let dir = create_test_dir();
        let source = create_test_file(&dir, "doc.md", "# Hola");
        let document = MarkdownDocument::from_file(&source).unwrap();

        let output = document.write(true).unwrap();

        assert_eq!(output, dir.path().join("doc_translated.md"));
        assert_eq!(io::read_file(output).unwrap(), "# Hola\n");
        assert_eq!(io::read_file(&source).unwrap(), "# Hola");
    }

    #[test]
    fn missing_source() {
        let dir = create_test_dir();
        let result = MarkdownDocument::from_file(&dir.path().join("gone.md"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }
}
