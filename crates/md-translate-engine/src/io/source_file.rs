use std::path::{Path, PathBuf};

use relative_path::{RelativePath, RelativePathBuf};

/// A discovered markdown file with a path relative to the discovery root.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    path: PathBuf,
    relative_path: RelativePathBuf,
}

impl SourceFile {
    /// Create a SourceFile; `root` should be a prefix of `path`.
    pub fn new(path: PathBuf, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .ok()
            .filter(|relative| !relative.as_os_str().is_empty())
            .and_then(|relative| RelativePathBuf::from_path(relative).ok())
            .unwrap_or_else(|| Self::file_name_of(&path));
        Self {
            path,
            relative_path,
        }
    }

    /// Absolute (or as-given) path on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the discovery root
    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    fn file_name_of(path: &Path) -> RelativePathBuf {
        RelativePathBuf::from(
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        )
    }
}

impl From<SourceFile> for PathBuf {
    fn from(file: SourceFile) -> Self {
        file.path
    }
}
