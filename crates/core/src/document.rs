//! In-memory file identity handed to the scanners and the verifier.

use crate::LinkCheckError;
use crate::filetypes::extension_of;
use std::path::{Component, Path, PathBuf};

/// A document: its path (relative to the base directory, or absolute) and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    content: String,
}

impl Document {
    /// Creates a document from a path and already-loaded content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Reads `path` (relative to `base`) from disk.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn read(base: &Path, path: impl Into<PathBuf>) -> Result<Self, LinkCheckError> {
        let path = path.into();
        let full = base.join(&path);
        log::trace!("reading {}", full.display());
        let bytes = std::fs::read(&full).map_err(|err| LinkCheckError::io(&full, err))?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };
        Ok(Self { path, content })
    }

    /// Path as given.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Extension including the dot, e.g. `".md"`.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.path)
    }

    /// Directory containing the document (empty for top-level documents).
    pub fn dirname(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }

    /// Absolute, normalized location of the document under `base`.
    pub fn absolute_path(&self, base: &Path) -> PathBuf {
        normalize_path(&base.join(&self.path))
    }
}

/// Lexically resolves `.` and `..` components without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => {
                has_root = true;
                out.push(Path::new("/"));
            }
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::ParentDir) | None if !has_root => out.push(".."),
                _ => {}
            },
            Component::Normal(part) => out.push(part),
        }
    }

    out
}
