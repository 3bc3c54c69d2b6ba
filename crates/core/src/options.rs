//! Scanner and verifier configuration.

use crate::filetypes::DEFAULT_DOC_EXTENSIONS;
use crate::parse::MarkdownDialect;
use serde::Deserialize;
use std::collections::BTreeSet;

/// Options for the link and heading scanners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanOptions {
    /// Markdown flavour; also selects the slug algorithm.
    pub dialect: MarkdownDialect,
}

impl ScanOptions {
    /// Options for a given dialect.
    pub const fn new(dialect: MarkdownDialect) -> Self {
        Self { dialect }
    }
}

/// Options for link verification.
///
/// Missing fields in a deserialized config fall back to the defaults:
/// CommonMark and `{".md", ".markdown"}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifyOptions {
    /// Markdown flavour used when scanning target headings.
    pub dialect: MarkdownDialect,
    /// Extensions (with leading dot) whose files are markdown documents.
    pub doc_extensions: BTreeSet<String>,
}

impl VerifyOptions {
    /// Default options with a different dialect.
    pub fn with_dialect(mut self, dialect: MarkdownDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Replaces the recognized document extensions.
    pub fn with_doc_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.doc_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `extension` (with leading dot) names a markdown document.
    pub fn is_doc_extension(&self, extension: &str) -> bool {
        self.doc_extensions.contains(extension)
    }

    /// Scanner options matching these verifier options.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new(self.dialect)
    }
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            dialect: MarkdownDialect::default(),
            doc_extensions: DEFAULT_DOC_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = VerifyOptions::default();
        assert_eq!(options.dialect, MarkdownDialect::CommonMark);
        assert!(options.is_doc_extension(".md"));
        assert!(options.is_doc_extension(".markdown"));
        assert!(!options.is_doc_extension(".txt"));
        assert!(!options.is_doc_extension("md"));
    }

    #[test]
    fn partial_config_merges_over_defaults() {
        let options: VerifyOptions = serde_json::from_str(r#"{"dialect": "gfm"}"#).unwrap();
        assert_eq!(options.dialect, MarkdownDialect::Gfm);
        assert_eq!(options.doc_extensions, VerifyOptions::default().doc_extensions);

        let options: VerifyOptions =
            serde_json::from_str(r#"{"docExtensions": [".mdx"]}"#).unwrap();
        assert_eq!(options.dialect, MarkdownDialect::CommonMark);
        assert!(options.is_doc_extension(".mdx"));
        assert!(!options.is_doc_extension(".md"));
    }

    #[test]
    fn builders() {
        let options = VerifyOptions::default()
            .with_dialect(MarkdownDialect::Gfm)
            .with_doc_extensions([".md", ".mdown"]);
        assert_eq!(options.scan_options(), ScanOptions::new(MarkdownDialect::Gfm));
        assert!(options.is_doc_extension(".mdown"));
        assert!(!options.is_doc_extension(".markdown"));
    }

    #[test]
    fn unknown_dialect_is_rejected() {
        let result: Result<ScanOptions, _> = serde_json::from_str(r#"{"dialect": "mdx"}"#);
        assert!(result.is_err());
    }
}
