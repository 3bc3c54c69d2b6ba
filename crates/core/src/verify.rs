//! Link verification engine.
//!
//! [`verify_links`] walks the links of one document and yields a
//! [`VerifyLinkError`] for every link that does not resolve. Links that
//! resolve cleanly yield nothing.

use crate::anchor::{AnchorErrorCode, AnchorOutcome, anchor_strategy, check_anchor, match_heading};
use crate::document::{Document, normalize_path};
use crate::model::Link;
use crate::{LinkCheckError, VerifyOptions};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Problems locating a link's target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileErrorCode {
    /// The target does not exist.
    FileNotExists,
    /// The target resolves outside the base directory.
    FileOutsideBase,
    /// The link names its own document and should be written as `#anchor`.
    ConvertPureAnchor,
}

impl FileErrorCode {
    /// Upper snake case name, as shown in reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            FileErrorCode::FileNotExists => "FILE_NOT_EXISTS",
            FileErrorCode::FileOutsideBase => "FILE_OUTSIDE_BASE",
            FileErrorCode::ConvertPureAnchor => "CONVERT_PURE_ANCHOR",
        }
    }
}

impl fmt::Display for FileErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link that failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "errorType", rename_all = "camelCase")]
pub enum VerifyLinkError {
    /// The target file could not be located.
    File {
        /// Failure reason
        #[serde(rename = "errorCode")]
        code: FileErrorCode,
        /// Offending link
        link: Link,
    },
    /// The target exists but the anchor does not resolve inside it.
    Anchor {
        /// Failure reason
        #[serde(rename = "errorCode")]
        code: AnchorErrorCode,
        /// Offending link
        link: Link,
    },
}

impl VerifyLinkError {
    /// The offending link.
    pub fn link(&self) -> &Link {
        match self {
            VerifyLinkError::File { link, .. } | VerifyLinkError::Anchor { link, .. } => link,
        }
    }

    /// `"file"` or `"anchor"`.
    pub fn kind(&self) -> &'static str {
        match self {
            VerifyLinkError::File { .. } => "file",
            VerifyLinkError::Anchor { .. } => "anchor",
        }
    }

    /// The error code name.
    pub fn code_str(&self) -> &'static str {
        match self {
            VerifyLinkError::File { code, .. } => code.as_str(),
            VerifyLinkError::Anchor { code, .. } => code.as_str(),
        }
    }
}

impl fmt::Display for VerifyLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let link = self.link();
        match link.line() {
            Some(line) => write!(f, "line {line}: ")?,
            None => f.write_str("line ?: ")?,
        }
        write!(f, "{} ({} error {})", link.href, self.kind(), self.code_str())
    }
}

/// Starts verifying `links` found in `document`.
///
/// `base` is the containment boundary and must be absolute. The returned
/// iterator checks one link per step, in the order the links are given.
pub fn verify_links<'a, I>(
    base: &Path,
    document: &'a Document,
    links: I,
    options: &'a VerifyOptions,
) -> Result<LinkVerifier<'a, I::IntoIter>, LinkCheckError>
where
    I: IntoIterator<Item = Link>,
{
    if !base.is_absolute() {
        return Err(LinkCheckError::InvalidBasePath(base.to_path_buf()));
    }
    let base = normalize_path(base);
    let document_path = document.absolute_path(&base);
    let document_dir = normalize_path(&base.join(document.dirname()));

    Ok(LinkVerifier {
        base,
        document,
        document_path,
        document_dir,
        options,
        links: links.into_iter(),
    })
}

/// Lazy per-link verifier returned by [`verify_links`].
#[derive(Debug)]
pub struct LinkVerifier<'a, I> {
    base: PathBuf,
    document: &'a Document,
    document_path: PathBuf,
    document_dir: PathBuf,
    options: &'a VerifyOptions,
    links: I,
}

impl<I> Iterator for LinkVerifier<'_, I>
where
    I: Iterator<Item = Link>,
{
    type Item = Result<VerifyLinkError, LinkCheckError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(link) = self.links.next() {
            match self.check(&link) {
                Ok(None) => log::debug!("{}: {} ok", self.document.path().display(), link.href),
                Ok(Some(Verdict::File(code))) => {
                    return Some(Ok(VerifyLinkError::File { code, link }));
                }
                Ok(Some(Verdict::Anchor(code))) => {
                    return Some(Ok(VerifyLinkError::Anchor { code, link }));
                }
                Err(err) => return Some(Err(err)),
            }
        }
        None
    }
}

enum Verdict {
    File(FileErrorCode),
    Anchor(AnchorErrorCode),
}

fn anchor_verdict(outcome: AnchorOutcome) -> Option<Verdict> {
    outcome.error_code().map(Verdict::Anchor)
}

impl<I> LinkVerifier<'_, I> {
    fn check(&self, link: &Link) -> Result<Option<Verdict>, LinkCheckError> {
        if link.url.is_some() {
            log::debug!("skipping absolute link {}", link.href);
            return Ok(None);
        }

        if link.is_pure_anchor() {
            self.check_pure_anchor(&link.href[1..])
        } else {
            self.check_file_link(&link.href)
        }
    }

    fn check_pure_anchor(&self, anchor: &str) -> Result<Option<Verdict>, LinkCheckError> {
        if anchor.is_empty() {
            return Ok(Some(Verdict::Anchor(AnchorErrorCode::EmptyAnchor)));
        }

        let is_doc = self
            .document
            .extension()
            .is_some_and(|ext| self.options.is_doc_extension(&ext));
        if !is_doc {
            return Ok(Some(Verdict::Anchor(AnchorErrorCode::NoAnchorsInFiletype)));
        }

        let outcome = match_heading(anchor, self.document.content(), self.options.dialect)
            .map_err(|err| err.in_file(self.document.path().display().to_string()))?;
        Ok(anchor_verdict(outcome))
    }

    fn check_file_link(&self, href: &str) -> Result<Option<Verdict>, LinkCheckError> {
        let (target, anchor) = match href.split_once('#') {
            Some((target, anchor)) => (target, Some(anchor)),
            None => (href, None),
        };
        let resolved = normalize_path(&self.document_dir.join(target));

        if resolved == self.document_path {
            return Ok(Some(Verdict::File(FileErrorCode::ConvertPureAnchor)));
        }
        if resolved == self.base || !resolved.starts_with(&self.base) {
            return Ok(Some(Verdict::File(FileErrorCode::FileOutsideBase)));
        }
        if !resolved.exists() {
            return Ok(Some(Verdict::File(FileErrorCode::FileNotExists)));
        }

        let Some(anchor) = anchor else {
            return Ok(None);
        };
        if anchor.is_empty() {
            return Ok(Some(Verdict::Anchor(AnchorErrorCode::EmptyAnchor)));
        }
        if resolved.is_dir() {
            return Ok(Some(Verdict::Anchor(AnchorErrorCode::AnchorUndiscoverable)));
        }

        let strategy = anchor_strategy(&resolved, self.options);
        let target = if strategy.needs_content() {
            Document::read(Path::new(""), resolved.as_path())?
        } else {
            Document::new(resolved.as_path(), String::new())
        };
        let outcome = check_anchor(strategy, anchor, target.content(), self.options.dialect)
            .map_err(|err| err.in_file(resolved.display().to_string()))?;
        Ok(anchor_verdict(outcome))
    }
}
