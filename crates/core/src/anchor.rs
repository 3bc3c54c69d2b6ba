//! Anchor classification and resolution.
//!
//! Files without an extension cannot have their anchors checked. Files with a
//! recognized document extension are scanned for headings, and only heading
//! slugs resolve there. Every other file must be a known text type, in which
//! case the anchor has to be a GitHub-style line pointer (`L10`, `L3-L7`).

use crate::document::Document;
use crate::filetypes::{extension_of, is_text_path};
use crate::headings::headings_in_tree;
use crate::parse::{MarkdownDialect, parse_mdast};
use crate::slug::Slugger;
use crate::{LinkCheckError, VerifyOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::Path;

static LINE_POINTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^L([1-9][0-9]*)=?$").expect("valid line pointer regex"));
static LINE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^L([1-9][0-9]*)-L([1-9][0-9]*)=?$").expect("valid line range regex")
});

/// How an anchor into a given file can be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorStrategy {
    /// No extension: the file's semantics are unknown.
    Undiscoverable,
    /// Markdown document: match against heading slugs.
    Headings,
    /// Plain text: only line pointers are meaningful.
    LinePointers,
    /// Anything else: anchors cannot point into it.
    Binary,
}

impl AnchorStrategy {
    /// Whether resolving needs the target's content.
    pub fn needs_content(self) -> bool {
        matches!(self, AnchorStrategy::Headings | AnchorStrategy::LinePointers)
    }
}

/// Anchor resolution failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnchorErrorCode {
    /// The link ends with `#` and nothing after it.
    EmptyAnchor,
    /// The target is not a text file.
    BinaryFile,
    /// The target has no extension, so its anchor semantics are unknown.
    AnchorUndiscoverable,
    /// The target's file type does not support this anchor.
    NoAnchorsInFiletype,
    /// No heading in the target document has this slug.
    HeadingMatchFail,
    /// The target has fewer lines than the pointer requires.
    LineTargetFail,
    /// The anchor starts like a line pointer but is malformed.
    LineTargetInvalid,
    /// A line range whose start is not before its end.
    MultiLineTargetRangeInvalid,
}

impl AnchorErrorCode {
    /// Upper snake case name, as shown in reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            AnchorErrorCode::EmptyAnchor => "EMPTY_ANCHOR",
            AnchorErrorCode::BinaryFile => "BINARY_FILE",
            AnchorErrorCode::AnchorUndiscoverable => "ANCHOR_UNDISCOVERABLE",
            AnchorErrorCode::NoAnchorsInFiletype => "NO_ANCHORS_IN_FILETYPE",
            AnchorErrorCode::HeadingMatchFail => "HEADING_MATCH_FAIL",
            AnchorErrorCode::LineTargetFail => "LINE_TARGET_FAIL",
            AnchorErrorCode::LineTargetInvalid => "LINE_TARGET_INVALID",
            AnchorErrorCode::MultiLineTargetRangeInvalid => "MULTI_LINE_TARGET_RANGE_INVALID",
        }
    }
}

impl fmt::Display for AnchorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking one anchor against one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorOutcome {
    /// A heading with this slug exists.
    HeadingMatch,
    /// The line pointer or range is within the file.
    LineTarget,
    /// The anchor does not resolve.
    Failed(AnchorErrorCode),
}

impl AnchorOutcome {
    /// Whether the anchor resolved.
    pub fn is_success(self) -> bool {
        !matches!(self, AnchorOutcome::Failed(_))
    }

    /// The failure code, if any.
    pub fn error_code(self) -> Option<AnchorErrorCode> {
        match self {
            AnchorOutcome::Failed(code) => Some(code),
            _ => None,
        }
    }
}

/// Picks the resolution strategy for anchors into `path`.
pub fn anchor_strategy(path: &Path, options: &VerifyOptions) -> AnchorStrategy {
    let Some(extension) = extension_of(path) else {
        return AnchorStrategy::Undiscoverable;
    };
    if options.is_doc_extension(&extension) {
        AnchorStrategy::Headings
    } else if is_text_path(path) {
        AnchorStrategy::LinePointers
    } else {
        AnchorStrategy::Binary
    }
}

/// Resolves `anchor` (without the leading `#`) against a target's `content`.
///
/// `content` is only consulted for the [`AnchorStrategy::Headings`] and
/// [`AnchorStrategy::LinePointers`] strategies.
pub fn check_anchor(
    strategy: AnchorStrategy,
    anchor: &str,
    content: &str,
    dialect: MarkdownDialect,
) -> Result<AnchorOutcome, LinkCheckError> {
    if anchor.is_empty() {
        return Ok(AnchorOutcome::Failed(AnchorErrorCode::EmptyAnchor));
    }

    let outcome = match strategy {
        AnchorStrategy::Undiscoverable => {
            AnchorOutcome::Failed(AnchorErrorCode::AnchorUndiscoverable)
        }
        AnchorStrategy::Binary => AnchorOutcome::Failed(AnchorErrorCode::BinaryFile),
        AnchorStrategy::Headings => match_heading(anchor, content, dialect)?,
        AnchorStrategy::LinePointers => match_line_pointer(anchor, content),
    };
    Ok(outcome)
}

/// Classifies and resolves `anchor` against a loaded target document.
pub fn classify_anchor(
    target: &Document,
    anchor: &str,
    options: &VerifyOptions,
) -> Result<AnchorOutcome, LinkCheckError> {
    let strategy = anchor_strategy(target.path(), options);
    check_anchor(strategy, anchor, target.content(), options.dialect)
        .map_err(|err| err.in_file(target.path().display().to_string()))
}

/// Matches `anchor` against the slugs of every heading in `content`.
pub fn match_heading(
    anchor: &str,
    content: &str,
    dialect: MarkdownDialect,
) -> Result<AnchorOutcome, LinkCheckError> {
    let root = parse_mdast(content, dialect)?;
    let found = headings_in_tree(&root, Slugger::for_dialect(dialect))
        .any(|heading| heading.anchor == anchor);
    Ok(if found {
        AnchorOutcome::HeadingMatch
    } else {
        AnchorOutcome::Failed(AnchorErrorCode::HeadingMatchFail)
    })
}

/// Resolves `L<n>` and `L<start>-L<end>` pointers against raw newline counts.
pub fn match_line_pointer(anchor: &str, content: &str) -> AnchorOutcome {
    if let Some(caps) = LINE_POINTER.captures(anchor) {
        return line_target(&caps[1], content);
    }

    if let Some(caps) = LINE_RANGE.captures(anchor) {
        let (start, end) = (parse_line(&caps[1]), parse_line(&caps[2]));
        if start >= end {
            return AnchorOutcome::Failed(AnchorErrorCode::MultiLineTargetRangeInvalid);
        }
        return line_target(&caps[2], content);
    }

    if anchor.starts_with('L') {
        return AnchorOutcome::Failed(AnchorErrorCode::LineTargetInvalid);
    }

    AnchorOutcome::Failed(AnchorErrorCode::NoAnchorsInFiletype)
}

/// Digits too long for `u64` saturate; no file has that many lines.
fn parse_line(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

fn line_target(digits: &str, content: &str) -> AnchorOutcome {
    if has_required_number_of_lines(content, parse_line(digits)) {
        AnchorOutcome::LineTarget
    } else {
        AnchorOutcome::Failed(AnchorErrorCode::LineTargetFail)
    }
}

/// True when `text` contains at least `required` newline characters.
///
/// A final line without a trailing newline is not counted.
pub fn has_required_number_of_lines(text: &str, required: u64) -> bool {
    let mut count = 0u64;
    for _ in text.bytes().filter(|&b| b == b'\n') {
        count += 1;
        if count >= required {
            return true;
        }
    }
    required == 0
}
