//! Values produced by the scanners.

use serde::Serialize;
use url::Url;

/// A 1-based line/column point in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Start and end points of a node in its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// First character of the node
    pub start: Point,
    /// Point just after the node
    pub end: Point,
}

impl From<&markdown::unist::Position> for Position {
    fn from(position: &markdown::unist::Position) -> Self {
        Self {
            start: Point {
                line: position.start.line,
                column: position.start.column,
            },
            end: Point {
                line: position.end.line,
                column: position.end.column,
            },
        }
    }
}

/// A hyperlink found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Raw link destination as written
    pub href: String,
    /// Parsed URL when `href` is absolute; `None` for relative paths and anchors
    pub url: Option<Url>,
    /// Where the link appears in its document
    pub position: Option<Position>,
}

impl Link {
    /// Builds a link from an href, classifying it as absolute or relative.
    pub fn new(href: impl Into<String>) -> Self {
        let href = href.into();
        let url = crate::href::convert_href_to_url(&href);
        Self {
            href,
            url,
            position: None,
        }
    }

    /// Builds a relative link without URL classification.
    pub fn relative(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            url: None,
            position: None,
        }
    }

    /// Sets the source position.
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Whether the link points into its own document (`#fragment`).
    pub fn is_pure_anchor(&self) -> bool {
        self.href.starts_with('#')
    }

    /// Source line of the link, if known.
    pub fn line(&self) -> Option<usize> {
        self.position.map(|p| p.start.line)
    }
}

/// A heading found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading level, 1 through 6
    pub depth: u8,
    /// Concatenated plain text of the heading
    pub text: String,
    /// Unique slug within the document
    pub anchor: String,
    /// Where the heading appears in its document
    pub position: Option<Position>,
}
