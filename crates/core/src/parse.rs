//! Markdown dialect selection and parsing into mdast.
//!
//! Frontmatter is off by default: a leading `---` block is a thematic break
//! followed by ordinary content, so `---\ntitle: x\n---` is a setext heading.

use crate::LinkCheckError;
use markdown::mdast::Node;
use markdown::message::{Message, Place};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Markdown flavour used to parse documents and to slug headings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkdownDialect {
    /// Plain CommonMark with the default slug algorithm.
    #[default]
    CommonMark,
    /// GitHub Flavored Markdown with github-slugger compatible slugs.
    Gfm,
}

impl MarkdownDialect {
    /// Every dialect, in the order they are offered to users.
    pub const ALL: [MarkdownDialect; 2] = [MarkdownDialect::CommonMark, MarkdownDialect::Gfm];

    /// Name used in configuration files.
    pub const fn as_str(self) -> &'static str {
        match self {
            MarkdownDialect::CommonMark => "commonmark",
            MarkdownDialect::Gfm => "gfm",
        }
    }
}

impl fmt::Display for MarkdownDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a dialect name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown markdown dialect '{0}' (expected 'commonmark' or 'gfm')")]
pub struct UnknownDialect(pub String);

impl FromStr for MarkdownDialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarkdownDialect::ALL
            .into_iter()
            .find(|dialect| dialect.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDialect(s.to_string()))
    }
}

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Parse leading YAML/TOML frontmatter into its own node.
    pub frontmatter: bool,
    /// Enable indented code blocks.
    pub code_indented: bool,
    /// Parse raw HTML into html nodes.
    pub raw_html: bool,
}

impl ParseOptions {
    /// CommonMark defaults.
    pub const fn commonmark() -> Self {
        Self {
            gfm: false,
            frontmatter: false,
            code_indented: true,
            raw_html: true,
        }
    }

    /// GFM defaults (tables, autolink literals, footnotes, strikethrough).
    pub const fn gfm() -> Self {
        Self {
            gfm: true,
            ..Self::commonmark()
        }
    }

    /// Options matching a dialect.
    pub const fn for_dialect(dialect: MarkdownDialect) -> Self {
        match dialect {
            MarkdownDialect::CommonMark => Self::commonmark(),
            MarkdownDialect::Gfm => Self::gfm(),
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            code_indented: self.code_indented,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::commonmark()
    }
}

impl From<MarkdownDialect> for ParseOptions {
    fn from(dialect: MarkdownDialect) -> Self {
        Self::for_dialect(dialect)
    }
}

/// Parse markdown into an MDAST tree for the given dialect.
pub fn parse_mdast(input: &str, dialect: MarkdownDialect) -> Result<Node, LinkCheckError> {
    parse_mdast_with_options(input, &ParseOptions::for_dialect(dialect).to_markdown())
}

/// Parse markdown into an MDAST tree using markdown-rs `ParseOptions`.
pub fn parse_mdast_with_options(
    input: &str,
    options: &markdown::ParseOptions,
) -> Result<Node, LinkCheckError> {
    markdown::to_mdast(input, options).map_err(|err| {
        let (line, column) = message_location(&err);
        LinkCheckError::parse_error(err.to_string(), line, column)
    })
}

fn message_location(message: &Message) -> (usize, usize) {
    match message.place.as_deref() {
        Some(Place::Point(point)) => (point.line, point.column),
        Some(Place::Position(position)) => (position.start.line, position.start.column),
        None => (1, 1),
    }
}
