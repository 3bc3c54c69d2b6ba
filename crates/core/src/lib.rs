#![deny(missing_docs)]
//! linkvet core: markdown link and heading scanning, anchor slugs, and
//! offline verification of relative links against a base directory.
//!
//! ```no_run
//! use linkvet_core::{Document, VerifyOptions, scan_file_for_links, verify_links};
//! use std::path::Path;
//!
//! let base = Path::new("/srv/repo");
//! let options = VerifyOptions::default();
//! let document = Document::read(base, "README.md")?;
//! let links = scan_file_for_links(&document, &options.scan_options())?;
//! for result in verify_links(base, &document, links, &options)? {
//!     println!("{}", result?);
//! }
//! # Ok::<(), linkvet_core::LinkCheckError>(())
//! ```

/// Anchor classification: heading slugs, line pointers, file types.
pub mod anchor;
/// Source documents and path normalization.
pub mod document;
/// Core error types.
pub mod error;
/// Text file extension tables.
pub mod filetypes;
/// Heading scanner.
pub mod headings;
/// Absolute URL detection.
pub mod href;
/// Link scanner.
pub mod links;
/// Scanner output values.
pub mod model;
/// Scanner and verifier options.
pub mod options;
/// Markdown parsing on top of markdown-rs.
pub mod parse;
/// Generic syntax tree node selection.
pub mod select;
/// Heading slug generation.
pub mod slug;
/// Link verification engine.
pub mod verify;

pub use anchor::{
    AnchorErrorCode, AnchorOutcome, AnchorStrategy, anchor_strategy, check_anchor, classify_anchor,
};
pub use document::Document;
pub use error::{LinkCheckError, SourceLocation};
pub use headings::{headings_in_tree, scan_file_for_headings};
pub use href::convert_href_to_url;
pub use links::{links_in_tree, scan_file_for_links};
pub use model::{Heading, Link, Point, Position};
pub use options::{ScanOptions, VerifyOptions};
pub use parse::{MarkdownDialect, ParseOptions, parse_mdast, parse_mdast_with_options};
pub use slug::{SlugAlgorithm, Slugger};
pub use verify::{FileErrorCode, LinkVerifier, VerifyLinkError, verify_links};
