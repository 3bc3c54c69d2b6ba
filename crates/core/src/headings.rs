//! Markdown heading scanner.

use crate::document::Document;
use crate::model::Heading;
use crate::parse::parse_mdast;
use crate::select::{SyntaxNode, collect_text, select_nodes};
use crate::slug::Slugger;
use crate::{LinkCheckError, ScanOptions};
use markdown::mdast::Node;

const HEADING_KINDS: &[&str] = &["heading"];

/// Lazily yields the headings of `root` in document order, slugging each one
/// with `slugger`.
pub fn headings_in_tree(root: &Node, mut slugger: Slugger) -> impl Iterator<Item = Heading> + '_ {
    select_nodes(root, HEADING_KINDS).filter_map(move |node| {
        let Node::Heading(heading) = node else {
            return None;
        };
        let text = collect_text(node);
        let anchor = slugger.next_slug(&text);
        Some(Heading {
            depth: heading.depth,
            text,
            anchor,
            position: node.source_position(),
        })
    })
}

/// Parses `document` and returns its headings with unique anchors.
pub fn scan_file_for_headings(
    document: &Document,
    options: &ScanOptions,
) -> Result<Vec<Heading>, LinkCheckError> {
    let root = parse_mdast(document.content(), options.dialect)
        .map_err(|err| err.in_file(document.path().display().to_string()))?;
    Ok(headings_in_tree(&root, Slugger::for_dialect(options.dialect)).collect())
}
