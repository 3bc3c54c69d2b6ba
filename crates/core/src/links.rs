//! Markdown link scanner.

use crate::document::Document;
use crate::href::convert_href_to_url;
use crate::model::Link;
use crate::parse::parse_mdast;
use crate::select::{SyntaxNode, select_nodes};
use crate::{LinkCheckError, ScanOptions};
use markdown::mdast::Node;

const LINK_KINDS: &[&str] = &["definition", "link"];

/// Lazily yields every inline link and link reference definition in `root`,
/// in document order.
pub fn links_in_tree(root: &Node) -> impl Iterator<Item = Link> + '_ {
    select_nodes(root, LINK_KINDS).filter_map(|node| {
        let href = match node {
            Node::Link(link) => &link.url,
            Node::Definition(definition) => &definition.url,
            _ => return None,
        };
        Some(Link {
            href: href.clone(),
            url: convert_href_to_url(href),
            position: node.source_position(),
        })
    })
}

/// Parses `document` and returns its links in document order.
pub fn scan_file_for_links(
    document: &Document,
    options: &ScanOptions,
) -> Result<Vec<Link>, LinkCheckError> {
    let root = parse_mdast(document.content(), options.dialect)
        .map_err(|err| err.in_file(document.path().display().to_string()))?;
    Ok(links_in_tree(&root).collect())
}
