//! Generic depth-first node selection over syntax trees.

use crate::model::Position;
use markdown::mdast::Node;

/// The shape of a syntax tree node as seen by the selector.
pub trait SyntaxNode: Sized {
    /// Node type tag (for mdast, the unist `type`, e.g. `"link"`).
    fn kind(&self) -> &str;
    /// Child nodes, empty for leaves.
    fn child_nodes(&self) -> &[Self];
    /// Literal text carried by a leaf node.
    fn literal(&self) -> Option<&str>;
    /// Source position, when the parser recorded one.
    fn source_position(&self) -> Option<Position>;
}

/// Lazy pre-order iterator over the nodes of a tree whose kind is in a set.
pub struct SelectNodes<'a, 'k, N> {
    kinds: &'k [&'k str],
    stack: Vec<&'a N>,
}

impl<'a, N: SyntaxNode> Iterator for SelectNodes<'a, '_, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        while let Some(node) = self.stack.pop() {
            self.stack.extend(node.child_nodes().iter().rev());
            if self.kinds.contains(&node.kind()) {
                return Some(node);
            }
        }
        None
    }
}

/// Selects every node of one of `kinds`, depth first in document order.
///
/// Children of matching nodes are still visited.
pub fn select_nodes<'a, 'k, N: SyntaxNode>(
    root: &'a N,
    kinds: &'k [&'k str],
) -> SelectNodes<'a, 'k, N> {
    SelectNodes {
        kinds,
        stack: vec![root],
    }
}

/// Concatenates the literal text of every leaf below `node`.
pub fn collect_text<N: SyntaxNode>(node: &N) -> String {
    let mut text = String::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if let Some(value) = current.literal() {
            text.push_str(value);
        }
        stack.extend(current.child_nodes().iter().rev());
    }
    text
}

impl SyntaxNode for Node {
    fn kind(&self) -> &str {
        match self {
            Node::Root(_) => "root",
            Node::Blockquote(_) => "blockquote",
            Node::FootnoteDefinition(_) => "footnoteDefinition",
            Node::MdxJsxFlowElement(_) => "mdxJsxFlowElement",
            Node::List(_) => "list",
            Node::MdxjsEsm(_) => "mdxjsEsm",
            Node::Toml(_) => "toml",
            Node::Yaml(_) => "yaml",
            Node::Break(_) => "break",
            Node::InlineCode(_) => "inlineCode",
            Node::InlineMath(_) => "inlineMath",
            Node::Delete(_) => "delete",
            Node::Emphasis(_) => "emphasis",
            Node::MdxTextExpression(_) => "mdxTextExpression",
            Node::FootnoteReference(_) => "footnoteReference",
            Node::Html(_) => "html",
            Node::Image(_) => "image",
            Node::ImageReference(_) => "imageReference",
            Node::MdxJsxTextElement(_) => "mdxJsxTextElement",
            Node::Link(_) => "link",
            Node::LinkReference(_) => "linkReference",
            Node::Strong(_) => "strong",
            Node::Text(_) => "text",
            Node::Code(_) => "code",
            Node::Math(_) => "math",
            Node::MdxFlowExpression(_) => "mdxFlowExpression",
            Node::Heading(_) => "heading",
            Node::Table(_) => "table",
            Node::ThematicBreak(_) => "thematicBreak",
            Node::TableRow(_) => "tableRow",
            Node::TableCell(_) => "tableCell",
            Node::ListItem(_) => "listItem",
            Node::Definition(_) => "definition",
            Node::Paragraph(_) => "paragraph",
            #[allow(unreachable_patterns)]
            _ => "unknown",
        }
    }

    fn child_nodes(&self) -> &[Node] {
        self.children().map(Vec::as_slice).unwrap_or(&[])
    }

    fn literal(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(&text.value),
            Node::InlineCode(code) => Some(&code.value),
            Node::InlineMath(math) => Some(&math.value),
            Node::Html(html) => Some(&html.value),
            _ => None,
        }
    }

    fn source_position(&self) -> Option<Position> {
        self.position().map(Position::from)
    }
}
