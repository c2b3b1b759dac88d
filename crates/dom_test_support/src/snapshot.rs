use crate::escape_text;
use dom::{Document, NodeKey, NodeKind, NodeRef};

/// One-line label for a node: `<b>`, `"text"`, `<!-- note -->` or
/// `#document`.
pub fn node_label(node: NodeRef<'_>) -> String {
    match node.kind() {
        Some(NodeKind::Element { name, .. }) => format!("<{name}>"),
        Some(NodeKind::Text { text }) => format!("\"{}\"", escape_text(text)),
        Some(NodeKind::Comment { text }) => format!("<!--{}-->", escape_text(text)),
        Some(NodeKind::Document { .. }) => "#document".to_string(),
        None => format!("<dead {}>", node.key()),
    }
}

pub fn labels<'a>(nodes: impl IntoIterator<Item = NodeRef<'a>>) -> Vec<String> {
    nodes.into_iter().map(node_label).collect()
}

/// Indented tree dump of the subtree under `key`, one node per line.
pub fn tree_lines(doc: &Document, key: NodeKey) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![(key, 0usize)];
    while let Some((current, depth)) = stack.pop() {
        let Some(node) = doc.node(current) else {
            continue;
        };
        out.push(format!("{}{}", "  ".repeat(depth), node_label(node)));
        for &child in doc.children(current).iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    out
}
