//! Tree-order comparison between nodes.

use crate::document::Document;
use crate::types::NodeKey;
use bitflags::bitflags;

bitflags! {
    /// Result of [`Document::compare_document_position`], using the bit values
    /// of the DOM `Node.DOCUMENT_POSITION_*` constants.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DocumentPosition: u16 {
        const DISCONNECTED = 0x01;
        const PRECEDING = 0x02;
        const FOLLOWING = 0x04;
        const CONTAINS = 0x08;
        const CONTAINED_BY = 0x10;
        const IMPLEMENTATION_SPECIFIC = 0x20;
    }
}

impl Document {
    /// Position of `other` relative to `reference`.
    ///
    /// `PRECEDING` means `other` comes before `reference` in tree order,
    /// `CONTAINS` means `other` is an ancestor of `reference` (always paired
    /// with `PRECEDING`), `CONTAINED_BY` means `other` is a descendant (always
    /// paired with `FOLLOWING`). Identical nodes compare as the empty set.
    /// Nodes in different trees, or dead keys, are `DISCONNECTED` with an
    /// arbitrary but stable order derived from their keys.
    pub fn compare_document_position(
        &self,
        reference: NodeKey,
        other: NodeKey,
    ) -> DocumentPosition {
        if reference == other {
            return DocumentPosition::empty();
        }

        let reference_path = self.path_from_root(reference);
        let other_path = self.path_from_root(other);
        let connected = match (reference_path.first(), other_path.first()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
        if !connected {
            let order = if other < reference {
                DocumentPosition::PRECEDING
            } else {
                DocumentPosition::FOLLOWING
            };
            return DocumentPosition::DISCONNECTED
                | DocumentPosition::IMPLEMENTATION_SPECIFIC
                | order;
        }

        let shared = reference_path
            .iter()
            .zip(other_path.iter())
            .take_while(|(a, b)| a == b)
            .count();

        if shared == other_path.len() {
            return DocumentPosition::CONTAINS | DocumentPosition::PRECEDING;
        }
        if shared == reference_path.len() {
            return DocumentPosition::CONTAINED_BY | DocumentPosition::FOLLOWING;
        }

        // Both paths diverge below a common parent: order by child index.
        let parent = reference_path[shared - 1];
        let siblings = self.children(parent);
        let reference_branch = siblings.iter().position(|k| *k == reference_path[shared]);
        let other_branch = siblings.iter().position(|k| *k == other_path[shared]);
        if other_branch < reference_branch {
            DocumentPosition::PRECEDING
        } else {
            DocumentPosition::FOLLOWING
        }
    }

    /// Inclusive containment: `true` when `node` is `ancestor` or one of its
    /// descendants.
    pub fn contains(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        self.is_live(ancestor) && self.inclusive_ancestors(node).any(|k| k == ancestor)
    }

    /// Strict ancestry.
    pub fn is_ancestor_of(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        ancestor != node && self.contains(ancestor, node)
    }

    /// `true` when `a` comes before `b` in tree order within the same tree.
    pub fn precedes(&self, a: NodeKey, b: NodeKey) -> bool {
        let position = self.compare_document_position(b, a);
        position.contains(DocumentPosition::PRECEDING)
            && !position.contains(DocumentPosition::DISCONNECTED)
    }

    /// `true` when `a` comes after `b` in tree order within the same tree.
    pub fn follows(&self, a: NodeKey, b: NodeKey) -> bool {
        let position = self.compare_document_position(b, a);
        position.contains(DocumentPosition::FOLLOWING)
            && !position.contains(DocumentPosition::DISCONNECTED)
    }

    /// Nearest inclusive ancestor shared by `a` and `b`.
    pub fn common_ancestor(&self, a: NodeKey, b: NodeKey) -> Option<NodeKey> {
        self.inclusive_ancestors(a).find(|&ancestor| self.contains(ancestor, b))
    }

    /// Inclusive ancestors of `key`, root first. Empty for dead keys.
    fn path_from_root(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut path: Vec<NodeKey> = self.inclusive_ancestors(key).collect();
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // <root><p>[a]<b>[c]</b></p><q/></root>
    fn sample() -> (Document, [NodeKey; 6]) {
        let mut doc = Document::with_root();
        let root = doc.root().expect("root");
        let p = doc.create_element("p").expect("p");
        let a = doc.create_text("a").expect("a");
        let b = doc.create_element("b").expect("b");
        let c = doc.create_text("c").expect("c");
        let q = doc.create_element("q").expect("q");
        doc.append_child(root, p).expect("append");
        doc.append_child(p, a).expect("append");
        doc.append_child(p, b).expect("append");
        doc.append_child(b, c).expect("append");
        doc.append_child(root, q).expect("append");
        (doc, [root, p, a, b, c, q])
    }

    #[test]
    fn identical_nodes_compare_empty() {
        let (doc, [_, p, ..]) = sample();
        assert!(doc.compare_document_position(p, p).is_empty());
    }

    #[test]
    fn ancestor_is_contains_and_preceding() {
        let (doc, [_, p, _, _, c, _]) = sample();
        assert_eq!(
            doc.compare_document_position(c, p),
            DocumentPosition::CONTAINS | DocumentPosition::PRECEDING
        );
        assert_eq!(
            doc.compare_document_position(p, c),
            DocumentPosition::CONTAINED_BY | DocumentPosition::FOLLOWING
        );
    }

    #[test]
    fn siblings_and_cousins_order_by_index() {
        let (doc, [_, p, a, b, c, q]) = sample();
        assert_eq!(doc.compare_document_position(a, b), DocumentPosition::FOLLOWING);
        assert_eq!(doc.compare_document_position(b, a), DocumentPosition::PRECEDING);
        assert_eq!(doc.compare_document_position(c, q), DocumentPosition::FOLLOWING);
        assert_eq!(doc.compare_document_position(q, c), DocumentPosition::PRECEDING);
        assert!(doc.precedes(p, q));
        assert!(doc.follows(q, a));
        assert!(!doc.precedes(q, a));
    }

    #[test]
    fn detached_nodes_are_disconnected() {
        let (mut doc, [_, p, ..]) = sample();
        let loose = doc.create_text("loose").expect("loose");
        let position = doc.compare_document_position(p, loose);
        assert!(position.contains(DocumentPosition::DISCONNECTED));
        assert!(position.contains(DocumentPosition::IMPLEMENTATION_SPECIFIC));
        assert!(!doc.precedes(loose, p));
        assert!(!doc.follows(loose, p));
    }

    #[test]
    fn containment_helpers() {
        let (doc, [root, p, a, b, c, q]) = sample();
        assert!(doc.contains(p, p));
        assert!(doc.contains(p, c));
        assert!(!doc.contains(b, a));
        assert!(doc.is_ancestor_of(root, c));
        assert!(!doc.is_ancestor_of(c, c));
        assert_eq!(doc.common_ancestor(c, a), Some(p));
        assert_eq!(doc.common_ancestor(c, q), Some(root));
        assert_eq!(doc.common_ancestor(b, c), Some(b));
    }
}
