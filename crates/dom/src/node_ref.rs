use crate::document::Document;
use crate::position::DocumentPosition;
use crate::types::{NodeKey, NodeKind, NodeType};
use std::fmt;

/// Borrowed handle to a live node: the document plus the node's key.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    key: NodeKey,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(doc: &'a Document, key: NodeKey) -> Self {
        Self { doc, key }
    }

    pub fn key(self) -> NodeKey {
        self.key
    }

    pub fn document(self) -> &'a Document {
        self.doc
    }

    pub fn kind(self) -> Option<&'a NodeKind> {
        self.doc.kind(self.key)
    }

    pub fn node_type(self) -> Option<NodeType> {
        self.doc.node_type(self.key)
    }

    pub fn node_name(self) -> Option<&'a str> {
        self.doc.node_name(self.key)
    }

    pub fn is_text(self) -> bool {
        self.node_type() == Some(NodeType::Text)
    }

    pub fn is_element(self) -> bool {
        self.node_type() == Some(NodeType::Element)
    }

    pub fn is_element_named(self, name: &str) -> bool {
        self.is_element() && self.node_name().is_some_and(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn text(self) -> Option<&'a str> {
        self.doc.text(self.key)
    }

    pub fn attr(self, name: &str) -> Option<&'a str> {
        self.doc.attr(self.key, name)
    }

    pub fn parent(self) -> Option<NodeRef<'a>> {
        self.doc.parent(self.key).map(|key| NodeRef::new(self.doc, key))
    }

    pub fn first_child(self) -> Option<NodeRef<'a>> {
        self.doc.first_child(self.key).map(|key| NodeRef::new(self.doc, key))
    }

    pub fn last_child(self) -> Option<NodeRef<'a>> {
        self.doc.last_child(self.key).map(|key| NodeRef::new(self.doc, key))
    }

    pub fn next_sibling(self) -> Option<NodeRef<'a>> {
        self.doc.next_sibling(self.key).map(|key| NodeRef::new(self.doc, key))
    }

    pub fn previous_sibling(self) -> Option<NodeRef<'a>> {
        self.doc
            .previous_sibling(self.key)
            .map(|key| NodeRef::new(self.doc, key))
    }

    pub fn has_children(self) -> bool {
        !self.doc.children(self.key).is_empty()
    }

    pub fn compare_document_position(self, other: NodeKey) -> DocumentPosition {
        self.doc.compare_document_position(self.key, other)
    }

    pub fn contains(self, other: NodeKey) -> bool {
        self.doc.contains(self.key, other)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && std::ptr::eq(self.doc, other.doc)
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(NodeKind::Element { name, .. }) => write!(f, "<{name}> {}", self.key),
            Some(NodeKind::Text { text }) => write!(f, "#text {:?} {}", text, self.key),
            Some(NodeKind::Comment { text }) => write!(f, "#comment {:?} {}", text, self.key),
            Some(NodeKind::Document { .. }) => write!(f, "#document {}", self.key),
            None => write!(f, "<dead> {}", self.key),
        }
    }
}
