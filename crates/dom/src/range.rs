//! Boundary points, live-style ranges and static ranges.
//!
//! Ranges hold keys, not borrows, so they outlive any single borrow of the
//! document. They are not updated by later mutations; a range over removed
//! nodes simply refers to dead keys.

use crate::document::Document;
use crate::error::DomError;
use crate::types::{NodeKey, NodeKind, NodeType};
use std::cmp::Ordering;

/// A node plus an offset into its children (or chars, for character data).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundaryPoint {
    pub node: NodeKey,
    pub offset: usize,
}

impl BoundaryPoint {
    pub fn new(node: NodeKey, offset: usize) -> Self {
        Self { node, offset }
    }

    /// Offset lies between 0 and the node's length, inclusive.
    pub fn is_correct(&self, doc: &Document) -> bool {
        doc.is_live(self.node) && self.offset <= doc.length(self.node)
    }

    /// Position of `self` relative to `other`; `None` when the two points are
    /// not in the same tree.
    pub fn position(&self, doc: &Document, other: &BoundaryPoint) -> Option<Ordering> {
        if self.node == other.node {
            return Some(self.offset.cmp(&other.offset));
        }
        if doc.root_of(self.node)? != doc.root_of(other.node)? {
            return None;
        }
        if doc.follows(self.node, other.node) {
            return other.position(doc, self).map(Ordering::reverse);
        }
        if doc.is_ancestor_of(self.node, other.node) {
            let child = doc
                .inclusive_ancestors(other.node)
                .find(|&k| doc.parent(k) == Some(self.node))?;
            if doc.index(child) < self.offset {
                return Some(Ordering::Greater);
            }
        }
        Some(Ordering::Less)
    }
}

/// Read access shared by [`Range`] and [`StaticRange`].
pub trait AbstractRange {
    fn start(&self) -> BoundaryPoint;

    fn end(&self) -> BoundaryPoint;

    fn start_container(&self) -> NodeKey {
        self.start().node
    }

    fn start_offset(&self) -> usize {
        self.start().offset
    }

    fn end_container(&self) -> NodeKey {
        self.end().node
    }

    fn end_offset(&self) -> usize {
        self.end().offset
    }

    fn collapsed(&self) -> bool {
        self.start() == self.end()
    }

    /// Nearest node containing both boundary containers.
    fn common_ancestor_container(&self, doc: &Document) -> Option<NodeKey> {
        doc.common_ancestor(self.start_container(), self.end_container())
    }
}

/// A range with DOM setter semantics: start never moves past end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    start: BoundaryPoint,
    end: BoundaryPoint,
}

impl AbstractRange for Range {
    fn start(&self) -> BoundaryPoint {
        self.start
    }

    fn end(&self) -> BoundaryPoint {
        self.end
    }
}

impl Range {
    /// A collapsed range at offset 0 of the document root.
    pub fn new(doc: &Document) -> Result<Self, DomError> {
        let root = doc.root().ok_or(DomError::MissingRoot)?;
        let point = BoundaryPoint::new(root, 0);
        Ok(Self {
            start: point,
            end: point,
        })
    }

    pub fn set_start(
        &mut self,
        doc: &Document,
        node: NodeKey,
        offset: usize,
    ) -> Result<(), DomError> {
        let point = checked_point(doc, node, offset)?;
        if !matches!(point.position(doc, &self.end), Some(Ordering::Less | Ordering::Equal)) {
            self.end = point;
        }
        self.start = point;
        Ok(())
    }

    pub fn set_end(
        &mut self,
        doc: &Document,
        node: NodeKey,
        offset: usize,
    ) -> Result<(), DomError> {
        let point = checked_point(doc, node, offset)?;
        if !matches!(point.position(doc, &self.start), Some(Ordering::Greater | Ordering::Equal)) {
            self.start = point;
        }
        self.end = point;
        Ok(())
    }

    pub fn set_start_before(&mut self, doc: &Document, node: NodeKey) -> Result<(), DomError> {
        let parent = parent_of(doc, node)?;
        self.set_start(doc, parent, doc.index(node))
    }

    pub fn set_start_after(&mut self, doc: &Document, node: NodeKey) -> Result<(), DomError> {
        let parent = parent_of(doc, node)?;
        self.set_start(doc, parent, doc.index(node) + 1)
    }

    pub fn set_end_before(&mut self, doc: &Document, node: NodeKey) -> Result<(), DomError> {
        let parent = parent_of(doc, node)?;
        self.set_end(doc, parent, doc.index(node))
    }

    pub fn set_end_after(&mut self, doc: &Document, node: NodeKey) -> Result<(), DomError> {
        let parent = parent_of(doc, node)?;
        self.set_end(doc, parent, doc.index(node) + 1)
    }

    pub fn collapse(&mut self, to_start: bool) {
        if to_start {
            self.end = self.start;
        } else {
            self.start = self.end;
        }
    }

    pub fn select_node(&mut self, doc: &Document, node: NodeKey) -> Result<(), DomError> {
        let parent = parent_of(doc, node)?;
        let index = doc.index(node);
        self.start = BoundaryPoint::new(parent, index);
        self.end = BoundaryPoint::new(parent, index + 1);
        Ok(())
    }

    pub fn select_node_contents(&mut self, doc: &Document, node: NodeKey) -> Result<(), DomError> {
        if !doc.is_live(node) {
            return Err(DomError::MissingKey(node));
        }
        self.start = BoundaryPoint::new(node, 0);
        self.end = BoundaryPoint::new(node, doc.length(node));
        Ok(())
    }

    /// `true` when `node` lies entirely between start and end.
    pub fn contains_node(&self, doc: &Document, node: NodeKey) -> bool {
        let first = BoundaryPoint::new(node, 0);
        let last = BoundaryPoint::new(node, doc.length(node));
        first.position(doc, &self.start) == Some(Ordering::Greater)
            && last.position(doc, &self.end) == Some(Ordering::Less)
    }

    /// DOM range stringifier: the selected text, clipped at text boundaries.
    pub fn stringify(&self, doc: &Document) -> String {
        let mut out = String::new();
        let start_text = text_data(doc, self.start.node);
        let end_text = text_data(doc, self.end.node);

        if self.start.node == self.end.node
            && let Some(text) = start_text
        {
            push_chars(&mut out, text, self.start.offset, self.end.offset);
            return out;
        }

        if let Some(text) = start_text {
            push_chars(&mut out, text, self.start.offset, usize::MAX);
        }
        if let Some(ancestor) = self.common_ancestor_container(doc) {
            for key in doc.descendants(ancestor) {
                if doc.node_type(key) == Some(NodeType::Text) && self.contains_node(doc, key) {
                    if let Some(text) = doc.text(key) {
                        out.push_str(text);
                    }
                }
            }
        }
        if let Some(text) = end_text {
            push_chars(&mut out, text, 0, self.end.offset);
        }
        out
    }
}

/// Unchecked boundary values; see [`StaticRange::is_valid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticRange {
    start: BoundaryPoint,
    end: BoundaryPoint,
}

impl AbstractRange for StaticRange {
    fn start(&self) -> BoundaryPoint {
        self.start
    }

    fn end(&self) -> BoundaryPoint {
        self.end
    }
}

impl StaticRange {
    pub fn new(
        start_container: NodeKey,
        start_offset: usize,
        end_container: NodeKey,
        end_offset: usize,
    ) -> Self {
        Self {
            start: BoundaryPoint::new(start_container, start_offset),
            end: BoundaryPoint::new(end_container, end_offset),
        }
    }

    /// Same tree, offsets within bounds, and start at or before end.
    pub fn is_valid(&self, doc: &Document) -> bool {
        self.start.is_correct(doc)
            && self.end.is_correct(doc)
            && matches!(
                self.start.position(doc, &self.end),
                Some(Ordering::Less | Ordering::Equal)
            )
    }
}

fn checked_point(doc: &Document, node: NodeKey, offset: usize) -> Result<BoundaryPoint, DomError> {
    if !doc.is_live(node) {
        return Err(DomError::MissingKey(node));
    }
    let length = doc.length(node);
    if offset > length {
        return Err(DomError::IndexSize {
            node,
            offset,
            length,
        });
    }
    Ok(BoundaryPoint::new(node, offset))
}

fn parent_of(doc: &Document, node: NodeKey) -> Result<NodeKey, DomError> {
    if !doc.is_live(node) {
        return Err(DomError::MissingKey(node));
    }
    doc.parent(node).ok_or(DomError::InvalidNodeType(node))
}

fn text_data(doc: &Document, key: NodeKey) -> Option<&str> {
    match doc.kind(key)? {
        NodeKind::Text { text } => Some(text),
        _ => None,
    }
}

fn push_chars(out: &mut String, text: &str, from: usize, to: usize) {
    out.extend(text.chars().skip(from).take(to.saturating_sub(from)));
}

#[cfg(test)]
mod tests {
    use super::*;

    // <root><p>[hello ]<b>[world]</b>[.]</p><p>[foo]</p></root>
    struct Sample {
        doc: Document,
        p1: NodeKey,
        hello: NodeKey,
        world: NodeKey,
        p2: NodeKey,
        foo: NodeKey,
    }

    fn sample() -> Sample {
        let mut doc = Document::with_root();
        let root = doc.root().expect("root");
        let p1 = doc.create_element("p").expect("p");
        let hello = doc.create_text("hello ").expect("text");
        let b = doc.create_element("b").expect("b");
        let world = doc.create_text("world").expect("text");
        let dot = doc.create_text(".").expect("text");
        let p2 = doc.create_element("p").expect("p");
        let foo = doc.create_text("foo").expect("text");
        for (parent, child) in [
            (root, p1),
            (p1, hello),
            (p1, b),
            (b, world),
            (p1, dot),
            (root, p2),
            (p2, foo),
        ] {
            doc.append_child(parent, child).expect("append");
        }
        Sample {
            doc,
            p1,
            hello,
            world,
            p2,
            foo,
        }
    }

    #[test]
    fn new_range_is_collapsed_at_root() {
        let s = sample();
        let range = Range::new(&s.doc).expect("range");
        assert!(range.collapsed());
        assert_eq!(range.start_container(), s.doc.root().expect("root"));
        assert_eq!(Range::new(&Document::new()), Err(DomError::MissingRoot));
    }

    #[test]
    fn stringify_across_paragraphs() {
        let s = sample();
        let mut range = Range::new(&s.doc).expect("range");
        range.set_start(&s.doc, s.hello, 2).expect("start");
        range.set_end(&s.doc, s.foo, 2).expect("end");
        assert_eq!(range.stringify(&s.doc), "llo world.fo");
        assert_eq!(range.common_ancestor_container(&s.doc), s.doc.root());
    }

    #[test]
    fn stringify_up_to_start_of_following_paragraph() {
        let s = sample();
        let mut range = Range::new(&s.doc).expect("range");
        range.set_start(&s.doc, s.hello, 0).expect("start");
        range.set_end(&s.doc, s.p2, 0).expect("end");
        assert!(!range.collapsed());
        assert_eq!(range.stringify(&s.doc), "hello world.");
    }

    #[test]
    fn stringify_within_single_text_node() {
        let s = sample();
        let mut range = Range::new(&s.doc).expect("range");
        range.set_start(&s.doc, s.world, 1).expect("start");
        range.set_end(&s.doc, s.world, 4).expect("end");
        assert_eq!(range.stringify(&s.doc), "orl");
        assert_eq!(range.common_ancestor_container(&s.doc), Some(s.world));
    }

    #[test]
    fn offset_past_length_is_index_size_error() {
        let s = sample();
        let mut range = Range::new(&s.doc).expect("range");
        let err = range.set_start(&s.doc, s.foo, 4).unwrap_err();
        assert_eq!(
            err,
            DomError::IndexSize {
                node: s.foo,
                offset: 4,
                length: 3
            }
        );
    }

    #[test]
    fn start_after_end_collapses_end() {
        let s = sample();
        let mut range = Range::new(&s.doc).expect("range");
        range.set_start(&s.doc, s.hello, 0).expect("start");
        range.set_end(&s.doc, s.world, 2).expect("end");
        range.set_start(&s.doc, s.foo, 1).expect("start");
        assert!(range.collapsed());
        assert_eq!(range.end(), BoundaryPoint::new(s.foo, 1));

        range.set_end(&s.doc, s.hello, 1).expect("end");
        assert!(range.collapsed());
        assert_eq!(range.start(), BoundaryPoint::new(s.hello, 1));
    }

    #[test]
    fn select_node_and_contents() {
        let s = sample();
        let mut range = Range::new(&s.doc).expect("range");
        range.select_node(&s.doc, s.p2).expect("select");
        assert_eq!(range.start(), BoundaryPoint::new(s.doc.root().expect("root"), 1));
        assert_eq!(range.end_offset(), 2);
        assert_eq!(range.stringify(&s.doc), "foo");

        range.select_node_contents(&s.doc, s.p1).expect("select contents");
        assert_eq!(range.end(), BoundaryPoint::new(s.p1, 3));
        assert_eq!(range.stringify(&s.doc), "hello world.");

        let root = s.doc.root().expect("root");
        assert_eq!(
            range.select_node(&s.doc, root),
            Err(DomError::InvalidNodeType(root))
        );
    }

    #[test]
    fn before_and_after_setters() {
        let s = sample();
        let mut range = Range::new(&s.doc).expect("range");
        range.set_start_after(&s.doc, s.hello).expect("start");
        range.set_end_before(&s.doc, s.p2).expect("end");
        assert_eq!(range.start(), BoundaryPoint::new(s.p1, 1));
        assert_eq!(range.stringify(&s.doc), "world.");
        range.set_start_before(&s.doc, s.p1).expect("start");
        range.set_end_after(&s.doc, s.p2).expect("end");
        assert_eq!(range.stringify(&s.doc), "hello world.foo");
        range.collapse(true);
        assert!(range.collapsed());
    }

    #[test]
    fn boundary_point_positions() {
        let s = sample();
        let doc = &s.doc;
        let in_text = BoundaryPoint::new(s.hello, 3);
        let p1_start = BoundaryPoint::new(s.p1, 0);
        let p1_after_hello = BoundaryPoint::new(s.p1, 1);
        assert_eq!(p1_start.position(doc, &in_text), Some(Ordering::Less));
        assert_eq!(p1_after_hello.position(doc, &in_text), Some(Ordering::Greater));
        assert_eq!(in_text.position(doc, &p1_after_hello), Some(Ordering::Less));
        assert_eq!(
            BoundaryPoint::new(s.foo, 0).position(doc, &BoundaryPoint::new(s.world, 5)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn static_range_validity() {
        let mut s = sample();
        assert!(StaticRange::new(s.hello, 0, s.foo, 3).is_valid(&s.doc));
        assert!(!StaticRange::new(s.foo, 0, s.hello, 3).is_valid(&s.doc));
        assert!(!StaticRange::new(s.hello, 9, s.foo, 3).is_valid(&s.doc));
        let loose = s.doc.create_text("loose").expect("text");
        assert!(!StaticRange::new(s.hello, 0, loose, 1).is_valid(&s.doc));
    }
}
