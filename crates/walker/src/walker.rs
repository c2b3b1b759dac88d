use crate::config::{WalkerConfig, WhatToShow};
use crate::error::WalkError;
use crate::predicate::Predicate;
use dom::{Document, NodeKey, NodeKind, NodeRef, NodeType};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Cursor position: a node plus the side of its tag the cursor sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cursor {
    node: NodeKey,
    closing: bool,
}

/// Depth-first walker over a [`Document`] with opening/closing tag sides.
///
/// A freshly built walker sits on the opening side of its start node. Each
/// movement steps through the tree one tag at a time and returns the first
/// node that passes the acceptance chain: the gate, the `what_to_show`
/// mask, any select predicate (all nodes when none are registered) and no
/// reject predicate.
pub struct Walker<'a> {
    doc: &'a Document,
    start: NodeKey,
    root: Option<NodeKey>,
    cursor: Cursor,
    revisit: bool,
    what_to_show: WhatToShow,
    selects: Vec<Predicate>,
    rejects: Vec<Predicate>,
    gate: Option<Predicate>,
}

impl<'a> Walker<'a> {
    pub fn new(
        doc: &'a Document,
        start: NodeKey,
        root: Option<NodeKey>,
    ) -> Result<Self, WalkError> {
        Self::with_config(doc, start, root, WalkerConfig::default())
    }

    pub fn with_config(
        doc: &'a Document,
        start: NodeKey,
        root: Option<NodeKey>,
        config: WalkerConfig,
    ) -> Result<Self, WalkError> {
        if !doc.is_live(start) {
            return Err(WalkError::MissingNode(start));
        }
        if let Some(root) = root
            && !doc.is_ancestor_of(root, start)
        {
            return Err(WalkError::OutOfScope { start, root });
        }
        Ok(Self {
            doc,
            start,
            root,
            cursor: Cursor {
                node: start,
                closing: false,
            },
            revisit: config.revisit,
            what_to_show: config.what_to_show,
            selects: Vec::new(),
            rejects: Vec::new(),
            gate: None,
        })
    }

    /// Adds a select predicate. Select predicates are OR-combined.
    pub fn select(mut self, predicate: impl Into<Predicate>) -> Self {
        self.selects.push(predicate.into());
        self
    }

    /// Adds a reject predicate. A node matching any of them is skipped.
    pub fn reject(mut self, predicate: impl Into<Predicate>) -> Self {
        self.rejects.push(predicate.into());
        self
    }

    pub fn revisit(mut self, revisit: bool) -> Self {
        self.revisit = revisit;
        self
    }

    pub fn what_to_show(mut self, mask: WhatToShow) -> Self {
        self.what_to_show = mask;
        self
    }

    /// Installs a predicate every candidate must pass before the select and
    /// reject lists are consulted. Replaces any previous gate.
    pub fn with_gate(mut self, gate: Predicate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Applies a configuration function to the walker.
    pub fn using<F>(self, plugin: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        plugin(self)
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn start(&self) -> NodeKey {
        self.start
    }

    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    /// Node under the cursor. `None` only after a reset onto a dead key.
    pub fn current(&self) -> Option<NodeRef<'a>> {
        self.doc.node(self.cursor.node)
    }

    pub fn next(&mut self) -> Option<NodeRef<'a>> {
        self.advance(Direction::Forward, None, 1)
    }

    pub fn prev(&mut self) -> Option<NodeRef<'a>> {
        self.advance(Direction::Backward, None, 1)
    }

    /// Like [`Walker::next`], with one more predicate ANDed in for this call.
    pub fn next_matching(&mut self, expr: &Predicate) -> Option<NodeRef<'a>> {
        self.advance(Direction::Forward, Some(expr), 1)
    }

    pub fn prev_matching(&mut self, expr: &Predicate) -> Option<NodeRef<'a>> {
        self.advance(Direction::Backward, Some(expr), 1)
    }

    /// The `n`th accepted node ahead of the cursor (behind it when `n` is
    /// negative) without moving. `peek(0)` is the cursor node itself.
    pub fn peek(&self, n: isize) -> Option<NodeRef<'a>> {
        self.peek_inner(n, None)
    }

    pub fn peek_matching(&self, n: isize, expr: &Predicate) -> Option<NodeRef<'a>> {
        self.peek_inner(n, Some(expr))
    }

    /// Moves the cursor back to the start node, or to `node` when given, on
    /// its opening side.
    pub fn reset(&mut self, node: Option<NodeKey>) {
        self.cursor = Cursor {
            node: node.unwrap_or(self.start),
            closing: false,
        };
    }

    /// Puts an element or document cursor on its opening side.
    pub fn opening(&mut self) {
        if self.cursor_has_sides() {
            self.cursor.closing = false;
        }
    }

    /// Puts an element or document cursor on its closing side.
    pub fn closing(&mut self) {
        if self.cursor_has_sides() {
            self.cursor.closing = true;
        }
    }

    pub fn at_opening(&self) -> bool {
        self.cursor_has_sides() && !self.cursor.closing
    }

    pub fn at_closing(&self) -> bool {
        self.cursor_has_sides() && self.cursor.closing
    }

    pub fn is_selected(&self, node: NodeRef<'_>) -> bool {
        self.selects.is_empty() || self.selects.iter().any(|p| p.matches(node))
    }

    pub fn is_rejected(&self, node: NodeRef<'_>) -> bool {
        self.rejects.iter().any(|p| p.matches(node))
    }

    /// Full acceptance chain for a candidate node.
    pub fn accepts(&self, node: NodeRef<'_>) -> bool {
        if let Some(gate) = &self.gate
            && !gate.matches(node)
        {
            return false;
        }
        let shown = node.node_type().is_some_and(|t| self.what_to_show.shows(t));
        shown && self.is_selected(node) && !self.is_rejected(node)
    }

    /// Text and comment nodes are a single point; only nodes that can hold
    /// children have an opening and a closing side.
    fn cursor_has_sides(&self) -> bool {
        self.doc
            .kind(self.cursor.node)
            .is_some_and(NodeKind::allows_children)
    }

    fn peek_inner(&self, n: isize, expr: Option<&Predicate>) -> Option<NodeRef<'a>> {
        let direction = match n {
            0 => return self.doc.node(self.cursor.node),
            n if n > 0 => Direction::Forward,
            _ => Direction::Backward,
        };
        let cursor = self.walk(direction, expr, n.unsigned_abs())?;
        self.doc.node(cursor.node)
    }

    fn advance(
        &mut self,
        direction: Direction,
        expr: Option<&Predicate>,
        n: usize,
    ) -> Option<NodeRef<'a>> {
        let cursor = self.walk(direction, expr, n)?;
        self.cursor = cursor;
        log::trace!(
            target: "walker",
            "{direction:?} -> {} ({})",
            cursor.node,
            if cursor.closing { "closing" } else { "opening" }
        );
        self.doc.node(cursor.node)
    }

    /// Finds the `n`th accepted cursor position in `direction`. Pure: the
    /// walker's own cursor is left alone.
    fn walk(&self, direction: Direction, expr: Option<&Predicate>, n: usize) -> Option<Cursor> {
        let mut remaining = n.max(1);
        let mut cursor = self.cursor;
        loop {
            let (next, offered) = self.step(cursor, direction)?;
            cursor = next;
            if !offered {
                continue;
            }
            if self.is_out_of_scope(cursor.node) {
                return None;
            }
            let node = self.doc.node(cursor.node)?;
            if expr.is_none_or(|e| e.matches(node)) && self.accepts(node) {
                remaining -= 1;
                if remaining == 0 {
                    return Some(cursor);
                }
            }
        }
    }

    /// One tag step. Forward enters nodes on their opening side and leaves
    /// through the closing side; backward does the reverse. The flag says
    /// whether the new position is a candidate: turns in place and moves up
    /// are only candidates with `revisit` on.
    fn step(&self, cursor: Cursor, direction: Direction) -> Option<(Cursor, bool)> {
        let forward = direction == Direction::Forward;
        let doc = self.doc;
        let child = if forward {
            doc.first_child(cursor.node)
        } else {
            doc.last_child(cursor.node)
        };

        if cursor.closing != forward
            && let Some(child) = child
        {
            return Some((
                Cursor {
                    node: child,
                    closing: !forward,
                },
                true,
            ));
        }

        let is_element = doc.node_type(cursor.node) == Some(NodeType::Element);
        if is_element && child.is_none() && cursor.closing != forward {
            return Some((
                Cursor {
                    node: cursor.node,
                    closing: forward,
                },
                self.revisit,
            ));
        }

        let sibling = if forward {
            doc.next_sibling(cursor.node)
        } else {
            doc.previous_sibling(cursor.node)
        };
        if let Some(sibling) = sibling {
            return Some((
                Cursor {
                    node: sibling,
                    closing: !forward,
                },
                true,
            ));
        }

        let parent = doc.parent(cursor.node)?;
        Some((
            Cursor {
                node: parent,
                closing: forward,
            },
            self.revisit,
        ))
    }

    /// `true` when the walker has a root and `node` is not strictly inside it.
    fn is_out_of_scope(&self, node: NodeKey) -> bool {
        match self.root {
            Some(root) => !self.doc.is_ancestor_of(root, node),
            None => false,
        }
    }
}

impl<'a> Iterator for Walker<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        Walker::next(self)
    }
}
