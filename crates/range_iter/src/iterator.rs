use crate::boundary::BoundaryResolver;
use crate::error::RangeIterError;
use dom::{AbstractRange, Document, NodeKey, NodeRef};
use std::iter::FusedIterator;
use walker::{Predicate, WalkError, Walker, WalkerConfig};

/// Iterates the nodes of a document that fall inside a range.
///
/// The walk starts at the range's common ancestor (its parent when that
/// ancestor is a text or comment node) and every candidate must pass the
/// range's [`BoundaryResolver`] before the select and reject predicates are
/// consulted.
///
/// Forward iteration is fused: once [`RangeIterator::next`] returns `None`
/// it keeps returning `None` until [`RangeIterator::reset`].
pub struct RangeIterator<'a> {
    walker: Walker<'a>,
    resolver: BoundaryResolver,
    exhausted: bool,
}

impl<'a> RangeIterator<'a> {
    /// Builds an iterator over `range`. A missing range is an error.
    pub fn new<R>(doc: &'a Document, range: Option<&R>) -> Result<Self, RangeIterError>
    where
        R: AbstractRange + ?Sized,
    {
        Self::with_config(doc, range, WalkerConfig::default())
    }

    pub fn from_range<R>(doc: &'a Document, range: &R) -> Result<Self, RangeIterError>
    where
        R: AbstractRange + ?Sized,
    {
        Self::new(doc, Some(range))
    }

    pub fn with_config<R>(
        doc: &'a Document,
        range: Option<&R>,
        config: WalkerConfig,
    ) -> Result<Self, RangeIterError>
    where
        R: AbstractRange + ?Sized,
    {
        let range = range.ok_or(RangeIterError::MissingRange)?;
        let resolver = BoundaryResolver::from_range(range);
        for key in [resolver.start_container(), resolver.end_container()] {
            if !doc.is_live(key) {
                return Err(RangeIterError::StaleBoundary(key));
            }
        }
        let ancestor = range
            .common_ancestor_container(doc)
            .ok_or(RangeIterError::Disconnected)?;
        let start = traversal_start(doc, ancestor);

        log::debug!(
            target: "range_iter",
            "walking from {start} for range {}..{} (common ancestor {ancestor})",
            resolver.start_container(),
            resolver.end_container()
        );

        let walker = Walker::with_config(doc, start, None, config)
            .map_err(|err| match err {
                WalkError::MissingNode(key) => RangeIterError::StaleBoundary(key),
                WalkError::OutOfScope { start, .. } => RangeIterError::StaleBoundary(start),
            })?
            .with_gate(Predicate::new(move |node| {
                resolver.within_range(node.document(), node.key())
            }));

        Ok(Self {
            walker,
            resolver,
            exhausted: false,
        })
    }

    /// Adds a select predicate; predicates are OR-combined among themselves
    /// and ANDed behind the range test.
    pub fn select(mut self, predicate: impl Into<Predicate>) -> Self {
        self.walker = self.walker.select(predicate);
        self
    }

    pub fn reject(mut self, predicate: impl Into<Predicate>) -> Self {
        self.walker = self.walker.reject(predicate);
        self
    }

    pub fn revisit(mut self, revisit: bool) -> Self {
        self.walker = self.walker.revisit(revisit);
        self
    }

    pub fn next(&mut self) -> Option<NodeRef<'a>> {
        if self.exhausted {
            return None;
        }
        let node = self.walker.next();
        if node.is_none() {
            self.exhausted = true;
        }
        node
    }

    pub fn prev(&mut self) -> Option<NodeRef<'a>> {
        self.walker.prev()
    }

    /// Looks `n` accepted nodes ahead (behind when negative) without moving.
    pub fn peek(&self, n: isize) -> Option<NodeRef<'a>> {
        if n > 0 && self.exhausted {
            return None;
        }
        self.walker.peek(n)
    }

    /// Rewinds to the traversal start and clears forward exhaustion.
    pub fn reset(&mut self) {
        self.walker.reset(None);
        self.exhausted = false;
    }

    pub fn within_range(&self, node: NodeKey) -> bool {
        self.resolver.within_range(self.walker.document(), node)
    }

    pub fn resolver(&self) -> BoundaryResolver {
        self.resolver
    }

    /// Node the walk starts from.
    pub fn traversal_start(&self) -> NodeKey {
        self.walker.start()
    }
}

impl<'a> Iterator for RangeIterator<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        RangeIterator::next(self)
    }
}

impl FusedIterator for RangeIterator<'_> {}

fn traversal_start(doc: &Document, ancestor: NodeKey) -> NodeKey {
    let is_leaf = doc
        .node_type(ancestor)
        .is_some_and(|node_type| node_type.is_character_data());
    if is_leaf {
        doc.parent(ancestor).unwrap_or(ancestor)
    } else {
        ancestor
    }
}
