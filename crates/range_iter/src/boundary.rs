use dom::{AbstractRange, Document, NodeKey};

/// Containment test for the nodes between a range's two boundary
/// containers, inclusive.
///
/// Offsets play no part: a boundary container is in range whatever offset
/// the range points at inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryResolver {
    start_container: NodeKey,
    end_container: NodeKey,
}

impl BoundaryResolver {
    pub fn new(start_container: NodeKey, end_container: NodeKey) -> Self {
        Self {
            start_container,
            end_container,
        }
    }

    pub fn from_range<R: AbstractRange + ?Sized>(range: &R) -> Self {
        Self::new(range.start_container(), range.end_container())
    }

    pub fn start_container(&self) -> NodeKey {
        self.start_container
    }

    pub fn end_container(&self) -> NodeKey {
        self.end_container
    }

    /// `true` when `node` is a boundary container, or lies after (or
    /// contains) the start container and before (or contains) the end
    /// container. Nodes outside the boundaries' tree are never in range.
    pub fn within_range(&self, doc: &Document, node: NodeKey) -> bool {
        if node == self.start_container || node == self.end_container {
            return true;
        }
        let after_start = doc.precedes(self.start_container, node)
            || doc.is_ancestor_of(node, self.start_container);
        let before_end =
            doc.follows(self.end_container, node) || doc.is_ancestor_of(node, self.end_container);
        after_start && before_end
    }
}
