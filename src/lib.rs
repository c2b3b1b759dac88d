//! Range-scoped DOM iteration.
//!
//! Re-exports the workspace crates: [`dom`] for the document, its patch
//! protocol and ranges, [`walker`] for the generic tag-order walker, and
//! [`range_iter`] for the iterator over the nodes inside a range.

pub use dom;
pub use range_iter;
pub use walker;

pub use range_iter::{BoundaryResolver, RangeIterError, RangeIterator};
