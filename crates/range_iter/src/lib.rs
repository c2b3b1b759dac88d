//! Iteration over the nodes of a [`dom::Document`] that fall inside a range.
//!
//! [`RangeIterator`] wraps a [`walker::Walker`] and installs the range's
//! [`BoundaryResolver`] as its gate, so caller predicates only ever see
//! nodes between the two boundary containers.
//!
//! ```
//! use dom::{Document, NodeType, StaticRange};
//! use range_iter::RangeIterator;
//!
//! let mut doc = Document::with_root();
//! let root = doc.root().unwrap();
//! let p = doc.create_element("p").unwrap();
//! let one = doc.create_text("one").unwrap();
//! let two = doc.create_text("two").unwrap();
//! doc.append_child(root, p).unwrap();
//! doc.append_child(p, one).unwrap();
//! doc.append_child(p, two).unwrap();
//!
//! let range = StaticRange::new(one, 0, two, 3);
//! let texts: Vec<_> = RangeIterator::from_range(&doc, &range)
//!     .unwrap()
//!     .select(NodeType::Text)
//!     .filter_map(|node| node.text())
//!     .collect();
//! assert_eq!(texts, ["one", "two"]);
//! ```

mod boundary;
mod error;
mod iterator;

pub use boundary::BoundaryResolver;
pub use error::RangeIterError;
pub use iterator::RangeIterator;
pub use walker::{Predicate, WalkerConfig, WhatToShow};
