//! Arena document tree used as the host structure for range iteration.
//!
//! Nodes live in a [`Document`] and are addressed by [`NodeKey`]. The tree is
//! built and mutated through [`DomPatch`] values; [`NodeRef`] is the borrowed
//! view handed to predicates and iterators. Tree-order comparison lives in
//! [`DocumentPosition`] / [`Document::compare_document_position`], and
//! selections are expressed as [`Range`] or [`StaticRange`].

mod document;
mod dom_patch;
mod error;
mod node_ref;
mod position;
mod range;
mod types;

pub use crate::document::{Ancestors, Descendants, Document};
pub use crate::dom_patch::DomPatch;
pub use crate::error::DomError;
pub use crate::node_ref::NodeRef;
pub use crate::position::DocumentPosition;
pub use crate::range::{AbstractRange, BoundaryPoint, Range, StaticRange};
pub use crate::types::{NodeKey, NodeKind, NodeType};
