//! Document mutation protocol.
//!
//! Every structural change to a [`Document`](crate::Document) goes through a
//! `DomPatch`, including the convenience constructors on `Document`.
//!
//! Invariants:
//! - Patches are applied in order; the first failing patch aborts the batch.
//! - References must point to live keys at the time they are used (except
//!   the `key` in create operations).
//! - `NodeKey::INVALID` is never valid in a patch.
//! - A node may have at most one parent and operations must not create cycles.
//! - `Clear` resets the document, including key allocation.

use crate::types::NodeKey;
use std::sync::Arc;

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomPatch {
    /// Drop every node of the document.
    Clear,
    /// Create the document root node.
    CreateDocument {
        key: NodeKey,
        doctype: Option<String>,
    },
    /// Create a detached element node with initial attributes.
    CreateElement {
        key: NodeKey,
        name: Arc<str>,
        attributes: Vec<(Arc<str>, Option<String>)>,
    },
    /// Create a detached text node.
    CreateText { key: NodeKey, text: String },
    /// Create a detached comment node.
    CreateComment { key: NodeKey, text: String },
    /// Append a child to the end of a parent's children list.
    AppendChild { parent: NodeKey, child: NodeKey },
    /// Insert a child before an existing sibling.
    InsertBefore {
        parent: NodeKey,
        child: NodeKey,
        before: NodeKey,
    },
    /// Remove a node and its entire subtree from the document.
    ///
    /// Keys in the subtree are dead afterwards.
    RemoveNode { key: NodeKey },
    /// Replace all attributes on an element node.
    SetAttributes {
        key: NodeKey,
        attributes: Vec<(Arc<str>, Option<String>)>,
    },
    /// Replace the data of a text or comment node.
    SetText { key: NodeKey, text: String },
}
