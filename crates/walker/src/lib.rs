//! Depth-first DOM walker with opening/closing tag sides.
//!
//! [`Walker`] moves through a [`dom::Document`] one tag at a time and yields
//! the nodes that pass its acceptance chain. Select predicates are
//! OR-combined, reject predicates veto, and an optional gate is checked
//! before both.

mod config;
mod error;
mod predicate;
mod walker;

pub use config::{WalkerConfig, WhatToShow};
pub use error::WalkError;
pub use predicate::Predicate;
pub use walker::Walker;
