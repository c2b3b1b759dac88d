use crate::config::WhatToShow;
use dom::{NodeRef, NodeType};
use std::fmt;

/// Node acceptance test used by the walker's select, reject and gate hooks.
///
/// Build one from a closure with [`Predicate::new`], or convert a
/// [`NodeType`], a [`WhatToShow`] mask, or a tag name.
pub struct Predicate(Box<dyn Fn(NodeRef<'_>) -> bool>);

impl Predicate {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(NodeRef<'_>) -> bool + 'static,
    {
        Predicate(Box::new(f))
    }

    /// Accepts every node.
    pub fn always() -> Self {
        Predicate::new(|_| true)
    }

    pub fn node_type(node_type: NodeType) -> Self {
        Predicate::new(move |node| node.node_type() == Some(node_type))
    }

    pub fn mask(mask: WhatToShow) -> Self {
        Predicate::new(move |node| node.node_type().is_some_and(|t| mask.shows(t)))
    }

    /// Elements whose tag name matches, ASCII case-insensitively.
    pub fn tag(name: &str) -> Self {
        let name = name.to_string();
        Predicate::new(move |node| node.is_element_named(&name))
    }

    pub fn matches(&self, node: NodeRef<'_>) -> bool {
        (self.0)(node)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

impl From<NodeType> for Predicate {
    fn from(node_type: NodeType) -> Self {
        Predicate::node_type(node_type)
    }
}

impl From<WhatToShow> for Predicate {
    fn from(mask: WhatToShow) -> Self {
        Predicate::mask(mask)
    }
}

impl From<&str> for Predicate {
    fn from(name: &str) -> Self {
        Predicate::tag(name)
    }
}
