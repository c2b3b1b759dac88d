use crate::dom_patch::DomPatch;
use crate::error::DomError;
use crate::node_ref::NodeRef;
use crate::types::{NodeKey, NodeKind, NodeType};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Clone, Debug)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

/// Arena-backed document tree.
///
/// Nodes are addressed by [`NodeKey`]. Removing a node kills its key and the
/// keys of its whole subtree; dead keys are never reused until `Clear`.
///
/// Records of removed nodes stay in the arena, so [`Document::len`] counts
/// live nodes only while storage keeps every node ever created. `Clear` is
/// the point where that storage is released.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<NodeRecord>,
    live: HashMap<NodeKey, usize>,
    allocated: HashSet<NodeKey>,
    root: Option<NodeKey>,
    next_key: u32,
}

impl Document {
    /// An empty document without a root node. Feed it a
    /// [`DomPatch::CreateDocument`] before anything else.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            live: HashMap::new(),
            allocated: HashSet::new(),
            root: None,
            next_key: 1,
        }
    }

    /// A document with a root node already created.
    pub fn with_root() -> Self {
        let mut doc = Self::new();
        let key = doc.allocate_key();
        doc.root = Some(key);
        doc.push_record(key, NodeKind::Document { doctype: None });
        doc
    }

    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn apply(&mut self, patches: &[DomPatch]) -> Result<(), DomError> {
        for patch in patches {
            self.apply_one(patch)?;
        }
        Ok(())
    }

    pub fn apply_one(&mut self, patch: &DomPatch) -> Result<(), DomError> {
        log::trace!(target: "dom.patch", "apply {patch:?}");
        match patch {
            DomPatch::Clear => {
                *self = Self::new();
            }
            DomPatch::CreateDocument { key, doctype } => {
                if self.root.is_some() {
                    return Err(DomError::DuplicateRoot);
                }
                self.insert_node(
                    *key,
                    NodeKind::Document {
                        doctype: doctype.clone(),
                    },
                )?;
                self.root = Some(*key);
            }
            DomPatch::CreateElement {
                key,
                name,
                attributes,
            } => {
                self.insert_node(
                    *key,
                    NodeKind::Element {
                        name: Arc::clone(name),
                        attributes: attributes.clone(),
                    },
                )?;
            }
            DomPatch::CreateText { key, text } => {
                self.insert_node(*key, NodeKind::Text { text: text.clone() })?;
            }
            DomPatch::CreateComment { key, text } => {
                self.insert_node(*key, NodeKind::Comment { text: text.clone() })?;
            }
            DomPatch::AppendChild { parent, child } => {
                let parent_index = self.prepare_insert(*parent, *child)?;
                self.nodes[parent_index].children.push(*child);
                self.set_parent(*child, *parent)?;
            }
            DomPatch::InsertBefore {
                parent,
                child,
                before,
            } => {
                let parent_index = self.prepare_insert(*parent, *child)?;
                let before_index = self.index_of(*before)?;
                if self.nodes[before_index].parent != Some(*parent) {
                    return Err(DomError::InvalidSibling {
                        parent: *parent,
                        before: *before,
                    });
                }
                let siblings = &mut self.nodes[parent_index].children;
                let pos = siblings
                    .iter()
                    .position(|k| k == before)
                    .ok_or(DomError::InvalidSibling {
                        parent: *parent,
                        before: *before,
                    })?;
                siblings.insert(pos, *child);
                self.set_parent(*child, *parent)?;
            }
            DomPatch::RemoveNode { key } => {
                self.index_of(*key)?;
                if self.root == Some(*key) {
                    self.root = None;
                }
                self.remove_subtree(*key);
            }
            DomPatch::SetAttributes { key, attributes } => {
                let index = self.index_of(*key)?;
                match &mut self.nodes[index].kind {
                    NodeKind::Element {
                        attributes: attrs, ..
                    } => {
                        attrs.clear();
                        attrs.extend(attributes.iter().cloned());
                    }
                    _ => return Err(DomError::WrongNodeKind(*key)),
                }
            }
            DomPatch::SetText { key, text } => {
                let index = self.index_of(*key)?;
                match &mut self.nodes[index].kind {
                    NodeKind::Text { text: existing } | NodeKind::Comment { text: existing } => {
                        existing.clear();
                        existing.push_str(text);
                    }
                    _ => return Err(DomError::WrongNodeKind(*key)),
                }
            }
        }
        Ok(())
    }

    pub fn create_element(&mut self, name: &str) -> Result<NodeKey, DomError> {
        let key = self.allocate_key();
        self.apply_one(&DomPatch::CreateElement {
            key,
            name: Arc::from(name.to_ascii_lowercase()),
            attributes: Vec::new(),
        })?;
        Ok(key)
    }

    pub fn create_text(&mut self, text: &str) -> Result<NodeKey, DomError> {
        let key = self.allocate_key();
        self.apply_one(&DomPatch::CreateText {
            key,
            text: text.to_string(),
        })?;
        Ok(key)
    }

    pub fn create_comment(&mut self, text: &str) -> Result<NodeKey, DomError> {
        let key = self.allocate_key();
        self.apply_one(&DomPatch::CreateComment {
            key,
            text: text.to_string(),
        })?;
        Ok(key)
    }

    pub fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), DomError> {
        self.apply_one(&DomPatch::AppendChild { parent, child })
    }

    pub fn insert_before(
        &mut self,
        parent: NodeKey,
        child: NodeKey,
        before: NodeKey,
    ) -> Result<(), DomError> {
        self.apply_one(&DomPatch::InsertBefore {
            parent,
            child,
            before,
        })
    }

    pub fn remove(&mut self, key: NodeKey) -> Result<(), DomError> {
        self.apply_one(&DomPatch::RemoveNode { key })
    }

    pub fn set_text(&mut self, key: NodeKey, text: &str) -> Result<(), DomError> {
        self.apply_one(&DomPatch::SetText {
            key,
            text: text.to_string(),
        })
    }

    pub fn set_attribute(&mut self, key: NodeKey, name: &str, value: &str) -> Result<(), DomError> {
        let NodeKind::Element { attributes, .. } = self.kind(key).ok_or(DomError::MissingKey(key))?
        else {
            return Err(DomError::WrongNodeKind(key));
        };
        let mut attributes = attributes.clone();
        match attributes.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some((_, v)) => *v = Some(value.to_string()),
            None => attributes.push((
                Arc::from(name.to_ascii_lowercase()),
                Some(value.to_string()),
            )),
        }
        self.apply_one(&DomPatch::SetAttributes { key, attributes })
    }

    // --- queries ---

    pub fn node(&self, key: NodeKey) -> Option<NodeRef<'_>> {
        self.is_live(key).then(|| NodeRef::new(self, key))
    }

    pub fn is_live(&self, key: NodeKey) -> bool {
        self.live.contains_key(&key)
    }

    pub fn kind(&self, key: NodeKey) -> Option<&NodeKind> {
        self.record(key).map(|r| &r.kind)
    }

    pub fn node_type(&self, key: NodeKey) -> Option<NodeType> {
        self.kind(key).map(NodeKind::node_type)
    }

    /// Element tag name, or the DOM pseudo-name (`#text`, `#comment`,
    /// `#document`) for other nodes.
    pub fn node_name(&self, key: NodeKey) -> Option<&str> {
        self.kind(key).map(|kind| match kind {
            NodeKind::Element { name, .. } => name,
            NodeKind::Text { .. } => "#text",
            NodeKind::Comment { .. } => "#comment",
            NodeKind::Document { .. } => "#document",
        })
    }

    /// Data of a text or comment node.
    pub fn text(&self, key: NodeKey) -> Option<&str> {
        match self.kind(key)? {
            NodeKind::Text { text } | NodeKind::Comment { text } => Some(text),
            _ => None,
        }
    }

    pub fn attr(&self, key: NodeKey, name: &str) -> Option<&str> {
        match self.kind(key)? {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .and_then(|(_, v)| v.as_deref()),
            _ => None,
        }
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.record(key).and_then(|r| r.parent)
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.record(key).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    pub fn first_child(&self, key: NodeKey) -> Option<NodeKey> {
        self.children(key).first().copied()
    }

    pub fn last_child(&self, key: NodeKey) -> Option<NodeKey> {
        self.children(key).last().copied()
    }

    pub fn next_sibling(&self, key: NodeKey) -> Option<NodeKey> {
        let parent = self.parent(key)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|k| *k == key)?;
        siblings.get(pos + 1).copied()
    }

    pub fn previous_sibling(&self, key: NodeKey) -> Option<NodeKey> {
        let parent = self.parent(key)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|k| *k == key)?;
        pos.checked_sub(1).and_then(|i| siblings.get(i).copied())
    }

    /// Position of `key` among its parent's children; 0 for parentless nodes.
    pub fn index(&self, key: NodeKey) -> usize {
        self.parent(key)
            .and_then(|parent| self.children(parent).iter().position(|k| *k == key))
            .unwrap_or(0)
    }

    /// DOM node length: number of chars for character data, number of
    /// children otherwise. Range offsets are measured in the same unit.
    pub fn length(&self, key: NodeKey) -> usize {
        match self.kind(key) {
            Some(NodeKind::Text { text } | NodeKind::Comment { text }) => text.chars().count(),
            Some(_) => self.children(key).len(),
            None => 0,
        }
    }

    /// Exclusive ancestors, nearest first.
    pub fn ancestors(&self, key: NodeKey) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(key),
        }
    }

    /// `key` followed by its ancestors, nearest first.
    pub fn inclusive_ancestors(&self, key: NodeKey) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.is_live(key).then_some(key),
        }
    }

    /// Topmost inclusive ancestor of `key`.
    pub fn root_of(&self, key: NodeKey) -> Option<NodeKey> {
        self.inclusive_ancestors(key).last()
    }

    /// `key` and all of its descendants in tree order.
    pub fn descendants(&self, key: NodeKey) -> Descendants<'_> {
        let stack = if self.is_live(key) { vec![key] } else { Vec::new() };
        Descendants { doc: self, stack }
    }

    // --- internals ---

    fn record(&self, key: NodeKey) -> Option<&NodeRecord> {
        self.live.get(&key).map(|&index| &self.nodes[index])
    }

    fn index_of(&self, key: NodeKey) -> Result<usize, DomError> {
        if key == NodeKey::INVALID {
            return Err(DomError::InvalidKey(key));
        }
        self.live.get(&key).copied().ok_or(DomError::MissingKey(key))
    }

    fn allocate_key(&mut self) -> NodeKey {
        let key = NodeKey(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        key
    }

    fn insert_node(&mut self, key: NodeKey, kind: NodeKind) -> Result<(), DomError> {
        if key == NodeKey::INVALID {
            return Err(DomError::InvalidKey(key));
        }
        if self.allocated.contains(&key) {
            return Err(DomError::DuplicateKey(key));
        }
        self.push_record(key, kind);
        if key.0 >= self.next_key {
            self.next_key = key.0.wrapping_add(1);
        }
        Ok(())
    }

    fn push_record(&mut self, key: NodeKey, kind: NodeKind) {
        let index = self.nodes.len();
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        });
        self.allocated.insert(key);
        self.live.insert(key, index);
    }

    /// Validates a pending insertion of `child` under `parent` and returns the
    /// parent's arena index.
    fn prepare_insert(&self, parent: NodeKey, child: NodeKey) -> Result<usize, DomError> {
        let parent_index = self.index_of(parent)?;
        let child_index = self.index_of(child)?;
        if parent == child || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::CycleDetected { parent, child });
        }
        if !self.nodes[parent_index].kind.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        if self.nodes[child_index].parent.is_some() || self.root == Some(child) {
            return Err(DomError::InvalidParent(child));
        }
        Ok(parent_index)
    }

    fn set_parent(&mut self, child: NodeKey, parent: NodeKey) -> Result<(), DomError> {
        let child_index = self.index_of(child)?;
        self.nodes[child_index].parent = Some(parent);
        Ok(())
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        self.inclusive_ancestors(node).any(|k| k == ancestor)
    }

    fn remove_subtree(&mut self, key: NodeKey) {
        let Some(&index) = self.live.get(&key) else {
            return;
        };
        if let Some(parent) = self.nodes[index].parent.take() {
            if let Some(&parent_index) = self.live.get(&parent) {
                self.nodes[parent_index].children.retain(|k| *k != key);
            }
        }
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(index) = self.live.remove(&current) {
                stack.append(&mut self.nodes[index].children);
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeKey>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

/// Pre-order walk over a subtree.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeKey>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(current).iter().rev().copied());
        Some(current)
    }
}
