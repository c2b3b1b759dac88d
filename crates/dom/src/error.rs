use crate::types::NodeKey;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node key {0} is reserved and cannot be used")]
    InvalidKey(NodeKey),
    #[error("node key {0} was already allocated")]
    DuplicateKey(NodeKey),
    #[error("node key {0} is not live in this document")]
    MissingKey(NodeKey),
    #[error("node {0} has the wrong kind for this operation")]
    WrongNodeKind(NodeKey),
    #[error("node {0} cannot take part in this insertion")]
    InvalidParent(NodeKey),
    #[error("node {before} is not a child of {parent}")]
    InvalidSibling { parent: NodeKey, before: NodeKey },
    #[error("appending {child} to {parent} would create a cycle")]
    CycleDetected { parent: NodeKey, child: NodeKey },
    #[error("document has no root node")]
    MissingRoot,
    #[error("document already has a root node")]
    DuplicateRoot,
    #[error("offset {offset} is greater than the length {length} of node {node}")]
    IndexSize {
        node: NodeKey,
        offset: usize,
        length: usize,
    },
    #[error("node {0} cannot be used as a range boundary here")]
    InvalidNodeType(NodeKey),
}
