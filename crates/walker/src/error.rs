use dom::NodeKey;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("start node {0} is not live in the document")]
    MissingNode(NodeKey),
    #[error("root {root} must be an ancestor of the start node {start}")]
    OutOfScope { start: NodeKey, root: NodeKey },
}
