use dom::NodeKey;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RangeIterError {
    #[error("a range is required to build a range iterator")]
    MissingRange,
    #[error("range boundary {0} is not live in the document")]
    StaleBoundary(NodeKey),
    #[error("range boundaries belong to different trees")]
    Disconnected,
}
