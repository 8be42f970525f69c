use thiserror::Error;

use super::NodeId;

/// Errors reported by the host scene graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// The node does not exist (or was removed by the user mid-import).
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    /// The host cannot load the requested font.
    #[error("Font '{0}' is not available")]
    FontUnavailable(String),

    /// A font was assigned, or text edited, before the font was loaded.
    #[error("Font '{0}' must be loaded before use")]
    FontNotLoaded(String),

    /// The host refused an image payload.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The operation does not apply to this node (e.g. text styling on a rectangle).
    #[error("Unsupported operation on node {node}: {operation}")]
    Unsupported { node: NodeId, operation: String },

    /// Any other refusal from the host.
    #[error("Host rejected the operation: {0}")]
    Rejected(String),
}

/// A specialized Result type for host calls.
pub type HostResult<T> = std::result::Result<T, HostError>;
