//! # Errors
//!
//! Contract violations of the public API (invalid nodes, self-loops, parallel edges, flow above
//! capacity, ...) are reported as [`GraphError`] instead of aborting. Reading graphs from files
//! reports `std::io::Error`s; a [`GraphError`] raised while loading is converted into an
//! [`std::io::ErrorKind::InvalidData`] error.

use crate::{edge::*, node::*};

/// Errors raised by graph construction, mutation and queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A node `>= n` was passed
    #[error("node {node} is out of range for a graph with {n} nodes")]
    NodeOutOfRange { node: Node, n: NumNodes },

    /// The `index`-th neighbor of `node` was requested, but `node` has fewer neighbors
    #[error("neighbor index {index} is out of range for node {node} with degree {degree}")]
    NeighborOutOfRange {
        node: Node,
        index: NumNodes,
        degree: NumNodes,
    },

    /// An edge slot `>= m` was written during bulk construction
    #[error("edge slot {index} is out of range for {m} declared edges")]
    SlotOutOfRange { index: NumEdges, m: NumEdges },

    /// An edge slot was never written before finalizing
    #[error("edge slot {0} was never set")]
    UnsetSlot(NumEdges),

    /// Edges `(u, u)` are not supported
    #[error("self-loop at node {0} is not supported")]
    SelfLoop(Node),

    /// The edge is already present
    #[error("parallel edge {0} is not supported")]
    ParallelEdge(Edge),

    /// The edge is not present
    #[error("edge {0} does not exist")]
    EdgeNotFound(Edge),

    /// The flow on an edge would exceed its capacity
    #[error("flow {flow} exceeds capacity {capacity}")]
    FlowExceedsCapacity { flow: Weight, capacity: Capacity },

    /// Source and target of a search coincide
    #[error("source and target must differ, got {0} for both")]
    SourceIsTarget(Node),
}

/// Shorthand for results of graph operations
pub type GraphResult<T> = std::result::Result<T, GraphError>;

impl From<GraphError> for std::io::Error {
    fn from(value: GraphError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, value)
    }
}
