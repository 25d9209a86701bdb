/*!
# Errors

All fallible operations of this crate report an [`Error`].
Operations come in pairs: `try_*` returns a [`Result`], the plain variant panics with the
error message. A failed operation never leaves a partially updated structure behind.
*/

use thiserror::Error;

use crate::{edge::*, node::*};

/// Errors raised by sets, graphs and the weighting search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested capacity collides with the sentinel of the element type
    #[error("capacity {capacity} must be strictly less than the sentinel {sentinel}")]
    CapacityTooLarge { capacity: u64, sentinel: u64 },

    /// Memory for a table of the requested size could not be reserved
    #[error("cannot allocate {entries} entries")]
    OutOfMemory { entries: u64 },

    /// An element outside of the universe `0..capacity` was accessed
    #[error("element {element} is outside of the universe 0..{capacity}")]
    ElementOutOfRange { element: u64, capacity: u64 },

    /// A node outside of `0..n` was referenced
    #[error("node {node} is outside of 0..{n}")]
    NodeOutOfRange { node: Node, n: NumNodes },

    /// An edge index outside of `0..m` was referenced
    #[error("edge index {edge} is outside of 0..{m}")]
    EdgeOutOfRange { edge: EdgeIdx, m: NumEdges },

    /// Self-loops are not allowed in simple graphs
    #[error("self-loop at node {0} is not allowed")]
    SelfLoop(Node),

    /// Multi-edges are not allowed in simple graphs
    #[error("edge {0} occurs more than once")]
    DuplicateEdge(Edge),

    /// Weights must be positive and at most the configured maximum
    #[error("weight {weight} is not in 1..={max}")]
    InvalidWeight { weight: Weight, max: Weight },

    /// A weight change would push a weighted degree past the largest trackable degree
    #[error("weighted degree of node {node} would exceed {max}")]
    DegreeOverflow { node: Node, max: Degree },

    /// An ordered cursor without backing set or past the last member was dereferenced
    #[error("iterator not dereferenceable")]
    IteratorNotDereferenceable,

    /// The search was configured with parameters it cannot run with
    #[error("invalid search configuration: {0}")]
    InvalidSearchConfig(String),
}

/// Shorthand for results carrying an [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, value)
    }
}
