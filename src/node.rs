/*!
# Node Representation

We choose `Node = u32` as almost all use-cases involve less than `2^32` nodes.
Nodes of a graph with `n` nodes are numbered `0..n`.
*/

use std::num::NonZero;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// As `Option<u32>` uses additional bytes for padding, it can be inefficient
/// since we often need to use `Vec<Option<u32>>`. This instead uses the
/// `NonZero`-Wrapper with a reserved constant `N` acting as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalIdx<const N: u32>(NonZero<u32>);

/// Index type where `INVALID_NODE` is the reserved `None`-Value
pub type OptionalNode = OptionalIdx<INVALID_NODE>;

impl<const N: u32> OptionalIdx<N> {
    /// Returns `Some(OptionalIdx)` if `n != N` and `None` otherwise
    pub const fn new(n: u32) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalIdx(inner)),
            None => None,
        }
    }

    /// Gets the underlying value
    pub const fn get(&self) -> u32 {
        self.0.get() ^ N
    }
}
