/*!
`irregraphs` is a library for **irregular edge weightings** of simple undirected graphs.

A weighting assigns a positive integer to every edge; the weighted degree of a node is the sum
of the weights of its incident edges. A weighting is *irregular* if no two nodes share the same
weighted degree, and the smallest possible largest weight of an irregular weighting is the
*irregularity strength* `s(G)` of the graph.

# Representation

Nodes are `u32` in the range `0..n` and edges are tuple-structs `Edge(Node, Node)`.
The topology of a [`WeightedGraph`](crate::repr::WeightedGraph) is fixed at construction while
its weights may change. Every node is kept in the bucket of its current weighted degree, each
bucket being an [`IndexedSet`](crate::utils::IndexedSet) with constant-time insertion, removal
and membership. Changing a weight hence costs O(1) and irregularity can be tested in O(1).

# Usage

- [`prelude`] includes nodes, edges, the graph operation traits and [`repr::WeightedGraph`],
- [`algo`] includes edge prioritization and the randomized irregular weighting search,
- [`gens`] includes deterministic graph families and random `G(n,p)` graphs,
- [`io`] reads and writes weighted graphs in the EdgeList-Format,
- [`utils`] includes the [`Set`](crate::utils::Set) abstraction and `IndexedSet`.

In most use-cases, `use irregraphs::{prelude::*, algo::*};` suffices for your needs.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;
pub mod utils;

pub use edge::*;
pub use node::*;

/// `irregraphs::prelude` includes definitions for nodes and edges, all basic graph operation
/// traits as well as the weighted graph representation.
pub mod prelude {
    pub use super::{edge::*, node::*, ops::*, repr::*};
}
