use std::fmt::{Debug, Display};

use crate::node::*;

/// An undirected edge is defined by two distinct nodes/endpoints.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

/// Edges of a graph with `m` edges are addressed by their position `0..m` in the edge list
pub type EdgeIdx = NumEdges;

/// Edge weights are positive integers
pub type Weight = u32;

/// The weighted degree of a node, ie. the sum of the weights of its incident edges
pub type Degree = u32;

/// Edge index where `EdgeIdx::MAX` is the reserved `None`-Value
pub type OptionalEdgeIdx = OptionalIdx<{ EdgeIdx::MAX }>;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }

    /// Returns the endpoint opposite to `u`.
    /// ** Panics (in debug builds) if `u` is no endpoint **
    pub fn opposite(&self, u: Node) -> Node {
        debug_assert!(u == self.0 || u == self.1);
        if u == self.0 { self.1 } else { self.0 }
    }

    /// Position of the unordered pair in a compressed lower-triangular matrix.
    ///
    /// For `v0 = min(u, v) < v1 = max(u, v)`, the pair is mapped to `v0 + v1 * (v1 - 1) / 2`,
    /// which is a bijection from all pairs of `n` nodes to `0..n * (n - 1) / 2`.
    /// ** Panics (in debug builds) if the edge is a loop **
    pub fn triangular_index(&self) -> usize {
        debug_assert!(!self.is_loop());
        let Edge(v0, v1) = self.normalized();
        let (v0, v1) = (v0 as usize, v1 as usize);
        v0 + v1 * (v1 - 1) / 2
    }

    /// Inverse of [`Edge::triangular_index`]; returns the normalized edge at position `index`
    pub fn from_triangular_index(index: u64) -> Self {
        // largest v1 with v1 * (v1 - 1) / 2 <= index; the float estimate is off by at most one
        let mut v1 = ((1.0 + (1.0 + 8.0 * index as f64).sqrt()) / 2.0) as u64;
        while v1 * (v1 - 1) / 2 > index {
            v1 -= 1;
        }
        while (v1 + 1) * v1 / 2 <= index {
            v1 += 1;
        }

        let v0 = index - v1 * (v1 - 1) / 2;
        Edge(v0 as Node, v1 as Node)
    }

    /// Number of distinct unordered pairs of `n` nodes
    pub fn number_of_pairs(n: NumNodes) -> usize {
        let n = n as usize;
        n * n.saturating_sub(1) / 2
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}
