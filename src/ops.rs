use std::ops::Range;

use crate::{error::Result, *};

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices_range()
    }

    /// Returns the range `0..n` of all nodes.
    /// In contrast to self.vertices(), the range does not borrow self and hence may be used
    /// where additional mutable references of self are needed
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for (unweighted) neighborhoods
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns an iterator over the (open) neighborhood of a given vertex.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of neighbors of `u`, ie. its unweighted degree
    /// ** Panics if `u >= n` **
    fn number_of_neighbors_of(&self, u: Node) -> NumNodes;

    /// Returns the largest number of neighbors of any node
    fn max_number_of_neighbors(&self) -> NumNodes {
        self.vertices()
            .map(|u| self.number_of_neighbors_of(u))
            .max()
            .unwrap_or(0)
    }
}

/// Trait to test existence of edges in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if the egde {u,v} exists in the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool;
}

/// Access to a fixed, indexed list of edges
pub trait IndexedEdges: GraphEdgeOrder {
    /// Returns the edge with index `e`
    /// ** Panics if `e >= m` **
    fn edge(&self, e: EdgeIdx) -> Edge;

    /// Returns an iterator over all edges in index order
    fn edges(&self) -> impl Iterator<Item = Edge> + '_;

    /// Returns the index of the edge {u,v} or `None` if no such edge exists.
    /// ** Panics if `u >= n || v >= n` **
    fn edge_between(&self, u: Node, v: Node) -> Option<EdgeIdx>;

    /// Returns the indices of all edges incident to `u`
    /// ** Panics if `u >= n` **
    fn incident_edges_of(&self, u: Node) -> &[EdgeIdx];
}

/// Getters for edge weights and the resulting weighted degrees
pub trait EdgeWeights: IndexedEdges + GraphNodeOrder {
    /// Returns the current weight of edge `e`
    /// ** Panics if `e >= m` **
    fn weight_of(&self, e: EdgeIdx) -> Weight;

    /// Returns the weighted degree of `u`, ie. the sum of weights of all incident edges
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> Degree;

    /// Returns an iterator over all weights in edge-index order
    fn weights(&self) -> impl Iterator<Item = Weight> + '_ {
        (0..self.number_of_edges()).map(|e| self.weight_of(e))
    }

    /// Returns an iterator over all weighted degrees in node order
    fn degrees(&self) -> impl Iterator<Item = Degree> + '_ {
        self.vertices().map(|u| self.degree_of(u))
    }

    /// Returns the largest edge weight, or `0` if there are no edges.
    ///
    /// Once the weighting is irregular, this is the strength achieved by it.
    fn max_weight(&self) -> Weight {
        self.weights().max().unwrap_or(0)
    }

    /// Returns the sum of all edge weights
    fn total_weight(&self) -> u64 {
        self.weights().map(u64::from).sum()
    }
}

/// Provides functions to change edge weights
pub trait WeightEditing: EdgeWeights {
    /// Largest weight that may be assigned to an edge; `Weight::MAX` unless the graph was
    /// created with an explicit limit
    fn max_edge_weight(&self) -> Weight;

    /// Sets the weight of edge `e` to `weight` and returns the previous weight.
    ///
    /// # Errors
    /// Fails without any modification if `e >= m`, `weight` is not in `1..=max_edge_weight` or
    /// an endpoint's weighted degree would overflow.
    fn try_adjust_weight(&mut self, e: EdgeIdx, weight: Weight) -> Result<Weight>;

    /// Sets the weight of edge `e` to `weight` and returns the previous weight.
    /// ** Panics if `try_adjust_weight` fails **
    fn adjust_weight(&mut self, e: EdgeIdx, weight: Weight) -> Weight {
        self.try_adjust_weight(e, weight)
            .unwrap_or_else(|err| panic!("{err}"))
    }
}

/// Queries about the irregularity of the current weighting
pub trait Irregularity: EdgeWeights {
    /// Returns *true* if no two nodes share the same weighted degree
    fn is_irregular(&self) -> bool;

    /// Upper bound `n - 1` on the irregularity strength used to cap trial weights
    fn irregularity_strength_upper_bound(&self) -> Weight {
        self.number_of_nodes().saturating_sub(1)
    }
}

/// Access to the classes of nodes sharing the same weighted degree
pub trait DegreeClasses: EdgeWeights {
    /// Returns the number of nodes whose weighted degree equals `degree`
    fn class_size(&self, degree: Degree) -> NumNodes;

    /// Returns the number of nodes sharing the weighted degree of `u` (including `u`)
    /// ** Panics if `u >= n` **
    fn class_size_of(&self, u: Node) -> NumNodes {
        self.class_size(self.degree_of(u))
    }
}

/// A super trait for creating a graph from scratch from a set of edges and a number of nodes
pub trait GraphFromScratch: Sized {
    /// Tries to create a graph from a number of nodes and an iterator over Edges
    ///
    /// # Errors
    /// Fails if an endpoint is out of range or the edges do not form a simple graph.
    fn try_from_edges<I>(n: NumNodes, edges: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Edge>;

    /// Create a graph from a number of nodes and an iterator over Edges
    /// ** Panics if an endpoint is out of range or the edges do not form a simple graph **
    fn from_edges<I>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Edge>,
    {
        Self::try_from_edges(n, edges).unwrap_or_else(|err| panic!("{err}"))
    }
}
