use std::fmt::Display;

use itertools::Itertools;
use smallvec::SmallVec;

use super::*;
use crate::{
    error::{Error, Result},
    utils::try_filled_vec,
};

/// An undirected simple graph with a positive integer weight on every edge.
///
/// The topology is fixed at construction; only weights change afterwards. Besides the edge
/// list, the graph maintains
/// - the weighted degree of every node,
/// - the indices of all edges incident to every node,
/// - a compressed lower-triangular matrix mapping a node pair to its edge index,
/// - the partition of all nodes into [`DegreeBuckets`] by their current weighted degree.
///
/// All of them are updated in O(1) when a weight is changed via
/// [`WeightEditing::try_adjust_weight`].
#[derive(Clone)]
pub struct WeightedGraph {
    edges: Vec<Edge>,
    weights: Vec<Weight>,
    degrees: Vec<Degree>,
    incidence: Vec<SmallVec<[EdgeIdx; 4]>>,
    adjacency: Vec<Option<OptionalEdgeIdx>>,
    buckets: DegreeBuckets,
    max_edge_weight: Weight,
}

impl WeightedGraph {
    /// Creates a graph with all weights set to `1` where weights may later be raised up to
    /// `max_edge_weight`. Use [`GraphFromScratch::try_from_edges`] for a graph without limit.
    ///
    /// # Errors
    /// Fails if an endpoint is out of range, an edge is a loop or occurs twice,
    /// `max_edge_weight` is `0`, or the graph is too large to be allocated.
    pub fn try_with_max_weight<I>(n: NumNodes, edges: I, max_edge_weight: Weight) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Edge>,
    {
        Self::try_with_weights(
            n,
            edges.into_iter().map(|e| (e.into(), 1)),
            max_edge_weight,
        )
    }

    /// Creates a graph from edges with given initial weights.
    ///
    /// # Errors
    /// Fails if an endpoint is out of range, an edge is a loop or occurs twice, a weight is
    /// not in `1..=max_edge_weight`, a weighted degree exceeds
    /// [`DegreeBuckets::DEGREE_LIMIT`], or the graph is too large to be allocated.
    pub fn try_with_weights<I>(n: NumNodes, weighted_edges: I, max_edge_weight: Weight) -> Result<Self>
    where
        I: IntoIterator<Item = (Edge, Weight)>,
    {
        if max_edge_weight == 0 {
            return Err(Error::InvalidWeight {
                weight: 0,
                max: Weight::MAX,
            });
        }

        // the triangular table is the largest structure; allocate it first
        let mut adjacency: Vec<Option<OptionalEdgeIdx>> =
            try_filled_vec(Edge::number_of_pairs(n), None)?;
        let mut incidence: Vec<SmallVec<[EdgeIdx; 4]>> =
            try_filled_vec(n as usize, SmallVec::new())?;
        let mut edges = Vec::new();
        let mut weights = Vec::new();

        for (edge, weight) in weighted_edges {
            let Edge(u, v) = edge;
            for x in [u, v] {
                if x >= n {
                    return Err(Error::NodeOutOfRange { node: x, n });
                }
            }
            if edge.is_loop() {
                return Err(Error::SelfLoop(u));
            }
            if !(1..=max_edge_weight).contains(&weight) {
                return Err(Error::InvalidWeight {
                    weight,
                    max: max_edge_weight,
                });
            }

            let slot = &mut adjacency[edge.triangular_index()];
            if slot.is_some() {
                return Err(Error::DuplicateEdge(edge));
            }

            let idx = edges.len() as EdgeIdx;
            *slot = OptionalEdgeIdx::new(idx);
            incidence[u as usize].push(idx);
            incidence[v as usize].push(idx);
            edges.push(edge);
            weights.push(weight);
        }

        let degrees = incidence
            .iter()
            .enumerate()
            .map(|(u, inc)| {
                inc.iter()
                    .try_fold(0 as Degree, |d, &e| d.checked_add(weights[e as usize]))
                    .filter(|&d| d <= DegreeBuckets::DEGREE_LIMIT)
                    .ok_or(Error::DegreeOverflow {
                        node: u as Node,
                        max: DegreeBuckets::DEGREE_LIMIT,
                    })
            })
            .collect::<Result<Vec<Degree>>>()?;

        let max_degree = degrees.iter().copied().max().unwrap_or(0);
        let mut buckets = DegreeBuckets::try_new(n, max_degree)?;
        for (u, &d) in degrees.iter().enumerate() {
            buckets.insert(d, u as Node);
        }

        Ok(Self {
            edges,
            weights,
            degrees,
            incidence,
            adjacency,
            buckets,
            max_edge_weight,
        })
    }

    /// Returns all nodes with weighted degree `degree` in unspecified order
    pub fn nodes_with_degree(&self, degree: Degree) -> &[Node] {
        self.buckets.nodes_with_degree(degree)
    }

    /// Read-only access to the partition of nodes by weighted degree
    pub fn degree_buckets(&self) -> &DegreeBuckets {
        &self.buckets
    }

    /// Returns the current weights in edge-index order
    pub fn weights_slice(&self) -> &[Weight] {
        &self.weights
    }

    /// Returns all edges paired with their current weight
    pub fn weighted_edges(&self) -> impl Iterator<Item = (Edge, Weight)> + '_ {
        self.edges.iter().copied().zip(self.weights.iter().copied())
    }

    /// Sets every edge weight back to `1`
    pub fn reset_weights(&mut self) {
        for e in 0..self.number_of_edges() {
            self.adjust_weight(e, 1);
        }
    }

    fn check_node(&self, u: Node) -> Result<()> {
        if u < self.number_of_nodes() {
            Ok(())
        } else {
            Err(Error::NodeOutOfRange {
                node: u,
                n: self.number_of_nodes(),
            })
        }
    }

    fn check_edge(&self, e: EdgeIdx) -> Result<()> {
        if e < self.number_of_edges() {
            Ok(())
        } else {
            Err(Error::EdgeOutOfRange {
                edge: e,
                m: self.number_of_edges(),
            })
        }
    }
}

impl GraphFromScratch for WeightedGraph {
    fn try_from_edges<I>(n: NumNodes, edges: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Edge>,
    {
        Self::try_with_max_weight(n, edges, Weight::MAX)
    }
}

impl GraphNodeOrder for WeightedGraph {
    fn number_of_nodes(&self) -> NumNodes {
        self.degrees.len() as NumNodes
    }
}

impl GraphEdgeOrder for WeightedGraph {
    fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }
}

impl AdjacencyList for WeightedGraph {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.incidence[u as usize]
            .iter()
            .map(move |&e| self.edges[e as usize].opposite(u))
    }

    fn number_of_neighbors_of(&self, u: Node) -> NumNodes {
        self.incidence[u as usize].len() as NumNodes
    }
}

impl AdjacencyTest for WeightedGraph {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.edge_between(u, v).is_some()
    }
}

impl IndexedEdges for WeightedGraph {
    fn edge(&self, e: EdgeIdx) -> Edge {
        self.edges[e as usize]
    }

    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    fn edge_between(&self, u: Node, v: Node) -> Option<EdgeIdx> {
        for x in [u, v] {
            self.check_node(x).unwrap_or_else(|err| panic!("{err}"));
        }
        if u == v {
            return None;
        }

        self.adjacency[Edge(u, v).triangular_index()].map(|e| e.get())
    }

    fn incident_edges_of(&self, u: Node) -> &[EdgeIdx] {
        &self.incidence[u as usize]
    }
}

impl EdgeWeights for WeightedGraph {
    fn weight_of(&self, e: EdgeIdx) -> Weight {
        self.weights[e as usize]
    }

    fn degree_of(&self, u: Node) -> Degree {
        self.degrees[u as usize]
    }

    fn weights(&self) -> impl Iterator<Item = Weight> + '_ {
        self.weights.iter().copied()
    }

    fn degrees(&self) -> impl Iterator<Item = Degree> + '_ {
        self.degrees.iter().copied()
    }
}

impl WeightEditing for WeightedGraph {
    fn max_edge_weight(&self) -> Weight {
        self.max_edge_weight
    }

    fn try_adjust_weight(&mut self, e: EdgeIdx, weight: Weight) -> Result<Weight> {
        self.check_edge(e)?;
        if !(1..=self.max_edge_weight).contains(&weight) {
            return Err(Error::InvalidWeight {
                weight,
                max: self.max_edge_weight,
            });
        }

        let old_weight = self.weights[e as usize];
        if old_weight == weight {
            return Ok(old_weight);
        }

        let Edge(u, v) = self.edges[e as usize];

        let mut new_degrees = [0 as Degree; 2];
        for (new_degree, x) in new_degrees.iter_mut().zip([u, v]) {
            *new_degree = (self.degrees[x as usize] - old_weight)
                .checked_add(weight)
                .filter(|&d| d <= DegreeBuckets::DEGREE_LIMIT)
                .ok_or(Error::DegreeOverflow {
                    node: x,
                    max: DegreeBuckets::DEGREE_LIMIT,
                })?;
        }
        self.buckets.try_grow(new_degrees[0].max(new_degrees[1]))?;

        // take both endpoints out before re-inserting either; their old and new degrees may collide
        for x in [u, v] {
            self.buckets.remove(self.degrees[x as usize], x);
        }
        for (x, d) in [u, v].into_iter().zip(new_degrees) {
            self.degrees[x as usize] = d;
        }
        self.weights[e as usize] = weight;
        for x in [u, v] {
            self.buckets.insert(self.degrees[x as usize], x);
        }

        Ok(old_weight)
    }
}

impl DegreeClasses for WeightedGraph {
    fn class_size(&self, degree: Degree) -> NumNodes {
        self.buckets.class_size(degree)
    }
}

impl Irregularity for WeightedGraph {
    fn is_irregular(&self) -> bool {
        self.buckets.is_injective()
    }
}

impl Display for WeightedGraph {
    /// Diagnostic dump of the graph, its weighting and its degree buckets
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} vertices, {} edges: E=[{}]",
            self.number_of_nodes(),
            self.number_of_edges(),
            self.edges.iter().join(", ")
        )?;
        writeln!(f, "weights: [{}]", self.weights.iter().join(", "))?;
        writeln!(f, "degrees: [{}]", self.degrees.iter().join(", "))?;
        if self.is_irregular() {
            writeln!(f, "irregular, s(G)={}", self.max_weight())?;
        } else {
            writeln!(f, "not irregular")?;
        }

        writeln!(f, "inc list:")?;
        for u in self.vertices() {
            writeln!(
                f,
                "  v={u}: {}",
                self.incident_edges_of(u)
                    .iter()
                    .map(|&e| format!("e={e} {}", self.edge(e)))
                    .join(", ")
            )?;
        }

        writeln!(f, "degree map:")?;
        for (d, bucket) in self.buckets.iter() {
            writeln!(f, "  degree: {d}: {bucket}")?;
        }

        writeln!(f, "sorted degree map:")?;
        for (d, bucket) in self
            .buckets
            .iter()
            .sorted_by(|(d1, b1), (d2, b2)| (b2.len(), d2).cmp(&(b1.len(), d1)))
        {
            writeln!(f, "  degree: {d}: {bucket}")?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for WeightedGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedGraph")
            .field("edges", &self.edges)
            .field("weights", &self.weights)
            .field("degrees", &self.degrees)
            .field("max_edge_weight", &self.max_edge_weight)
            .finish()
    }
}
