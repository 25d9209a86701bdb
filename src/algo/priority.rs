use std::fmt::Display;

use super::*;

/// Priority key of a node: the size of its degree class, then its weighted degree.
///
/// Nodes of the same class are equally conflicted; larger classes and, among those, larger
/// degrees rank higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexPriority {
    pub class_size: NumNodes,
    pub degree: Degree,
}

/// Score of an edge; the product of two class sizes
pub type Score = u64;

/// An edge together with its score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankedEdge {
    pub score: Score,
    pub index: EdgeIdx,
    pub edge: Edge,
}

/// Snapshot of all edges ranked by descending `(score, index)`.
///
/// The ranking refers to the weighting at the time it was computed and is not updated by later
/// weight changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgePriorities(Vec<RankedEdge>);

impl EdgePriorities {
    /// Returns the highest ranked edge or `None` if there are no edges
    pub fn top(&self) -> Option<&RankedEdge> {
        self.0.first()
    }

    /// Returns the index of the highest ranked edge or `None` if there are no edges
    pub fn first(&self) -> Option<EdgeIdx> {
        self.top().map(|r| r.index)
    }

    /// Iterates over all edges, highest priority first
    pub fn iter(&self) -> std::slice::Iter<'_, RankedEdge> {
        self.0.iter()
    }

    /// Iterates over all edge indices, highest priority first
    pub fn indices(&self) -> impl Iterator<Item = EdgeIdx> + '_ {
        self.0.iter().map(|r| r.index)
    }

    /// Number of ranked edges
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns *true* if the graph has no edges
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All ranked edges, highest priority first
    pub fn as_slice(&self) -> &[RankedEdge] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a EdgePriorities {
    type Item = &'a RankedEdge;
    type IntoIter = std::slice::Iter<'a, RankedEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for EdgePriorities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in &self.0 {
            writeln!(f, "{} : {} : {}", r.index, r.edge, r.score)?;
        }
        Ok(())
    }
}

/// Ranks nodes and edges by how much they contribute to degree collisions
pub trait EdgePrioritization: DegreeClasses {
    /// Returns the priority key of every node, indexed by node
    fn vertex_priorities(&self) -> Vec<VertexPriority> {
        self.vertices()
            .map(|u| VertexPriority {
                class_size: self.class_size_of(u),
                degree: self.degree_of(u),
            })
            .collect()
    }

    /// Returns all nodes sorted by descending priority; ties are broken by descending node
    fn ranked_vertices(&self) -> Vec<(Node, VertexPriority)> {
        let mut ranked: Vec<_> = self.vertex_priorities().into_iter().zip(self.vertices()).collect();
        ranked.sort_unstable_by(|a, b| b.cmp(a));
        ranked.into_iter().map(|(p, u)| (u, p)).collect()
    }

    /// Scores every edge and sorts them by descending `(score, index)`.
    ///
    /// An edge whose endpoints have the same weighted degree scores `0`; any other edge scores
    /// the product of its endpoints' class sizes.
    fn compute_edge_priorities(&self) -> EdgePriorities;

    /// Returns the index of the highest ranked edge or `None` if there are no edges
    fn top_priority_edge(&self) -> Option<EdgeIdx> {
        self.compute_edge_priorities().first()
    }
}

impl<G> EdgePrioritization for G
where
    G: DegreeClasses,
{
    fn compute_edge_priorities(&self) -> EdgePriorities {
        let mut ranked: Vec<RankedEdge> = self
            .edges()
            .enumerate()
            .map(|(i, edge)| {
                let Edge(u, v) = edge;
                let score = if self.degree_of(u) == self.degree_of(v) {
                    0
                } else {
                    self.class_size_of(u) as Score * self.class_size_of(v) as Score
                };

                RankedEdge {
                    score,
                    index: i as EdgeIdx,
                    edge,
                }
            })
            .collect();

        // indices are unique, so the edge never decides the order
        ranked.sort_unstable_by(|a, b| b.cmp(a));

        EdgePriorities(ranked)
    }
}
