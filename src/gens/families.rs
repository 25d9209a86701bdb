use itertools::Itertools;

use super::*;

/// Deterministic graph families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Node `0` connected to each of the nodes `1..n`
    Star(NumNodes),
    /// All pairs of `n` nodes
    Complete(NumNodes),
    /// The path `0 - 1 - ... - (n-1)`
    Path(NumNodes),
    /// The path closed into a cycle; equal to the path for fewer than three nodes
    Cycle(NumNodes),
    /// `k` copies of a four-cycle `a - x - b - y` with chord `{a,b}`, where `a` and `b` of every
    /// copy are connected to a common hub `0`. This has `4k + 1` nodes and `7k` edges.
    HubOfDiamonds(NumNodes),
}

impl Family {
    /// Number of nodes of the graph
    pub fn number_of_nodes(&self) -> NumNodes {
        match *self {
            Self::Star(n) | Self::Complete(n) | Self::Path(n) | Self::Cycle(n) => n,
            Self::HubOfDiamonds(k) => 4 * k + 1,
        }
    }

    /// Edges of the graph in a fixed order
    pub fn edges(&self) -> Vec<Edge> {
        match *self {
            Self::Star(n) => (1..n).map(|v| Edge(0, v)).collect(),
            Self::Complete(n) => (0..n).tuple_combinations().map(|(u, v)| Edge(u, v)).collect(),
            Self::Path(n) => (0..n).tuple_windows().map(|(u, v)| Edge(u, v)).collect(),
            Self::Cycle(n) => {
                let mut edges = Self::Path(n).edges();
                if n > 2 {
                    edges.push(Edge(n - 1, 0));
                }
                edges
            }
            Self::HubOfDiamonds(k) => (0..k)
                .flat_map(|i| {
                    let [a, x, y, b] = [1, 2, 3, 4].map(|o| 4 * i + o);
                    [(a, x), (a, y), (a, b), (x, b), (y, b), (0, a), (0, b)]
                })
                .map(|(u, v)| Edge(u, v))
                .collect(),
        }
    }

    /// Creates the graph.
    ///
    /// # Errors
    /// Fails if the graph cannot be represented by `G`.
    pub fn try_build<G: GraphFromScratch>(&self) -> Result<G> {
        G::try_from_edges(self.number_of_nodes(), self.edges())
    }

    /// Creates the graph.
    /// ** Panics if the graph cannot be represented by `G` **
    pub fn build<G: GraphFromScratch>(&self) -> G {
        self.try_build().unwrap_or_else(|err| panic!("{err}"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sizes() {
        for n in 0..8 {
            let edges = |f: Family| f.edges().len() as NumNodes;
            assert_eq!(edges(Family::Star(n)), n.saturating_sub(1));
            assert_eq!(edges(Family::Complete(n)), n * n.saturating_sub(1) / 2);
            assert_eq!(edges(Family::Path(n)), n.saturating_sub(1));
            assert_eq!(
                edges(Family::Cycle(n)),
                if n > 2 { n } else { n.saturating_sub(1) }
            );
        }

        let diamonds = Family::HubOfDiamonds(4);
        assert_eq!(diamonds.number_of_nodes(), 17);
        assert_eq!(diamonds.edges().len(), 28);
    }

    #[test]
    fn hub_of_diamonds_layout() {
        let edges = Family::HubOfDiamonds(2).edges();
        assert_eq!(
            edges,
            vec![
                Edge(1, 2),
                Edge(1, 3),
                Edge(1, 4),
                Edge(2, 4),
                Edge(3, 4),
                Edge(0, 1),
                Edge(0, 4),
                Edge(5, 6),
                Edge(5, 7),
                Edge(5, 8),
                Edge(6, 8),
                Edge(7, 8),
                Edge(0, 5),
                Edge(0, 8),
            ]
        );

        let graph: WeightedGraph = Family::HubOfDiamonds(4).build();
        assert_eq!(graph.degree_of(0), 8);
        assert_eq!(
            graph.degrees().sorted().collect_vec(),
            [vec![2; 8], vec![4; 8], vec![8]].concat()
        );
    }

    #[test]
    fn build_all_families() {
        for family in [
            Family::Star(21),
            Family::Complete(6),
            Family::Path(5),
            Family::Cycle(7),
            Family::HubOfDiamonds(3),
        ] {
            let graph: WeightedGraph = family.build();
            assert_eq!(graph.number_of_nodes(), family.number_of_nodes());
            assert_eq!(graph.edges().collect_vec(), family.edges());
        }

        let cycle: WeightedGraph = Family::Cycle(5).build();
        assert!(cycle.degrees().all(|d| d == 2));
    }
}
