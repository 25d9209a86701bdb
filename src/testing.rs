//! Helpers shared by the unit tests of this crate

use itertools::Itertools;
use rand::Rng;

use crate::prelude::*;

/// Creates a list of at most `m_ub` distinct random edges without loops for nodes `0..n`
pub fn random_simple_edges<R: Rng>(rng: &mut R, n: NumNodes, m_ub: NumEdges) -> Vec<Edge> {
    if n < 2 {
        return Vec::new();
    }

    (0..m_ub)
        .map(|_| {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n - 1);
            Edge(u, if v >= u { v + 1 } else { v }).normalized()
        })
        .unique()
        .collect_vec()
}

/// Recomputes degrees and buckets of `graph` from scratch and compares them to the
/// maintained state
pub fn assert_weighting_consistent(graph: &WeightedGraph) {
    let n = graph.number_of_nodes();
    let mut degrees = vec![0 as Degree; n as usize];
    for (Edge(u, v), w) in graph.weighted_edges() {
        assert!((1..=graph.max_edge_weight()).contains(&w));
        degrees[u as usize] += w;
        degrees[v as usize] += w;
    }
    assert_eq!(graph.degrees().collect_vec(), degrees);

    let buckets = graph.degree_buckets();
    let mut seen = 0;
    for (d, bucket) in buckets.iter() {
        assert!(!bucket.is_empty());
        for u in bucket.iter() {
            assert_eq!(degrees[u as usize], d);
            seen += 1;
        }
    }
    assert_eq!(seen, n);

    let shared = degrees.iter().counts().values().filter(|&&c| c > 1).count();
    assert_eq!(buckets.number_of_shared_degrees() as usize, shared);
    assert_eq!(graph.is_irregular(), shared == 0);
    assert_eq!(buckets.number_of_populated(), degrees.iter().unique().count());

    for u in graph.vertices() {
        assert!(buckets.contains(degrees[u as usize], u));
        for &e in graph.incident_edges_of(u) {
            let Edge(a, b) = graph.edge(e);
            assert!(a == u || b == u);
            assert_eq!(graph.edge_between(a, b), Some(e));
        }
    }
}
