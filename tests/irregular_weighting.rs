use irregraphs::{algo::*, gens::*, io::*, prelude::*};
use itertools::Itertools;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

#[test]
fn k4_priorities_after_reweighting() {
    let mut graph = WeightedGraph::from_edges(4, Family::Complete(4).edges());
    assert_eq!(graph.edges().collect_vec(), Family::Complete(4).edges());

    let e = graph.edge_between(0, 1).unwrap();
    assert_eq!(graph.adjust_weight(e, 6), 1);
    assert_eq!(graph.degrees().collect_vec(), vec![8, 8, 3, 3]);
    assert!(!graph.is_irregular());

    let priorities = graph.compute_edge_priorities();
    for r in &priorities {
        let Edge(u, v) = r.edge;
        if graph.degree_of(u) == graph.degree_of(v) {
            assert_eq!(r.score, 0);
        } else {
            assert_eq!(r.score, 4);
        }
    }
    assert_eq!(priorities.top().map(|r| r.score), Some(4));
}

#[test]
fn star_strength_matches_number_of_leaves() {
    let graph: WeightedGraph = Family::Star(6).build();
    let rng = &mut Pcg64Mcg::seed_from_u64(7);

    let report = IrregularWeightSearch::new()
        .max_iterations(1000)
        .run(&graph, 5, rng)
        .unwrap();

    // five leaves need five distinct weights and the cap is |V| - 1 = 5
    assert_eq!(report.best_strength(), Some(5));
    let best = report.best.unwrap();
    assert_eq!(
        best.weights().sorted().collect_vec(),
        (1..=5).collect_vec()
    );
}

#[test]
fn search_on_hub_of_diamonds() {
    let graph: WeightedGraph = Family::HubOfDiamonds(4).build();
    assert_eq!(graph.number_of_nodes(), 17);
    assert_eq!(graph.number_of_edges(), 28);

    let rng = &mut Pcg64Mcg::seed_from_u64(1);
    let report = IrregularWeightSearch::new()
        .max_iterations(2000)
        .run(&graph, 20, rng)
        .unwrap();

    assert_eq!(report.outcomes.len(), 20);
    assert!(report.number_of_successes() > 0);

    let best = report.best.as_ref().unwrap();
    assert!(best.is_irregular());
    assert_eq!(best.degrees().unique().count(), 17);
    assert_eq!(Some(best.max_weight()), report.best_strength());

    // the best weighting survives a round trip through the EdgeList-Format
    let mut buffer = Vec::new();
    best.try_write_edge_list(&mut buffer).unwrap();
    let read = WeightedGraph::try_read_edge_list(buffer.as_slice()).unwrap();
    assert!(read.is_irregular());
    assert_eq!(read.degrees().collect_vec(), best.degrees().collect_vec());
}
