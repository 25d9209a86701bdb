/*!
# Irregular Weighting Search

A randomized local search for irregular edge weightings. Each trial starts from the given
weighting and repeatedly redraws the weight of the top-priority edge (see
[`EdgePrioritization`]) until no two nodes share a weighted degree or the iteration limit is hit.

```ignore
let graph = WeightedGraph::from_edges(3, [(0, 1), (1, 2)]);
let report = IrregularWeightSearch::new()
    .max_iterations(50)
    .run(&graph, 10, &mut Pcg64Mcg::seed_from_u64(1))?;
assert_eq!(report.best_strength(), Some(2));
```
*/

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use tracing::{debug, info, instrument};

use super::*;
use crate::error::{Error, Result};

/// Configuration of the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrregularWeightSearch {
    max_iterations: usize,
    max_weight: Weight,
    tighten_on_success: bool,
}

impl Default for IrregularWeightSearch {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            max_weight: 0,
            tighten_on_success: true,
        }
    }
}

/// Result of a single trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialOutcome {
    /// The weighting became irregular with largest weight `strength` after `iterations`
    /// weight changes
    Irregular { strength: Weight, iterations: usize },
    /// No irregular weighting was found within `iterations` weight changes
    Aborted { iterations: usize },
}

impl TrialOutcome {
    /// Returns the strength if the trial succeeded
    pub fn strength(&self) -> Option<Weight> {
        match *self {
            Self::Irregular { strength, .. } => Some(strength),
            Self::Aborted { .. } => None,
        }
    }

    /// Number of weight changes made during the trial
    pub fn iterations(&self) -> usize {
        match *self {
            Self::Irregular { iterations, .. } | Self::Aborted { iterations } => iterations,
        }
    }

    /// Returns *true* if the trial ended with an irregular weighting
    pub fn is_irregular(&self) -> bool {
        matches!(self, Self::Irregular { .. })
    }
}

/// Outcomes of all trials together with the best weighting found
#[derive(Debug, Clone)]
pub struct SearchReport<G> {
    pub outcomes: Vec<TrialOutcome>,
    /// Irregular graph of smallest strength; the earliest trial wins ties
    pub best: Option<G>,
}

impl<G> SearchReport<G> {
    /// Number of trials that found an irregular weighting
    pub fn number_of_successes(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_irregular()).count()
    }

    /// Smallest strength found in any trial
    pub fn best_strength(&self) -> Option<Weight> {
        self.outcomes.iter().filter_map(TrialOutcome::strength).min()
    }
}

impl IrregularWeightSearch {
    /// Creates a search with default parameters: 100 iterations per trial, weights capped by
    /// the upper bound on the irregularity strength and tightening of the cap after each success
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of weight changes after which a trial is aborted
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Largest weight drawn during the first trial; `0` stands for the upper bound `n - 1`
    pub fn max_weight(mut self, max_weight: Weight) -> Self {
        self.max_weight = max_weight;
        self
    }

    /// If *true*, the cap is lowered to the strength of every successful trial
    pub fn tighten_on_success(mut self, tighten: bool) -> Self {
        self.tighten_on_success = tighten;
        self
    }

    /// Computes the weight cap for the first trial on `graph`.
    ///
    /// # Errors
    /// Fails if no iterations are allowed or the configured cap exceeds the largest weight
    /// `graph` accepts.
    pub fn initial_cap<G>(&self, graph: &G) -> Result<Weight>
    where
        G: WeightEditing + Irregularity,
    {
        if self.max_iterations == 0 {
            return Err(Error::InvalidSearchConfig(
                "at least one iteration per trial is required".into(),
            ));
        }

        let cap = if self.max_weight == 0 {
            graph.irregularity_strength_upper_bound()
        } else {
            self.max_weight
        };

        if cap > graph.max_edge_weight() {
            return Err(Error::InvalidSearchConfig(format!(
                "weight cap {cap} exceeds the largest admissible weight {}",
                graph.max_edge_weight()
            )));
        }

        Ok(cap)
    }

    /// Runs a single trial on `graph` drawing weights from `1..=cap`.
    ///
    /// The graph is modified in place and holds the final weighting afterwards.
    /// ** Panics if `cap > graph.max_edge_weight()` or a weighted degree overflows **
    pub fn run_trial<G, R>(&self, graph: &mut G, cap: Weight, rng: &mut R) -> TrialOutcome
    where
        G: WeightEditing + Irregularity + EdgePrioritization,
        R: Rng,
    {
        for iteration in 0..=self.max_iterations {
            if graph.is_irregular() {
                return TrialOutcome::Irregular {
                    strength: graph.max_weight(),
                    iterations: iteration,
                };
            }

            if iteration == self.max_iterations {
                break;
            }

            let Some(e) = graph.top_priority_edge() else {
                break;
            };
            let Some(weight) = draw_other_weight(rng, cap, graph.weight_of(e)) else {
                debug!(edge = e, cap, "no alternative weight");
                break;
            };

            debug!(iteration, edge = e, weight, "adjust");
            graph.adjust_weight(e, weight);
        }

        TrialOutcome::Aborted {
            iterations: self.max_iterations,
        }
    }

    /// Runs `trials` independent trials, each on a fresh copy of `graph`.
    ///
    /// # Errors
    /// Fails if the configuration is invalid for `graph`, see [`Self::initial_cap`].
    #[instrument(skip(self, graph, rng))]
    pub fn run<G, R>(&self, graph: &G, trials: usize, rng: &mut R) -> Result<SearchReport<G>>
    where
        G: WeightEditing + Irregularity + EdgePrioritization + Clone,
        R: Rng,
    {
        let mut cap = self.initial_cap(graph)?;
        let mut report = SearchReport {
            outcomes: Vec::with_capacity(trials),
            best: None,
        };
        let mut best_strength = Weight::MAX;

        for trial in 0..trials {
            let mut candidate = graph.clone();
            let outcome = self.run_trial(&mut candidate, cap, rng);

            match outcome {
                TrialOutcome::Irregular {
                    strength,
                    iterations,
                } => {
                    info!(trial, iterations, strength, "irregular");
                    if strength < best_strength {
                        best_strength = strength;
                        report.best = Some(candidate);
                    }
                    if self.tighten_on_success && strength > 0 {
                        cap = strength;
                    }
                }
                TrialOutcome::Aborted { iterations } => {
                    info!(trial, iterations, cap, "aborted");
                }
            }

            report.outcomes.push(outcome);
        }

        Ok(report)
    }
}

/// Draws a weight from `1..=cap` uniformly among those different from `current`.
/// Returns `None` if no such weight exists.
fn draw_other_weight<R: Rng>(rng: &mut R, cap: Weight, current: Weight) -> Option<Weight> {
    if !(1..=cap).contains(&current) {
        return Uniform::new_inclusive(1, cap).ok().map(|d| d.sample(rng));
    }

    let weight = Uniform::new_inclusive(1, cap.checked_sub(1)?).ok()?.sample(rng);
    Some(if weight >= current { weight + 1 } else { weight })
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::testing::*;

    #[test]
    fn draws_differ_from_current() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);

        for cap in 2..8 {
            for current in 1..=cap {
                let mut seen = vec![false; cap as usize + 1];
                for _ in 0..500 {
                    let w = draw_other_weight(rng, cap, current).unwrap();
                    assert!((1..=cap).contains(&w));
                    assert_ne!(w, current);
                    seen[w as usize] = true;
                }
                assert_eq!(
                    seen.iter().filter(|&&s| s).count(),
                    cap as usize - 1,
                    "every other weight should be drawn"
                );
            }
        }

        assert_eq!(draw_other_weight(rng, 1, 1), None);
        assert_eq!(draw_other_weight(rng, 0, 1), None);
        assert_eq!(draw_other_weight(rng, 1, 3), Some(1));
    }

    #[test]
    fn path_is_solved() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);
        let mut graph = WeightedGraph::from_edges(3, [(0, 1), (1, 2)]);

        let search = IrregularWeightSearch::new();
        let cap = search.initial_cap(&graph).unwrap();
        assert_eq!(cap, 2);

        let outcome = search.run_trial(&mut graph, cap, rng);
        assert_eq!(outcome.strength(), Some(2));
        assert!(outcome.iterations() >= 1);
        assert!(graph.is_irregular());
        assert_weighting_consistent(&graph);
    }

    #[test]
    fn irregular_start_needs_no_iterations() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);
        let mut graph =
            WeightedGraph::try_with_weights(3, [(Edge(0, 1), 1), (Edge(1, 2), 2)], 3).unwrap();

        let outcome = IrregularWeightSearch::new().run_trial(&mut graph, 2, rng);
        assert_eq!(
            outcome,
            TrialOutcome::Irregular {
                strength: 2,
                iterations: 0
            }
        );
    }

    #[test]
    fn aborts_without_alternative_weights() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);
        let mut graph = WeightedGraph::from_edges(3, [(0, 1), (1, 2)]);

        let search = IrregularWeightSearch::new().max_iterations(7);
        assert_eq!(
            search.run_trial(&mut graph, 1, rng),
            TrialOutcome::Aborted { iterations: 7 }
        );
        assert_eq!(graph.weights().collect_vec(), vec![1, 1]);
    }

    #[test]
    fn aborts_after_max_iterations() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);
        // K4 has irregularity strength 3, so weights up to 2 never suffice
        let mut graph =
            WeightedGraph::from_edges(4, [(0, 1), (1, 2), (0, 2), (2, 3), (0, 3), (1, 3)]);

        let outcome = IrregularWeightSearch::new()
            .max_iterations(25)
            .run_trial(&mut graph, 2, rng);
        assert_eq!(outcome, TrialOutcome::Aborted { iterations: 25 });
        assert!(graph.weights().all(|w| (1..=2).contains(&w)));
        assert_weighting_consistent(&graph);
    }

    #[test]
    fn run_keeps_best_and_tightens() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);
        let n = 8;
        let graph = WeightedGraph::from_edges(n, (1..n).map(|i| (0, i)));

        let report = IrregularWeightSearch::new()
            .max_iterations(400)
            .run(&graph, 10, rng)
            .unwrap();

        assert_eq!(report.outcomes.len(), 10);
        assert!(report.number_of_successes() > 0);

        // the leaves of a star need pairwise distinct weights
        let best = report.best.as_ref().unwrap();
        assert!(best.is_irregular());
        assert_eq!(Some(best.max_weight()), report.best_strength());
        assert!(best.max_weight() >= n - 1);
        assert_weighting_consistent(best);

        // the cap never grows, so later successes are never weaker than earlier ones
        let strengths = report
            .outcomes
            .iter()
            .filter_map(TrialOutcome::strength)
            .collect_vec();
        assert!(strengths.iter().tuple_windows().all(|(a, b)| a >= b));

        // the input is left untouched
        assert!(graph.weights().all(|w| w == 1));
    }

    #[test]
    fn invalid_configurations() {
        let graph = WeightedGraph::try_with_max_weight(4, [(0, 1), (1, 2)], 4).unwrap();
        let rng = &mut Pcg64Mcg::seed_from_u64(0);

        assert!(matches!(
            IrregularWeightSearch::new().max_iterations(0).run(&graph, 1, rng),
            Err(Error::InvalidSearchConfig(_))
        ));
        assert!(matches!(
            IrregularWeightSearch::new().max_weight(5).run(&graph, 1, rng),
            Err(Error::InvalidSearchConfig(_))
        ));
        assert_eq!(
            IrregularWeightSearch::new().max_weight(4).initial_cap(&graph),
            Ok(4)
        );

        let unlimited = WeightedGraph::from_edges(4, [(0, 1), (1, 2)]);
        assert_eq!(
            IrregularWeightSearch::new().max_weight(5).initial_cap(&unlimited),
            Ok(5)
        );
        assert_eq!(IrregularWeightSearch::new().initial_cap(&unlimited), Ok(3));
    }
}
