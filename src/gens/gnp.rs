use rand_distr::{Distribution, Geometric};

use super::*;
use crate::utils::Probability;

/// `G(n,p)` graphs contain every pair of `n` nodes with probability `p` independently of all
/// other pairs. Edges are emitted normalized and in ascending order of their triangular index.
#[derive(Debug, Copy, Clone, Default)]
pub struct Gnp {
    n: NumNodes,
    p: Option<f64>,
}

impl Gnp {
    /// Creates a new empty `G(n,p)` generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `p`
    /// ** Panics if `prob` is not in `[0, 1]` **
    pub fn prob(mut self, prob: f64) -> Self {
        assert!(prob.is_valid_probility(), "{prob} is not a probability");
        self.p = Some(prob);
        self
    }
}

impl NumNodesGen for Gnp {
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }
}

impl GraphGenerator for Gnp {
    fn number_of_nodes(&self) -> NumNodes {
        self.n
    }

    /// Skips over absent pairs with geometrically distributed jumps
    fn stream<R: Rng>(&self, rng: &mut R) -> impl Iterator<Item = Edge> {
        let p = self.p.unwrap_or_else(|| panic!("Probability of Gnp was not set!"));
        let pairs = Edge::number_of_pairs(self.n) as u64;

        // Geometric::new only fails for p outside of [0, 1]; p = 0 never jumps to a pair
        let jumps = Geometric::new(p).ok().filter(|_| p > 0.0);
        let mut next = 0u64;

        std::iter::from_fn(move || {
            let skip = jumps.as_ref()?.sample(rng);
            let index = next.checked_add(skip)?;
            if index >= pairs {
                return None;
            }
            next = index + 1;
            Some(Edge::from_triangular_index(index))
        })
    }
}
