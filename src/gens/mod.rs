/*!
# Graph Generators

Builders for the graphs the irregular weighting search is run on.

- [`Family`] describes deterministic families such as stars, complete graphs, paths, cycles and
  hubs of diamonds,
- [`Gnp`] generates random `G(n,p)` graphs using the builder pattern:

```ignore
let graph: WeightedGraph = Gnp::new().nodes(20).prob(0.3).build(rng);
```
*/

use rand::Rng;

use crate::{error::Result, prelude::*};

mod families;
mod gnp;

pub use families::*;
pub use gnp::*;

/// Trait for generators that allow setting the number of nodes.
pub trait NumNodesGen {
    /// Sets the number of nodes in the graph generator.
    fn nodes(self, n: NumNodes) -> Self;
}

/// General trait for a configurable random edge generator.
pub trait GraphGenerator {
    /// Number of nodes of the generated graphs
    fn number_of_nodes(&self) -> NumNodes;

    /// Creates a lazy iterator over generated edges.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng;

    /// Generates a list of random edges.
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Generates a random graph.
    ///
    /// # Errors
    /// Fails if the generated edges cannot be represented by `G`.
    fn try_build<G, R>(&self, rng: &mut R) -> Result<G>
    where
        G: GraphFromScratch,
        R: Rng,
    {
        G::try_from_edges(self.number_of_nodes(), self.stream(rng))
    }

    /// Generates a random graph.
    /// ** Panics if the generated edges cannot be represented by `G` **
    fn build<G, R>(&self, rng: &mut R) -> G
    where
        G: GraphFromScratch,
        R: Rng,
    {
        self.try_build(rng).unwrap_or_else(|err| panic!("{err}"))
    }
}

/// Shorthands for building graphs from common random models
pub trait RandomGraph: Sized {
    /// Creates a random `G(n,p)` graph using edge probability `p`.
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng;
}

impl<G> RandomGraph for G
where
    G: GraphFromScratch,
{
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng,
    {
        Gnp::new().nodes(n).prob(p).build(rng)
    }
}
