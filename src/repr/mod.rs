/*!
# Graph Representations

[`WeightedGraph`] stores a fixed simple graph together with a mutable edge weighting and keeps
the weighted degrees of all nodes partitioned into [`DegreeBuckets`].
*/

use crate::{ops::*, *};

mod buckets;
mod weighted;

pub use buckets::*;
pub use weighted::*;
