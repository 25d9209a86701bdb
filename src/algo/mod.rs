/*!
# Algorithms

Algorithms operating on weighted graphs. All of them are re-exported at the top level of this
module, so you can simply do:
```rust
use irregraphs::algo::*;
```
and gain access to edge prioritization and the irregular weighting search.
*/

mod priority;
mod search;

use crate::prelude::*;

pub use priority::*;
pub use search::*;
