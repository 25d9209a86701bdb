/*!
# Utilities

Provides the [`Set`] abstraction and its constant-time implementation [`IndexedSet`], which
backs the degree buckets of [`WeightedGraph`](crate::repr::WeightedGraph).

Apart from `Set` and `IndexedSet`, you probably do not need to interact with this module directly.
*/

use num::{One, Zero};

use crate::error::{Error, Result};

pub mod set;

pub use set::*;

/// Creates a vector of `len` copies of `value`, reporting a failed allocation as an error
/// instead of aborting.
pub(crate) fn try_filled_vec<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(len).map_err(|_| Error::OutOfMemory {
        entries: len as u64,
    })?;
    vec.resize(len, value);
    Ok(vec)
}

/// Helper trait for probalities
pub trait Probability {
    /// Returns *true* if the probality is valid (ie. between `0` and `1`)
    fn is_valid_probility(&self) -> bool;
}

impl<P> Probability for P
where
    P: Zero + One + PartialOrd,
{
    fn is_valid_probility(&self) -> bool {
        Self::zero().le(self) && Self::one().ge(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn probabilities() {
        assert!(0.0f64.is_valid_probility());
        assert!(0.5f64.is_valid_probility());
        assert!(1.0f64.is_valid_probility());
        assert!(!(-0.1f64).is_valid_probility());
        assert!(!1.5f64.is_valid_probility());
    }

    #[test]
    fn filled_vectors() {
        assert_eq!(try_filled_vec(3, 7u8).unwrap(), vec![7, 7, 7]);
        assert!(try_filled_vec(0, 7u8).unwrap().is_empty());
        assert_eq!(
            try_filled_vec(usize::MAX / 2, 0u32).unwrap_err(),
            Error::OutOfMemory {
                entries: (usize::MAX / 2) as u64
            }
        );
    }
}
