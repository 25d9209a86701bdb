/*!
# Generalized Sets

This module provides abstractions over `Set` data structures, allowing algorithms
to choose the most efficient implementation based on context.

Examples:
- Sparse sets -> `HashSet`
- Dense sets over a bounded universe `0..N` -> [`IndexedSet`]

The module includes:
- [`Set<T>`]: trait for generic set-like operations
- [`IndexedSet<T>`]: a set of small unsigned integers with O(1) insertion, removal, membership
  test, positional access and uniform random selection
- [`Ordered`] / [`OrderedCursor`]: ascending enumeration of an [`IndexedSet`]
*/

use std::{
    collections::HashSet,
    fmt::{Debug, Display},
    hash::{BuildHasher, Hash},
    iter::{Cloned, Copied, FusedIterator},
};

use num::{FromPrimitive, PrimInt, Unsigned};
use rand::Rng;

use crate::error::{Error, Result};

/// Minimalist trait for a set-like collection.
///
/// Supports insertion, removal, membership queries, iteration, and bulk operations.
pub trait Set<T> {
    /// Inserts `value` into the set.
    /// Returns `true` if the element was not present before.
    fn insert(&mut self, value: T) -> bool;

    /// Inserts multiple elements from an iterator.
    fn insert_multiple<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }

    /// Removes `value` from the set.
    /// Returns `true` if the element was present.
    fn remove(&mut self, value: &T) -> bool;

    /// Removes multiple elements from the set.
    fn remove_multiple<'a, I>(&mut self, iter: I)
    where
        T: 'a,
        I: IntoIterator<Item = &'a T> + 'a,
    {
        for value in iter {
            self.remove(value);
        }
    }

    /// Iterator over elements in set.
    ///
    /// Returned by [`Set::iter`].
    type SetIter<'a>: Iterator<Item = T>
    where
        Self: 'a,
        T: Clone;

    /// Returns an iterator over all elements in the set.
    /// May clone elements depending on the underlying data structure.
    fn iter(&self) -> Self::SetIter<'_>
    where
        T: Clone;

    /// Returns `true` if the set contains `value`.
    fn contains(&self, value: &T) -> bool;

    /// Clears all elements from the set.
    fn clear(&mut self);

    /// Returns the number of elements in the set.
    fn len(&self) -> usize;

    /// Returns `true` if the set is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, S> Set<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, value: T) -> bool {
        HashSet::insert(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        HashSet::remove(self, value)
    }

    type SetIter<'a>
        = Cloned<std::collections::hash_set::Iter<'a, T>>
    where
        Self: 'a,
        T: Clone;

    fn iter(&self) -> Self::SetIter<'_>
    where
        T: Clone,
    {
        HashSet::iter(self).cloned()
    }

    fn contains(&self, value: &T) -> bool {
        HashSet::contains(self, value)
    }

    fn clear(&mut self) {
        HashSet::clear(self);
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

/// Unsigned integer types usable as elements of an [`IndexedSet`].
///
/// The maximum value of the type is reserved as the *absent*-marker.
pub trait SetElement: PrimInt + Unsigned + FromPrimitive + Debug + Display {}

impl<T> SetElement for T where T: PrimInt + Unsigned + FromPrimitive + Debug + Display {}

/// A set of unsigned integers from the universe `0..N` (`N` = capacity).
///
/// Two parallel arrays of length `N` are kept:
/// - `elements[0..len]` holds the members in no particular order,
/// - `positions[e]` is the index of `e` in `elements` or `T::MAX` if `e` is absent.
///
/// This gives O(1) `insert`, `remove`, `contains`, positional access and uniform selection
/// at the cost of `2N` words of memory. Choose the smallest `T` that holds `N`.
#[derive(Clone)]
pub struct IndexedSet<T> {
    elements: Vec<T>,
    positions: Vec<T>,
    len: usize,
}

impl<T: SetElement> IndexedSet<T> {
    /// The reserved position value marking an absent element
    #[inline]
    pub fn sentinel() -> T {
        T::max_value()
    }

    /// Creates an empty set over the universe `0..capacity`.
    ///
    /// # Errors
    /// Fails if `capacity` is not strictly less than `T::MAX`.
    pub fn try_new(capacity: usize) -> Result<Self> {
        let sentinel = Self::sentinel();
        if T::from_usize(capacity).is_none_or(|c| c >= sentinel) {
            return Err(Error::CapacityTooLarge {
                capacity: capacity as u64,
                sentinel: sentinel.to_u64().unwrap_or(u64::MAX),
            });
        }

        Ok(Self {
            elements: super::try_filled_vec(capacity, T::zero())?,
            positions: super::try_filled_vec(capacity, sentinel)?,
            len: 0,
        })
    }

    /// Creates an empty set over the universe `0..capacity`.
    /// ** Panics if `capacity >= T::MAX` **
    pub fn new(capacity: usize) -> Self {
        Self::try_new(capacity).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Creates a set over the universe `0..capacity` containing every element.
    /// Elements are stored in increasing order.
    /// ** Panics if `capacity >= T::MAX` **
    pub fn new_with_all(capacity: usize) -> Self {
        let mut set = Self::new(capacity);
        for i in 0..capacity {
            set.elements[i] = encode(i);
            set.positions[i] = encode(i);
        }
        set.len = capacity;
        set
    }

    /// Size of the universe `0..capacity`
    #[inline]
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Number of members
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns *true* if there are no members
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maps an element to its slot in `positions` or fails if it is outside of the universe
    fn slot(&self, element: T) -> Result<usize> {
        element
            .to_usize()
            .filter(|&i| i < self.capacity())
            .ok_or(Error::ElementOutOfRange {
                element: element.to_u64().unwrap_or(u64::MAX),
                capacity: self.capacity() as u64,
            })
    }

    /// Inserts `element` and returns *true* if it was not present before.
    ///
    /// # Errors
    /// Fails without modifying the set if `element >= capacity`.
    pub fn try_insert(&mut self, element: T) -> Result<bool> {
        let slot = self.slot(element)?;
        if self.positions[slot] != Self::sentinel() {
            return Ok(false);
        }

        self.positions[slot] = encode(self.len);
        self.elements[self.len] = element;
        self.len += 1;

        Ok(true)
    }

    /// Removes `element` and returns *true* if it was present.
    ///
    /// The last member of the unordered view is moved into the freed position.
    ///
    /// # Errors
    /// Fails without modifying the set if `element >= capacity`.
    pub fn try_remove(&mut self, element: T) -> Result<bool> {
        let slot = self.slot(element)?;
        let pos = self.positions[slot];
        if pos == Self::sentinel() {
            return Ok(false);
        }

        self.len -= 1;
        let last = self.elements[self.len];
        self.positions[decode(last)] = pos;
        self.elements[decode(pos)] = last;
        // must come last: `last` and `element` coincide if the removed member was the last one
        self.positions[slot] = Self::sentinel();

        Ok(true)
    }

    /// Returns *true* if `element` is a member.
    /// ** Panics if `element >= capacity` **
    #[inline]
    pub fn contains(&self, element: T) -> bool {
        let slot = self.slot(element).unwrap_or_else(|e| panic!("{e}"));
        self.positions[slot] != Self::sentinel()
    }

    /// Returns the `i`-th member of the unordered view.
    /// ** Panics if `i >= len` **
    #[inline]
    pub fn at(&self, i: usize) -> T {
        assert!(i < self.len, "index {i} is out of bounds for {} members", self.len);
        self.elements[i]
    }

    /// Returns the `i`-th member of the unordered view or `None` if `i >= len`
    #[inline]
    pub fn get(&self, i: usize) -> Option<T> {
        (i < self.len).then(|| self.elements[i])
    }

    /// Unordered view of all members
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elements[..self.len]
    }

    /// Iterator over all members in unspecified order
    #[inline]
    pub fn iter(&self) -> Copied<std::slice::Iter<'_, T>> {
        self.as_slice().iter().copied()
    }

    /// Selects the member at position `floor(p * len)` of the unordered view.
    /// For `p` drawn uniformly from `[0, 1)` this is a uniform sample of the members.
    /// Returns `None` if the set is empty.
    pub fn uniform_select(&self, p: f64) -> Option<T> {
        debug_assert!((0.0..1.0).contains(&p));
        if self.is_empty() {
            return None;
        }

        let index = ((p * self.len as f64) as usize).min(self.len - 1);
        Some(self.elements[index])
    }

    /// Draws a uniform random member or returns `None` if the set is empty
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<T> {
        (!self.is_empty()).then(|| self.elements[rng.random_range(0..self.len)])
    }

    /// Iterator over all members in ascending order.
    ///
    /// Scans the whole universe, ie. takes O(capacity) time regardless of the number of members.
    pub fn ordered(&self) -> Ordered<'_, T> {
        Ordered {
            positions: &self.positions,
            front: 0,
            back: self.capacity(),
            remaining: self.len,
        }
    }

    /// Cursor positioned at the smallest member (or past the end if the set is empty)
    pub fn ordered_cursor(&self) -> OrderedCursor<'_, T> {
        OrderedCursor::new(self)
    }

    /// Removes all members in O(len)
    pub fn clear(&mut self) {
        for i in 0..self.len {
            let element = self.elements[i];
            self.positions[decode(element)] = Self::sentinel();
        }
        self.len = 0;
    }

    /// Returns *true* if `positions[i]` marks a member
    #[inline]
    fn is_member_slot(&self, i: usize) -> bool {
        self.positions[i] != Self::sentinel()
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert!(self.len <= self.capacity());
        for (i, &e) in self.as_slice().iter().enumerate() {
            assert_eq!(decode(self.positions[decode(e)]), i);
        }
        for (e, &pos) in self.positions.iter().enumerate() {
            if pos != Self::sentinel() {
                assert!(decode(pos) < self.len);
                assert_eq!(decode(self.elements[decode(pos)]), e);
            }
        }
    }
}

/// Converts a position/element known to be below the capacity into `T`
#[inline]
fn encode<T: SetElement>(i: usize) -> T {
    T::from_usize(i).unwrap_or_else(|| unreachable!("{i} exceeds the capacity"))
}

/// Converts a stored position/element back into an index
#[inline]
fn decode<T: SetElement>(x: T) -> usize {
    x.to_usize()
        .unwrap_or_else(|| unreachable!("{x} exceeds the capacity"))
}

impl<T: SetElement> Set<T> for IndexedSet<T> {
    fn insert(&mut self, value: T) -> bool {
        self.try_insert(value).unwrap_or_else(|e| panic!("{e}"))
    }

    fn remove(&mut self, value: &T) -> bool {
        self.try_remove(*value).unwrap_or_else(|e| panic!("{e}"))
    }

    type SetIter<'a>
        = Copied<std::slice::Iter<'a, T>>
    where
        Self: 'a,
        T: Clone;

    fn iter(&self) -> Self::SetIter<'_> {
        IndexedSet::iter(self)
    }

    fn contains(&self, value: &T) -> bool {
        IndexedSet::contains(self, *value)
    }

    fn clear(&mut self) {
        IndexedSet::clear(self);
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<T: SetElement> Debug for IndexedSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: SetElement> Display for IndexedSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, e) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        write!(f, "}}")
    }
}

/// Ascending iterator over the members of an [`IndexedSet`].
///
/// Returned by [`IndexedSet::ordered`].
#[derive(Debug, Clone)]
pub struct Ordered<'a, T> {
    positions: &'a [T],
    front: usize,
    back: usize,
    remaining: usize,
}

impl<T: SetElement> Iterator for Ordered<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while self.front < self.back {
            let i = self.front;
            self.front += 1;
            if self.positions[i] != T::max_value() {
                self.remaining -= 1;
                return Some(encode(i));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: SetElement> DoubleEndedIterator for Ordered<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while self.front < self.back {
            self.back -= 1;
            if self.positions[self.back] != T::max_value() {
                self.remaining -= 1;
                return Some(encode(self.back));
            }
        }
        None
    }
}

impl<T: SetElement> ExactSizeIterator for Ordered<'_, T> {}

impl<T: SetElement> FusedIterator for Ordered<'_, T> {}

/// A movable position within the ascending enumeration of an [`IndexedSet`].
///
/// A default-constructed cursor has no backing set; reading from it (or from a cursor moved
/// past the largest member) fails with [`Error::IteratorNotDereferenceable`].
pub struct OrderedCursor<'a, T> {
    set: Option<&'a IndexedSet<T>>,
    pos: usize,
}

impl<T> Default for OrderedCursor<'_, T> {
    fn default() -> Self {
        Self { set: None, pos: 0 }
    }
}

impl<T> Clone for OrderedCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for OrderedCursor<'_, T> {}

impl<T: SetElement> Debug for OrderedCursor<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedCursor")
            .field("pos", &self.pos)
            .field("value", &self.get().ok())
            .finish()
    }
}

impl<'a, T: SetElement> OrderedCursor<'a, T> {
    /// Creates a cursor positioned at the smallest member of `set`
    pub fn new(set: &'a IndexedSet<T>) -> Self {
        let pos = (0..set.capacity())
            .find(|&i| set.is_member_slot(i))
            .unwrap_or(set.capacity());
        Self {
            set: Some(set),
            pos,
        }
    }

    /// Returns the member the cursor points to.
    ///
    /// # Errors
    /// Fails if the cursor has no backing set or is past the largest member.
    pub fn get(&self) -> Result<T> {
        match self.set {
            Some(set) if self.pos < set.capacity() && set.is_member_slot(self.pos) => {
                Ok(encode(self.pos))
            }
            _ => Err(Error::IteratorNotDereferenceable),
        }
    }

    /// Returns *true* if the cursor is past the largest member (or detached)
    pub fn is_end(&self) -> bool {
        self.set.is_none_or(|set| self.pos >= set.capacity())
    }

    /// Advances to the next larger member or past the end.
    /// Does nothing on a detached cursor.
    pub fn move_next(&mut self) {
        if let Some(set) = self.set {
            if self.pos < set.capacity() {
                self.pos = (self.pos + 1..set.capacity())
                    .find(|&i| set.is_member_slot(i))
                    .unwrap_or(set.capacity());
            }
        }
    }

    /// Moves back to the next smaller member.
    /// Stays in place if there is none or the cursor is detached.
    pub fn move_prev(&mut self) {
        if let Some(set) = self.set {
            if let Some(i) = (0..self.pos.min(set.capacity()))
                .rev()
                .find(|&i| set.is_member_slot(i))
            {
                self.pos = i;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use fxhash::FxHashSet;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn set_from(capacity: usize, elements: &[u8]) -> IndexedSet<u8> {
        let mut set = IndexedSet::new(capacity);
        for &e in elements {
            assert!(set.try_insert(e).unwrap());
        }
        set
    }

    #[test]
    fn random_operations_match_hash_set() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for capacity in [1usize, 2, 10, 100, 1000] {
            let mut set = IndexedSet::<u16>::new(capacity);
            let mut reference = FxHashSet::default();

            for _ in 0..(20 * capacity) {
                let e = rng.random_range(0..capacity) as u16;
                if rng.random_bool(0.55) {
                    assert_eq!(Set::insert(&mut set, e), reference.insert(e));
                } else {
                    assert_eq!(Set::remove(&mut set, &e), reference.remove(&e));
                }

                set.assert_consistent();
                assert_eq!(set.len(), reference.len());
            }

            for e in 0..capacity as u16 {
                assert_eq!(set.contains(e), reference.contains(&e));
            }
        }
    }

    #[test]
    fn idempotent_insert_and_remove() {
        let mut set = IndexedSet::<u32>::new(10);
        assert!(set.try_insert(4).unwrap());
        assert!(!set.try_insert(4).unwrap());
        assert_eq!(set.len(), 1);

        assert!(!set.try_remove(7).unwrap());
        assert_eq!(set.len(), 1);
        assert!(set.contains(4));

        assert!(set.try_remove(4).unwrap());
        assert!(!set.try_remove(4).unwrap());
        assert!(set.is_empty());
        set.assert_consistent();
    }

    #[test]
    fn remove_last_member() {
        let mut set = set_from(8, &[3, 1, 6]);

        // 6 is the last member of the unordered view and thus swapped with itself
        assert!(set.try_remove(6).unwrap());
        assert!(!set.contains(6));
        assert_eq!(set.as_slice(), &[3, 1]);
        set.assert_consistent();

        assert!(set.try_remove(3).unwrap());
        assert_eq!(set.as_slice(), &[1]);
        assert!(set.try_remove(1).unwrap());
        assert!(set.is_empty());
        set.assert_consistent();
    }

    #[test]
    fn enumerations_round_trip() {
        let values = [45u8, 17, 5, 10, 0, 21, 12];
        let mut set = set_from(50, &values);

        let unordered = (0..set.len()).map(|i| set.at(i)).collect_vec();
        assert_eq!(
            unordered.iter().copied().sorted().collect_vec(),
            values.iter().copied().sorted().collect_vec()
        );
        assert_eq!(
            set.ordered().collect_vec(),
            vec![0, 5, 10, 12, 17, 21, 45]
        );
        assert_eq!(set.ordered().len(), 7);
        assert_eq!(
            set.ordered().rev().collect_vec(),
            vec![45, 21, 17, 12, 10, 5, 0]
        );

        set.insert(25);
        assert_eq!(
            set.ordered().collect_vec(),
            vec![0, 5, 10, 12, 17, 21, 25, 45]
        );

        // restartable
        assert_eq!(set.ordered().count(), set.ordered().count());
    }

    #[test]
    fn ordered_from_both_ends() {
        let set = set_from(20, &[2, 19, 7, 11]);
        let mut it = set.ordered();
        assert_eq!(it.next(), Some(2));
        assert_eq!(it.next_back(), Some(19));
        assert_eq!(it.next(), Some(7));
        assert_eq!(it.next_back(), Some(11));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn cursor() {
        let set = set_from(50, &[45, 17, 5, 10, 0, 21, 12]);

        let detached = OrderedCursor::<u8>::default();
        assert!(detached.is_end());
        assert_eq!(detached.get(), Err(Error::IteratorNotDereferenceable));

        let mut cursor = set.ordered_cursor();
        assert_eq!(cursor.get(), Ok(0));
        for _ in 0..5 {
            cursor.move_next();
        }
        assert_eq!(cursor.get(), Ok(21));

        let mut prev = cursor;
        prev.move_prev();
        assert_eq!(prev.get(), Ok(17));
        assert_eq!(cursor.get(), Ok(21));

        cursor.move_next();
        assert_eq!(cursor.get(), Ok(45));
        cursor.move_next();
        assert!(cursor.is_end());
        assert_eq!(cursor.get(), Err(Error::IteratorNotDereferenceable));

        cursor.move_prev();
        assert_eq!(cursor.get(), Ok(45));

        let mut first = set.ordered_cursor();
        first.move_prev();
        assert_eq!(first.get(), Ok(0));

        let empty = IndexedSet::<u8>::new(5);
        assert!(empty.ordered_cursor().is_end());
        assert!(empty.ordered_cursor().get().is_err());
    }

    #[test]
    fn capacity_limits() {
        assert!(IndexedSet::<u8>::try_new(254).is_ok());
        assert_eq!(
            IndexedSet::<u8>::try_new(255).unwrap_err(),
            Error::CapacityTooLarge {
                capacity: 255,
                sentinel: 255
            }
        );
        assert!(IndexedSet::<u8>::try_new(1000).is_err());

        let mut set = IndexedSet::<u8>::new(10);
        assert_eq!(
            set.try_insert(10),
            Err(Error::ElementOutOfRange {
                element: 10,
                capacity: 10
            })
        );
        assert!(set.try_remove(200).is_err());
        assert!(set.is_empty());
        set.assert_consistent();
    }

    #[test]
    #[should_panic]
    fn contains_out_of_range_panics() {
        IndexedSet::<u32>::new(4).contains(4);
    }

    #[test]
    fn uniform_select_maps_probability_to_position() {
        let set = set_from(10, &[9, 3, 4, 8]);
        assert_eq!(set.uniform_select(0.0), Some(9));
        assert_eq!(set.uniform_select(0.26), Some(3));
        assert_eq!(set.uniform_select(0.5), Some(4));
        assert_eq!(set.uniform_select(0.999), Some(8));
        assert_eq!(IndexedSet::<u8>::new(3).uniform_select(0.3), None);
    }

    #[test]
    fn sample_hits_every_member() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);
        let set = set_from(30, &[1, 5, 29, 17]);

        let mut seen = FxHashSet::default();
        for _ in 0..200 {
            let x = set.sample(rng).unwrap();
            assert!(set.contains(x));
            seen.insert(x);
        }
        assert_eq!(seen.len(), 4);
        assert_eq!(IndexedSet::<u8>::new(3).sample(rng), None);
    }

    #[test]
    fn new_with_all_and_clear() {
        let mut set = IndexedSet::<u16>::new_with_all(12);
        assert_eq!(set.len(), 12);
        assert_eq!(set.as_slice(), (0..12).collect_vec().as_slice());
        set.assert_consistent();

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.ordered().next(), None);
        set.assert_consistent();

        set.insert_multiple([3, 1, 3]);
        assert_eq!(set.len(), 2);
        set.remove_multiple(&[1, 2]);
        assert_eq!(Set::iter(&set).collect_vec(), vec![3]);
    }

    #[test]
    fn formatting() {
        let set = set_from(10, &[4, 2]);
        assert_eq!(format!("{set}"), "{4, 2}");
        assert_eq!(format!("{set:?}"), "{4, 2}");
    }
}
