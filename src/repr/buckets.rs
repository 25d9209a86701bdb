use crate::{
    error::{Error, Result},
    utils::{IndexedSet, try_filled_vec},
    *,
};

/// Partition of the nodes `0..n` by their current weighted degree.
///
/// Bucket `d` is an [`IndexedSet`] of all nodes of degree `d` for `d` in `0..=max_degree`.
/// Buckets are allocated the first time their degree occurs and kept afterwards, so degrees
/// that never occur only cost an empty slot. The range of degrees grows on demand via
/// [`DegreeBuckets::try_grow`].
/// Additionally, the set of degrees with a non-empty bucket and the number of buckets
/// holding more than one node are maintained, making irregularity tests O(1).
#[derive(Clone)]
pub struct DegreeBuckets {
    buckets: Vec<Option<IndexedSet<Node>>>,
    populated: IndexedSet<Degree>,
    shared: NumNodes,
    n: NumNodes,
}

impl DegreeBuckets {
    /// Largest degree that can ever be tracked; `Degree::MAX` is reserved as the sentinel of
    /// the populated-degree set
    pub const DEGREE_LIMIT: Degree = Degree::MAX - 2;

    /// Creates empty buckets for nodes `0..n` and degrees `0..=max_degree`.
    ///
    /// # Errors
    /// Fails if `n` does not fit into an [`IndexedSet`], `max_degree` exceeds
    /// [`DegreeBuckets::DEGREE_LIMIT`] or the buckets cannot be allocated.
    pub fn try_new(n: NumNodes, max_degree: Degree) -> Result<Self> {
        // buckets are created lazily; validate their universe once
        if n >= IndexedSet::<Node>::sentinel() {
            return Err(Error::CapacityTooLarge {
                capacity: n as u64,
                sentinel: Node::MAX as u64,
            });
        }
        let num_buckets = Self::number_of_buckets(max_degree)?;

        Ok(Self {
            buckets: try_filled_vec(num_buckets, None)?,
            populated: IndexedSet::try_new(num_buckets)?,
            shared: 0,
            n,
        })
    }

    fn number_of_buckets(max_degree: Degree) -> Result<usize> {
        if max_degree > Self::DEGREE_LIMIT {
            return Err(Error::CapacityTooLarge {
                capacity: max_degree as u64 + 1,
                sentinel: Degree::MAX as u64,
            });
        }
        Ok(max_degree as usize + 1)
    }

    /// Largest degree a bucket exists for
    pub fn max_degree(&self) -> Degree {
        (self.buckets.len() - 1) as Degree
    }

    /// Makes room for degrees up to `max_degree`. Does nothing if they are already covered.
    /// The range at least doubles on growth (capped at [`DegreeBuckets::DEGREE_LIMIT`]), so
    /// repeated growth is amortized O(1) per degree.
    ///
    /// # Errors
    /// Fails if `max_degree` exceeds [`DegreeBuckets::DEGREE_LIMIT`] or memory cannot be
    /// reserved. The buckets are unchanged in this case.
    pub fn try_grow(&mut self, max_degree: Degree) -> Result<()> {
        if max_degree <= self.max_degree() {
            return Ok(());
        }

        let target = max_degree.max(self.max_degree().saturating_mul(2).min(Self::DEGREE_LIMIT));
        let num_buckets = Self::number_of_buckets(target)?;

        let mut populated = IndexedSet::try_new(num_buckets)?;
        self.buckets
            .try_reserve_exact(num_buckets - self.buckets.len())
            .map_err(|_| Error::OutOfMemory {
                entries: num_buckets as u64,
            })?;

        for d in self.populated.iter() {
            populated.try_insert(d)?;
        }
        self.populated = populated;
        self.buckets.resize(num_buckets, None);

        Ok(())
    }

    /// Adds `u` to the bucket of `degree`.
    /// Returns *true* if `u` was not in this bucket before.
    /// ** Panics if `degree > max_degree` or `u >= n` **
    pub fn insert(&mut self, degree: Degree, u: Node) -> bool {
        let (n, num_buckets) = (self.n as usize, self.buckets.len());
        let bucket = self
            .buckets
            .get_mut(degree as usize)
            .unwrap_or_else(|| panic!("{}", Self::out_of_range(degree, num_buckets)))
            .get_or_insert_with(|| IndexedSet::new(n));

        if !bucket.try_insert(u).unwrap_or_else(|e| panic!("{e}")) {
            return false;
        }

        match bucket.len() {
            1 => {
                self.populated.try_insert(degree).unwrap_or_else(|e| panic!("{e}"));
            }
            2 => self.shared += 1,
            _ => {}
        }

        true
    }

    /// Removes `u` from the bucket of `degree`.
    /// Returns *true* if `u` was in this bucket.
    /// ** Panics if `degree > max_degree` or `u >= n` **
    pub fn remove(&mut self, degree: Degree, u: Node) -> bool {
        let num_buckets = self.buckets.len();
        let Some(bucket) = self
            .buckets
            .get_mut(degree as usize)
            .unwrap_or_else(|| panic!("{}", Self::out_of_range(degree, num_buckets)))
        else {
            return false;
        };

        if !bucket.try_remove(u).unwrap_or_else(|e| panic!("{e}")) {
            return false;
        }

        match bucket.len() {
            0 => {
                self.populated.try_remove(degree).unwrap_or_else(|e| panic!("{e}"));
            }
            1 => self.shared -= 1,
            _ => {}
        }

        true
    }

    fn out_of_range(degree: Degree, capacity: usize) -> Error {
        Error::ElementOutOfRange {
            element: degree as u64,
            capacity: capacity as u64,
        }
    }

    /// Returns all nodes of the given degree in unspecified order
    pub fn nodes_with_degree(&self, degree: Degree) -> &[Node] {
        self.bucket(degree)
            .map(IndexedSet::as_slice)
            .unwrap_or_default()
    }

    /// Returns the bucket of `degree` if it is non-empty
    pub fn bucket(&self, degree: Degree) -> Option<&IndexedSet<Node>> {
        self.buckets
            .get(degree as usize)
            .and_then(Option::as_ref)
            .filter(|b| !b.is_empty())
    }

    /// Returns the number of nodes of the given degree
    pub fn class_size(&self, degree: Degree) -> NumNodes {
        self.nodes_with_degree(degree).len() as NumNodes
    }

    /// Returns *true* if `u` is in the bucket of `degree`
    pub fn contains(&self, degree: Degree, u: Node) -> bool {
        self.bucket(degree).is_some_and(|b| b.contains(u))
    }

    /// Number of distinct degrees that occur
    pub fn number_of_populated(&self) -> usize {
        self.populated.len()
    }

    /// Degrees with a non-empty bucket in unspecified order; O(number of populated degrees)
    pub fn populated_degrees(&self) -> impl Iterator<Item = Degree> + '_ {
        self.populated.iter()
    }

    /// Non-empty buckets in ascending order of degree; O(max_degree)
    pub fn iter(&self) -> impl Iterator<Item = (Degree, &IndexedSet<Node>)> + '_ {
        self.populated.ordered().filter_map(|d| self.bucket(d).map(|b| (d, b)))
    }

    /// Number of degrees shared by at least two nodes
    pub fn number_of_shared_degrees(&self) -> NumNodes {
        self.shared
    }

    /// Returns *true* if every non-empty bucket holds exactly one node
    pub fn is_injective(&self) -> bool {
        self.shared == 0
    }
}

impl std::fmt::Debug for DegreeBuckets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn tracks_shared_and_populated_degrees() {
        let mut buckets = DegreeBuckets::try_new(5, 10).unwrap();
        assert!(buckets.is_injective());
        assert_eq!(buckets.max_degree(), 10);

        assert!(buckets.insert(3, 0));
        assert!(!buckets.insert(3, 0));
        assert!(buckets.insert(3, 1));
        assert!(buckets.insert(7, 2));
        assert_eq!(buckets.number_of_shared_degrees(), 1);
        assert!(!buckets.is_injective());
        assert_eq!(buckets.number_of_populated(), 2);
        assert_eq!(buckets.class_size(3), 2);

        assert!(buckets.insert(3, 4));
        assert_eq!(buckets.number_of_shared_degrees(), 1);

        assert!(buckets.remove(3, 0));
        assert!(buckets.remove(3, 4));
        assert!(!buckets.remove(3, 4));
        assert!(!buckets.remove(9, 4));
        assert!(buckets.is_injective());

        assert!(buckets.remove(3, 1));
        assert_eq!(buckets.nodes_with_degree(3), &[] as &[Node]);
        assert!(buckets.bucket(3).is_none());
        assert_eq!(buckets.populated_degrees().collect_vec(), vec![7]);
        assert!(buckets.contains(7, 2));
        assert!(!buckets.contains(7, 1));
    }

    #[test]
    fn ascending_iteration() {
        let mut buckets = DegreeBuckets::try_new(4, 20).unwrap();
        buckets.insert(12, 0);
        buckets.insert(2, 1);
        buckets.insert(12, 2);
        buckets.insert(5, 3);

        assert_eq!(
            buckets
                .iter()
                .map(|(d, b)| (d, b.len()))
                .collect_vec(),
            vec![(2, 1), (5, 1), (12, 2)]
        );
    }

    #[test]
    #[should_panic]
    fn degree_out_of_range_panics() {
        let mut buckets = DegreeBuckets::try_new(4, 6).unwrap();
        buckets.insert(7, 0);
    }

    #[test]
    fn growing_keeps_members() {
        let mut buckets = DegreeBuckets::try_new(4, 3).unwrap();
        buckets.insert(3, 0);
        buckets.insert(3, 1);
        buckets.insert(1, 2);

        buckets.try_grow(2).unwrap();
        assert_eq!(buckets.max_degree(), 3);

        buckets.try_grow(5).unwrap();
        assert_eq!(buckets.max_degree(), 6);
        buckets.try_grow(40).unwrap();
        assert_eq!(buckets.max_degree(), 40);

        assert!(buckets.insert(40, 3));
        assert!(buckets.remove(3, 1));
        assert!(buckets.insert(17, 1));
        assert!(buckets.is_injective());
        assert_eq!(
            buckets
                .iter()
                .map(|(d, b)| (d, b.as_slice().to_vec()))
                .collect_vec(),
            vec![(1, vec![2]), (3, vec![0]), (17, vec![1]), (40, vec![3])]
        );
    }

    #[test]
    fn too_many_degrees() {
        assert!(DegreeBuckets::try_new(4, Degree::MAX - 1).is_err());
        assert!(DegreeBuckets::try_new(Node::MAX, 4).is_err());

        let mut buckets = DegreeBuckets::try_new(4, 6).unwrap();
        assert!(buckets.try_grow(Degree::MAX - 1).is_err());
        assert_eq!(buckets.max_degree(), 6);
    }
}
