use ::core::hash::Hash;
use indexmap::{map::Entry, Equivalent, IndexMap};

pub(crate) type FrequencyMap<K> = IndexMap<K, f64, ahash::RandomState>;

/// Counter from item to a non-negative count.
///
/// Keys iterate in insertion order. A table is filled once and then
/// [normalized](FrequencyTable::normalize) once; after that it is a
/// probability distribution and must not be incremented.
#[derive(Clone, Debug)]
pub struct FrequencyTable<K> {
    counts: FrequencyMap<K>,
    total: f64,
    normalized: bool,
}

impl<K> Default for FrequencyTable<K> {
    #[inline]
    fn default() -> Self {
        Self {
            counts: FrequencyMap::default(),
            total: 0.0,
            normalized: false,
        }
    }
}

impl<K: Hash + Eq> FrequencyTable<K> {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: K, amount: f64) {
        debug_assert!(amount > 0.0, "Increment amount {amount} must be positive");
        debug_assert!(!self.normalized, "Normalized table must not be incremented");

        *self.counts.entry(key).or_insert(0.0) += amount;
        self.total += amount;
    }

    /// Count of `key`, 0.0 if never seen
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> f64
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.counts.get(key).copied().unwrap_or_default()
    }

    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.counts.contains_key(key)
    }

    /// Sum of all counts, 1.0 once normalized (unless empty)
    #[inline(always)]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of distinct keys
    #[inline(always)]
    pub fn distinct_count(&self) -> usize {
        self.counts.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[inline(always)]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Divides every count by the total.
    ///
    /// An empty table is left unchanged, a normalized one too.
    pub fn normalize(&mut self) {
        if self.normalized || self.total == 0.0 {
            return;
        }

        let total = self.total;
        self.counts.values_mut().for_each(|count| *count /= total);
        self.total = self.counts.values().sum();
        self.normalized = true;
    }

    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.counts.keys()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, f64)> {
        self.counts.iter().map(|(k, &v)| (k, v))
    }

    /// Key at insertion position `index`
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<&K> {
        self.counts.get_index(index).map(|(k, _)| k)
    }

    /// Adds raw counts of `other`. Keys unseen here are appended in `other`'s order.
    pub fn merge(&mut self, other: Self) {
        debug_assert!(
            !self.normalized && !other.normalized,
            "Only raw tables can be merged"
        );

        for (key, count) in other.counts {
            match self.counts.entry(key) {
                Entry::Occupied(mut e) => *e.get_mut() += count,
                Entry::Vacant(e) => {
                    e.insert(count);
                }
            }
        }
        self.total += other.total;
    }
}

impl<K: Hash + Eq> FromIterator<(K, f64)> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, amount) in iter {
            table.increment(key, amount);
        }
        table
    }
}
