use crate::frequency::FrequencyTable;
use ::core::hash::Hash;
use indexmap::{map::Entry, Equivalent, IndexMap};

/// Two-level counter: context to a [`FrequencyTable`] of outcomes.
///
/// A context is only present once at least one outcome was counted for it.
#[derive(Clone, Debug)]
pub struct ConditionalFrequencyTable<C, K> {
    counters: IndexMap<C, FrequencyTable<K>, ahash::RandomState>,
}

impl<C, K> Default for ConditionalFrequencyTable<C, K> {
    #[inline]
    fn default() -> Self {
        Self {
            counters: IndexMap::default(),
        }
    }
}

impl<C: Hash + Eq, K: Hash + Eq> ConditionalFrequencyTable<C, K> {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn increment(&mut self, context: C, outcome: K, amount: f64) {
        self.counters
            .entry(context)
            .or_default()
            .increment(outcome, amount);
    }

    /// Count of `outcome` after `context`, 0.0 if either is unseen
    #[inline]
    pub fn get<QC, QK>(&self, context: &QC, outcome: &QK) -> f64
    where
        QC: ?Sized + Hash + Equivalent<C>,
        QK: ?Sized + Hash + Equivalent<K>,
    {
        self.counters
            .get(context)
            .map(|counter| counter.get(outcome))
            .unwrap_or_default()
    }

    /// Outcomes of `context`, [`None`] if never observed
    #[inline]
    pub fn counter<QC>(&self, context: &QC) -> Option<&FrequencyTable<K>>
    where
        QC: ?Sized + Hash + Equivalent<C>,
    {
        self.counters.get(context)
    }

    pub fn normalize_all(&mut self) {
        self.counters
            .values_mut()
            .for_each(FrequencyTable::normalize);
    }

    /// Number of observed contexts
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    #[inline]
    pub fn contexts(&self) -> impl ExactSizeIterator<Item = &C> {
        self.counters.keys()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&C, &FrequencyTable<K>)> {
        self.counters.iter()
    }

    pub fn merge(&mut self, other: Self) {
        for (context, counter) in other.counters {
            match self.counters.entry(context) {
                Entry::Occupied(mut e) => e.get_mut().merge(counter),
                Entry::Vacant(e) => {
                    e.insert(counter);
                }
            }
        }
    }
}
