use crate::{frequency::FrequencyTable, order::ORDER_MAX, NgramOrder};

/// How the per-order estimates of a prediction are mixed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Smoothing {
    /// Configured constant weights
    Fixed,
    /// Weights estimated from the raw counts of each context
    #[default]
    WittenBell,
}

/// Witten-Bell weight of a context with `distinct` continuations
/// observed `total` times: `1 - d / (d + t)`, or 0.0 for an unseen context.
///
/// The rest of the mass (`1 - lambda`) flows to the next lower order.
#[inline]
pub fn witten_bell_lambda(distinct: usize, total: f64) -> f64 {
    if distinct == 0 {
        return 0.0;
    }
    let distinct = distinct as f64;
    1.0 - distinct / (distinct + total)
}

/// [`witten_bell_lambda`] of a raw continuation table
#[inline]
pub(crate) fn witten_bell_lambda_of<K>(counter: Option<&FrequencyTable<K>>) -> f64
where
    K: ::core::hash::Hash + Eq,
{
    counter
        .map(|c| witten_bell_lambda(c.distinct_count(), c.total()))
        .unwrap_or_default()
}

/// Interpolation weights, indexed by ngram length - 1 (unigram first).
///
/// Weights above the model order are zero, all weights sum to 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights([f64; ORDER_MAX]);

impl Weights {
    /// Chains lambdas given from the highest order down: every order takes
    /// its lambda of the mass left by the higher orders, the unigram takes the rest.
    pub(crate) fn chain(order: NgramOrder, lambdas: impl IntoIterator<Item = f64>) -> Self {
        let mut weights = [0.0; ORDER_MAX];
        let mut remaining = 1.0;
        for (len, lambda) in (2..=order.as_usize()).rev().zip(lambdas) {
            debug_assert!((0.0..=1.0).contains(&lambda), "Lambda {lambda} out of range");
            let weight = lambda * remaining;
            weights[len - 1] = weight;
            remaining -= weight;
        }
        weights[0] = remaining;

        Self(weights)
    }

    /// Constant weights, highest order first, the unigram takes the rest
    pub(crate) fn fixed(order: NgramOrder, higher: &[f64]) -> Self {
        debug_assert_eq!(higher.len(), order.context_len());

        let mut weights = [0.0; ORDER_MAX];
        let mut remaining = 1.0;
        for (len, &weight) in (2..=order.as_usize()).rev().zip(higher) {
            weights[len - 1] = weight;
            remaining -= weight;
        }
        // configs may exceed 1.0 by rounding
        weights[0] = remaining.max(0.0);

        Self(weights)
    }

    /// Weight of the ngrams of length `len` (1..=3)
    #[inline]
    pub fn get(&self, len: usize) -> f64 {
        self.0.get(len.wrapping_sub(1)).copied().unwrap_or_default()
    }

    #[inline(always)]
    pub fn unigram(&self) -> f64 {
        self.0[0]
    }

    #[inline(always)]
    pub fn bigram(&self) -> f64 {
        self.0[1]
    }

    #[inline(always)]
    pub fn trigram(&self) -> f64 {
        self.0[2]
    }

    #[inline]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Mixes per-order probabilities, indexed like the weights
    #[inline]
    pub fn interpolate(&self, probabilities: &[f64; ORDER_MAX]) -> f64 {
        self.0
            .iter()
            .zip(probabilities)
            .map(|(w, p)| w * p)
            .sum()
    }
}
