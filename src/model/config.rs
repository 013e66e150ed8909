use crate::{order::NgramOrder, smoothing::Weights, token::Sentinels};
use thiserror::Error;

/// Default constant weights of the bigram model, bigram first
pub const BIGRAM_FIXED_WEIGHTS: [f64; 1] = [0.6];
/// Default constant weights of the trigram model, trigram first
pub const TRIGRAM_FIXED_WEIGHTS: [f64; 2] = [0.5, 0.3];

/// How [`NgramModel`](super::NgramModel) picks the next token of a generated sentence
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GenerationStrategy {
    /// Samples the Witten-Bell interpolated distribution over the whole vocabulary
    #[default]
    Interpolated,
    /// Picks uniformly among the continuations of the longest observed context,
    /// falling back to shorter contexts and finally to the unigram distribution
    Backoff,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
    pub(super) order: NgramOrder,
    pub(super) fixed_weights: Vec<f64>,
    pub(super) sentinels: Sentinels,
    pub(super) strategy: GenerationStrategy,
}

impl Default for ModelConfig {
    #[inline]
    fn default() -> Self {
        Self::new(NgramOrder::default())
    }
}

#[inline]
fn default_fixed_weights(order: NgramOrder) -> Vec<f64> {
    match order {
        NgramOrder::Bi => BIGRAM_FIXED_WEIGHTS.to_vec(),
        NgramOrder::Tri => TRIGRAM_FIXED_WEIGHTS.to_vec(),
    }
}

impl ModelConfig {
    #[inline]
    pub fn new(order: NgramOrder) -> Self {
        Self {
            order,
            fixed_weights: default_fixed_weights(order),
            sentinels: Sentinels::default(),
            strategy: GenerationStrategy::default(),
        }
    }

    #[inline(always)]
    pub fn bigram() -> Self {
        Self::new(NgramOrder::Bi)
    }

    #[inline(always)]
    pub fn trigram() -> Self {
        Self::new(NgramOrder::Tri)
    }

    /// Changes the order, resets fixed weights to the defaults of that order
    #[inline]
    pub fn order(mut self, order: NgramOrder) -> Self {
        self.order = order;
        self.fixed_weights = default_fixed_weights(order);
        self
    }

    /// Constant weights used by [`Smoothing::Fixed`](crate::Smoothing::Fixed),
    /// one per order above the unigram, highest order first.
    /// The unigram gets the remainder.
    #[inline]
    pub fn fixed_weights(mut self, weights: &[f64]) -> Self {
        self.fixed_weights = weights.to_vec();
        self
    }

    #[inline]
    pub fn sentinels(mut self, sentinels: Sentinels) -> Self {
        self.sentinels = sentinels;
        self
    }

    #[inline]
    pub fn strategy(mut self, strategy: GenerationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[inline(always)]
    pub fn get_order(&self) -> NgramOrder {
        self.order
    }

    #[inline(always)]
    pub fn get_fixed_weights(&self) -> &[f64] {
        &self.fixed_weights
    }

    #[inline(always)]
    pub fn get_sentinels(&self) -> &Sentinels {
        &self.sentinels
    }

    #[inline(always)]
    pub fn get_strategy(&self) -> GenerationStrategy {
        self.strategy
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = self.order.context_len();
        if self.fixed_weights.len() != expected {
            return Err(ConfigError::WeightsCount {
                order: self.order.as_usize(),
                expected,
                got: self.fixed_weights.len(),
            });
        }

        if let Some(&weight) = self
            .fixed_weights
            .iter()
            .find(|w| !w.is_finite() || **w < 0.0)
        {
            return Err(ConfigError::InvalidWeight(weight));
        }

        let sum: f64 = self.fixed_weights.iter().sum();
        if sum > 1.0 + 4.0 * f64::EPSILON {
            return Err(ConfigError::WeightsSum(sum));
        }

        if !self.sentinels.is_valid() {
            return Err(ConfigError::Sentinels(self.sentinels.clone()));
        }

        Ok(())
    }

    #[inline]
    pub(super) fn weights(&self) -> Weights {
        Weights::fixed(self.order, &self.fixed_weights)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Order {order} model needs {expected} fixed weights, got {got}")]
    WeightsCount {
        order: usize,
        expected: usize,
        got: usize,
    },
    #[error("Fixed weight {0} must be finite and non-negative")]
    InvalidWeight(f64),
    #[error("Fixed weights sum to {0}, more than 1.0")]
    WeightsSum(f64),
    #[error("Sentinels {0:?} must be non-empty and pairwise distinct")]
    Sentinels(Sentinels),
}
