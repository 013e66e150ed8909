use super::{GenerationStrategy, NgramModel};
use crate::{
    frequency::FrequencyTable,
    smoothing::Smoothing,
    token::{Context, Token},
};
use ::core::iter::FusedIterator;
use rand::Rng;

/// Tokens of one generated sentence, see [`NgramModel::generated_tokens`]
#[derive(Debug)]
pub struct GeneratedTokens<'m, R> {
    model: &'m NgramModel,
    rng: R,
    context: Context,
    finished: bool,
}

impl<'m, R: Rng> GeneratedTokens<'m, R> {
    #[inline]
    pub(super) fn new(model: &'m NgramModel, rng: R) -> Self {
        Self {
            context: model.sentinels().context::<&str>(&[], model.order()),
            model,
            rng,
            finished: false,
        }
    }

    /// Preceding tokens of the next draw
    #[inline]
    pub fn context(&self) -> &[Token] {
        &self.context
    }
}

impl<R: Rng> Iterator for GeneratedTokens<'_, R> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.model.next_token(&self.context, &mut self.rng);
        if token == self.model.sentinels().stop {
            self.finished = true;
            return None;
        }

        self.context.remove(0);
        self.context.push(token.clone());
        Some(token)
    }
}

impl<R: Rng> FusedIterator for GeneratedTokens<'_, R> {}

/// Walks `candidates` in order accumulating `probability` until the sum
/// exceeds `sample`. [`None`] if the mass runs out first.
#[inline]
fn cumulative_pick<'t>(
    candidates: impl Iterator<Item = &'t Token>,
    sample: f64,
    mut probability: impl FnMut(&Token) -> f64,
) -> Option<&'t Token> {
    let mut sum = 0.0;
    candidates.into_iter().find(|candidate| {
        sum += probability(*candidate);
        sum > sample
    })
}

impl NgramModel {
    /// Draws the token following `context` (`order - 1` tokens)
    pub(super) fn next_token<R: Rng + ?Sized>(&self, context: &[Token], rng: &mut R) -> Token {
        match self.config.strategy {
            GenerationStrategy::Interpolated => self.next_interpolated(context, rng),
            GenerationStrategy::Backoff => self.next_backoff(context, rng),
        }
    }

    fn next_interpolated<R: Rng + ?Sized>(&self, context: &[Token], rng: &mut R) -> Token {
        let weights = self.weights(context, Smoothing::WittenBell);
        let sample: f64 = rng.random();

        cumulative_pick(self.normalized.unigrams.keys(), sample, |word| {
            weights.interpolate(&self.probabilities(context, word))
        })
        .cloned()
        .unwrap_or_else(|| self.fall_through(sample))
    }

    /// Uniform pick among the continuations of the longest observed
    /// context, the unigram distribution when no context was observed
    fn next_backoff<R: Rng + ?Sized>(&self, context: &[Token], rng: &mut R) -> Token {
        for len in (1..=context.len()).rev() {
            let continuation = self
                .raw
                .context_table(len)
                .counter(&context[context.len() - len..])
                .filter(|counter| !counter.is_empty())
                .and_then(|counter| pick_uniform(counter, &mut *rng));
            if let Some(token) = continuation {
                return token.clone();
            }
        }

        let unigrams = &self.normalized.unigrams;
        let sample: f64 = rng.random();
        cumulative_pick(unigrams.keys(), sample, |word| unigrams.get(word))
            .cloned()
            .unwrap_or_else(|| self.fall_through(sample))
    }

    #[cold]
    fn fall_through(&self, sample: f64) -> Token {
        tracing::trace!(sample, "Probability mass exhausted, emitting the unknown symbol");
        self.sentinels().unknown.clone()
    }
}

#[inline]
fn pick_uniform<'t, R: Rng + ?Sized>(
    counter: &'t FrequencyTable<Token>,
    rng: &mut R,
) -> Option<&'t Token> {
    counter.get_index(rng.random_range(0..counter.distinct_count()))
}
