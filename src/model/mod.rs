use crate::{
    frequency::FrequencyTable,
    order::{NgramOrder, ORDER_MAX},
    smoothing::{witten_bell_lambda_of, Smoothing, Weights},
    token::{Sentinels, Token},
};
use ::core::sync::atomic::{AtomicUsize, Ordering};
use rand::Rng;

mod builder;
mod config;
mod generate;
mod tables;

pub use builder::{BuildError, ModelBuilder};
pub use config::{
    ConfigError, GenerationStrategy, ModelConfig, BIGRAM_FIXED_WEIGHTS, TRIGRAM_FIXED_WEIGHTS,
};
pub use generate::GeneratedTokens;
use tables::Tables;
pub use tables::ContextTable;

/// What a sentence model offers to scoring and sampling code
pub trait LanguageModel {
    /// Probability of the whole sentence, boundaries included
    fn sentence_probability<T: AsRef<str>>(&self, sentence: &[T]) -> f64;

    /// A new sentence, without sentinels
    fn generate_sentence_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Token>;

    #[inline]
    fn generate_sentence(&self) -> Vec<Token> {
        self.generate_sentence_with(&mut rand::rng())
    }
}

/// Bigram or trigram model interpolating every order down to unigrams.
///
/// Immutable once built. Keeps raw counts for the Witten-Bell weights and a
/// normalized copy of them for the probability mass.
#[derive(Debug)]
pub struct NgramModel {
    config: ModelConfig,
    fixed_weights: Weights,
    raw: Tables,
    normalized: Tables,
    unknown_words: AtomicUsize,
}

impl NgramModel {
    fn from_raw(config: ModelConfig, mut raw: Tables) -> Self {
        raw.seed_unknown(&config.sentinels);
        let normalized = raw.normalized();

        assert!(
            normalized.unigrams.get(config.sentinels.unknown()) > 0.0,
            "Unknown symbol has no unigram mass"
        );

        tracing::info!(
            order = config.order.as_usize(),
            sentences = raw.sentences,
            vocabulary = normalized.unigrams.distinct_count(),
            bigram_contexts = raw.context_table(1).len(),
            trigram_contexts = raw.context_table(2).len(),
            "Model built"
        );

        Self {
            fixed_weights: config.weights(),
            config,
            raw,
            normalized,
            unknown_words: AtomicUsize::new(0),
        }
    }

    #[inline(always)]
    pub fn order(&self) -> NgramOrder {
        self.config.order
    }

    #[inline(always)]
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    #[inline(always)]
    pub fn sentinels(&self) -> &Sentinels {
        &self.config.sentinels
    }

    /// Number of training sentences
    #[inline(always)]
    pub fn sentences(&self) -> usize {
        self.raw.sentences
    }

    /// Every token that can be predicted, in first-seen order.
    /// Includes the stop and unknown symbols, never the start symbol.
    #[inline]
    pub fn vocabulary(&self) -> impl ExactSizeIterator<Item = &str> {
        self.normalized.unigrams.keys().map(Token::as_str)
    }

    /// Normalized unigram distribution
    #[inline(always)]
    pub fn unigrams(&self) -> &FrequencyTable<Token> {
        &self.normalized.unigrams
    }

    /// Raw unigram counts, the synthetic unknown count included
    #[inline(always)]
    pub fn unigram_counts(&self) -> &FrequencyTable<Token> {
        &self.raw.unigrams
    }

    /// Normalized continuations of contexts with `len` preceding tokens,
    /// [`None`] if the model order has no such contexts
    #[inline]
    pub fn contexts(&self, len: usize) -> Option<&ContextTable> {
        (1..=self.order().context_len())
            .contains(&len)
            .then(|| self.normalized.context_table(len))
    }

    /// Raw counts of contexts with `len` preceding tokens
    #[inline]
    pub fn context_counts(&self, len: usize) -> Option<&ContextTable> {
        (1..=self.order().context_len())
            .contains(&len)
            .then(|| self.raw.context_table(len))
    }

    /// Normalized unigram probability, 0.0 for unseen words
    #[inline]
    pub fn unigram_probability(&self, word: &str) -> f64 {
        self.normalized.unigrams.get(word)
    }

    /// How many queries so far hit a word never seen in training
    #[inline]
    pub fn unknown_word_queries(&self) -> usize {
        self.unknown_words.load(Ordering::Relaxed)
    }

    /// Weights mixing the orders after `context` (its last `order - 1` tokens,
    /// left-padded with start sentinels when shorter)
    pub fn interpolation_weights<T: AsRef<str>>(
        &self,
        context: &[T],
        smoothing: Smoothing,
    ) -> Weights {
        let context = self.sentinels().context(context, self.order());
        self.weights(&context, smoothing)
    }

    /// Probability of `word` following `context`.
    ///
    /// Only the last `order - 1` tokens of `context` are used, a shorter
    /// context is left-padded with start sentinels. A word never seen in
    /// training gets the unigram mass of the unknown symbol.
    pub fn conditional_probability<T: AsRef<str>>(
        &self,
        context: &[T],
        word: &str,
        smoothing: Smoothing,
    ) -> f64 {
        let context = self.sentinels().context(context, self.order());
        let weights = self.weights(&context, smoothing);
        weights.interpolate(&self.probabilities(&context, word))
    }

    /// Product of the Witten-Bell smoothed probabilities of every word
    /// of the bracketed sentence. 0.0 if any of them is 0.0.
    #[inline]
    pub fn sentence_probability<T: AsRef<str>>(&self, sentence: &[T]) -> f64 {
        self.sentence_probability_with(sentence, Smoothing::WittenBell)
    }

    pub fn sentence_probability_with<T: AsRef<str>>(
        &self,
        sentence: &[T],
        smoothing: Smoothing,
    ) -> f64 {
        let bracketed = self.sentinels().bracket(sentence, self.order());
        self.factors(&bracketed, smoothing).product()
    }

    /// Natural log of [`sentence_probability`](NgramModel::sentence_probability),
    /// summed per word so long sentences do not underflow.
    /// [`f64::NEG_INFINITY`] if any factor is 0.0.
    #[inline]
    pub fn sentence_log_probability<T: AsRef<str>>(&self, sentence: &[T]) -> f64 {
        self.sentence_log_probability_with(sentence, Smoothing::WittenBell)
    }

    pub fn sentence_log_probability_with<T: AsRef<str>>(
        &self,
        sentence: &[T],
        smoothing: Smoothing,
    ) -> f64 {
        let bracketed = self.sentinels().bracket(sentence, self.order());
        self.factors(&bracketed, smoothing).map(f64::ln).sum()
    }

    /// Conditional probability of every word of a bracketed sentence
    fn factors<'a>(
        &'a self,
        bracketed: &'a [Token],
        smoothing: Smoothing,
    ) -> impl Iterator<Item = f64> + 'a {
        let context_len = self.order().context_len();
        (context_len..bracketed.len()).map(move |i| {
            let context = &bracketed[i - context_len..i];
            let weights = self.weights(context, smoothing);
            weights.interpolate(&self.probabilities(context, &bracketed[i]))
        })
    }

    /// Lazily generated sentence, ends before the stop symbol.
    ///
    /// Generation is unbounded, cap it with [`Iterator::take`] if needed.
    #[inline]
    pub fn generated_tokens<R: Rng>(&self, rng: R) -> GeneratedTokens<'_, R> {
        GeneratedTokens::new(self, rng)
    }

    #[inline]
    pub fn generate_sentence_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Token> {
        self.generated_tokens(rng).collect()
    }

    #[inline]
    pub fn generate_sentence(&self) -> Vec<Token> {
        self.generate_sentence_with(&mut rand::rng())
    }

    /// `context` holds exactly `order - 1` tokens
    fn weights(&self, context: &[Token], smoothing: Smoothing) -> Weights {
        debug_assert_eq!(context.len(), self.order().context_len());

        match smoothing {
            Smoothing::Fixed => self.fixed_weights,
            Smoothing::WittenBell => {
                let lambdas = (1..=context.len()).rev().map(|len| {
                    let counter = self
                        .raw
                        .context_table(len)
                        .counter(&context[context.len() - len..]);
                    witten_bell_lambda_of(counter)
                });
                Weights::chain(self.order(), lambdas)
            }
        }
    }

    /// Per-order probabilities of `word`, indexed by ngram length - 1
    fn probabilities(&self, context: &[Token], word: &str) -> [f64; ORDER_MAX] {
        let mut probabilities = [0.0; ORDER_MAX];

        let mut unigram = self.normalized.unigrams.get(word);
        if unigram == 0.0 {
            self.unknown_words.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(word, "Unknown word, using the unknown symbol probability");
            unigram = self.normalized.unigrams.get(self.sentinels().unknown());
        }
        probabilities[0] = unigram;

        for len in 1..=context.len() {
            probabilities[len] = self
                .normalized
                .context_table(len)
                .get(&context[context.len() - len..], word);
        }

        probabilities
    }
}

impl LanguageModel for NgramModel {
    #[inline]
    fn sentence_probability<T: AsRef<str>>(&self, sentence: &[T]) -> f64 {
        NgramModel::sentence_probability(self, sentence)
    }

    #[inline]
    fn generate_sentence_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Token> {
        NgramModel::generate_sentence_with(self, rng)
    }

    #[inline]
    fn generate_sentence(&self) -> Vec<Token> {
        NgramModel::generate_sentence(self)
    }
}
