use super::{
    config::{ConfigError, GenerationStrategy, ModelConfig},
    tables::{validate_sentence, Tables},
    NgramModel,
};
use crate::{
    order::NgramOrder,
    token::{Sentinels, Token},
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Invalid model config")]
    Config(#[from] ConfigError),
    #[error("Sentence {sentence} has an empty token at {position}")]
    EmptyToken { sentence: usize, position: usize },
    #[error("Sentence {sentence} has reserved token {token:?} at {position}")]
    ReservedToken {
        sentence: usize,
        position: usize,
        token: Token,
    },
}

#[derive(Clone, Debug)]
pub struct ModelBuilder {
    pub(super) config: ModelConfig,
}

impl Default for ModelBuilder {
    #[inline]
    fn default() -> Self {
        Self::new(NgramOrder::default())
    }
}

impl ModelBuilder {
    /// Default fixed weights, sentinels and strategy for `order`
    #[inline]
    pub fn new(order: NgramOrder) -> Self {
        Self {
            config: ModelConfig::new(order),
        }
    }

    #[inline]
    pub fn from_config(config: ModelConfig) -> Self {
        Self { config }
    }

    #[inline(always)]
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Highest order first, see [`ModelConfig::fixed_weights`]
    #[inline]
    pub fn fixed_weights(mut self, weights: &[f64]) -> Self {
        self.config = self.config.fixed_weights(weights);
        self
    }

    #[inline]
    pub fn sentinels(mut self, sentinels: Sentinels) -> Self {
        self.config = self.config.sentinels(sentinels);
        self
    }

    #[inline]
    pub fn strategy(mut self, strategy: GenerationStrategy) -> Self {
        self.config = self.config.strategy(strategy);
        self
    }

    /// Counts the corpus in a single pass and normalizes once.
    ///
    /// Every sentence is a sequence of non-empty tokens, none equal to a sentinel.
    pub fn build<I, S, T>(self, corpus: I) -> Result<NgramModel, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[T]>,
        T: AsRef<str>,
    {
        self.config.validate()?;
        let order = self.config.order;
        let sentinels = &self.config.sentinels;

        let mut raw = Tables::default();
        for (index, sentence) in corpus.into_iter().enumerate() {
            let sentence = sentence.as_ref();
            validate_sentence(index, sentence, sentinels)?;
            raw.add_sentence(&sentinels.bracket(sentence, order), order);
        }

        Ok(NgramModel::from_raw(self.config, raw))
    }

    /// Same model as [`build`](ModelBuilder::build), counted in parallel shards
    /// which are merged in corpus order before the single normalization.
    #[cfg(not(target_family = "wasm"))]
    pub fn build_par<S, T>(self, corpus: &[S]) -> Result<NgramModel, BuildError>
    where
        S: AsRef<[T]> + Sync,
        T: AsRef<str>,
    {
        use rayon::prelude::*;

        self.config.validate()?;
        let order = self.config.order;
        let sentinels = &self.config.sentinels;

        // first invalid sentence in corpus order, like `build`
        if let Some(err) = corpus.par_iter().enumerate().find_map_first(|(index, sentence)| {
            validate_sentence(index, sentence.as_ref(), sentinels).err()
        }) {
            return Err(err);
        }

        let raw = corpus
            .par_iter()
            .fold(Tables::default, |mut tables, sentence| {
                tables.add_sentence(&sentinels.bracket(sentence.as_ref(), order), order);
                tables
            })
            .reduce(Tables::default, Tables::merge);

        Ok(NgramModel::from_raw(self.config, raw))
    }
}
