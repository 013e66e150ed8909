//! # Interpolated n-gram sentence models
//!
//! Bigram and trigram models over tokenized sentences, every order interpolated
//! down to unigrams with either fixed or Witten-Bell weights.
//!
//! Sentences are bracketed with [`Sentinels`] before counting, so the models
//! score and generate whole sentences, boundaries included.
//! Words never seen in training fall back to the unigram mass of the unknown symbol.
//!
//! # Example
//! ```rust
//! use sentgram::{ModelBuilder, NgramOrder, Smoothing};
//!
//! let corpus = [["the", "cat", "sat"], ["the", "dog", "ran"]];
//! let model = ModelBuilder::new(NgramOrder::Tri).build(&corpus).unwrap();
//!
//! let p = model.sentence_probability(&["the", "cat", "sat"]);
//! assert!(p > model.sentence_probability(&["the", "fish", "sat"]));
//!
//! let fixed = model.conditional_probability(&["the"], "cat", Smoothing::Fixed);
//! assert!(fixed > 0.0);
//!
//! // sampling is unbounded, cap it when the corpus can loop
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let sentence: Vec<_> = model
//!     .generated_tokens(StdRng::seed_from_u64(7))
//!     .take(50)
//!     .collect();
//! assert!(sentence.iter().all(|token| token != "</S>"));
//! ```
//! The model also has [other methods](struct.NgramModel.html#implementations)

mod conditional;
mod frequency;
mod model;
mod order;
mod smoothing;
mod token;

pub use conditional::ConditionalFrequencyTable;
pub use frequency::FrequencyTable;
pub use model::{
    BuildError, ConfigError, ContextTable, GeneratedTokens, GenerationStrategy, LanguageModel,
    ModelBuilder, ModelConfig, NgramModel, BIGRAM_FIXED_WEIGHTS, TRIGRAM_FIXED_WEIGHTS,
};
pub use order::{NgramOrder, OrderError};
pub use smoothing::{witten_bell_lambda, Smoothing, Weights};
pub use token::{Context, Sentinels, Token};
