use ::std::{error::Error, path::PathBuf};
use clap::Parser;
use itertools::Itertools;
use rand::{rngs::StdRng, SeedableRng};
use sentgram::{GenerationStrategy, ModelBuilder, NgramOrder, Smoothing};
use sentgram_train::HeldOutScore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Training corpus, one tokenized sentence per line
    #[arg(short = 'i', required = true)]
    inp: PathBuf,

    /// Model order, 2 or 3
    #[arg(short = 'n', default_value_t = 3)]
    order: usize,

    /// Sentences to generate
    #[arg(short = 'c', default_value_t = 10)]
    count: usize,

    /// Generated sentences are cut after this many tokens
    #[arg(short = 'm', default_value_t = 100)]
    max_tokens: usize,

    /// Held-out corpus to score
    #[arg(short = 't')]
    test: Option<PathBuf>,

    /// Generate by backing off to the longest observed context
    #[arg(long)]
    backoff: bool,

    /// Score with the fixed weights instead of Witten-Bell
    #[arg(long)]
    fixed: bool,

    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let order = NgramOrder::try_from(args.order)?;
    let strategy = if args.backoff {
        GenerationStrategy::Backoff
    } else {
        GenerationStrategy::Interpolated
    };
    let smoothing = if args.fixed {
        Smoothing::Fixed
    } else {
        Smoothing::WittenBell
    };

    let corpus = sentgram_train::read_corpus(&args.inp)?;
    let model = ModelBuilder::new(order).strategy(strategy).build_par(&corpus)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    for _ in 0..args.count {
        let sentence = model.generated_tokens(&mut rng).take(args.max_tokens).join(" ");
        println!("{sentence}");
    }

    if let Some(test) = &args.test {
        let held_out = sentgram_train::read_corpus(test)?;
        let score = HeldOutScore::new(&model, &held_out, smoothing);
        println!(
            "Held-out sentences: {}, log probability: {:.4}, perplexity: {:.4}",
            score.sentences,
            score.log_probability,
            score.perplexity()
        );
        tracing::info!(unknown_words = model.unknown_word_queries(), "Held-out scored");
    }

    Ok(())
}
