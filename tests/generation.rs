use ::std::collections::HashSet;
use rand::{rngs::StdRng, SeedableRng};
use rstest::*;
use sentgram::{
    GenerationStrategy, LanguageModel, ModelBuilder, NgramOrder, NgramOrder::*, Sentinels, Token,
};

const MAX_TOKENS: usize = 10_000;

fn corpus() -> Vec<Vec<&'static str>> {
    [
        "the cat sat on the mat",
        "the dog sat on the log",
        "a cat ran",
        "the dog ran after the cat",
        "a bird sat on the tree",
    ]
    .iter()
    .map(|line| line.split_whitespace().collect())
    .collect()
}

#[rstest(
    order,
    strategy,
    case(Bi, GenerationStrategy::Interpolated),
    case(Tri, GenerationStrategy::Interpolated),
    case(Bi, GenerationStrategy::Backoff),
    case(Tri, GenerationStrategy::Backoff)
)]
fn test_thousand_sentences_terminate(order: NgramOrder, strategy: GenerationStrategy) {
    let model = ModelBuilder::new(order)
        .strategy(strategy)
        .build(corpus())
        .unwrap();
    let sentinels = model.sentinels();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..1000 {
        let mut tokens = model.generated_tokens(&mut rng);
        let sentence: Vec<Token> = tokens.by_ref().take(MAX_TOKENS).collect();
        assert!(tokens.next().is_none(), "No stop symbol after {MAX_TOKENS} tokens");
        assert!(!sentence
            .iter()
            .any(|token| token == sentinels.start() || token == sentinels.stop()));
    }
}

#[rstest(order, case(Bi), case(Tri))]
fn test_backoff_follows_observed_bigrams(order: NgramOrder) {
    let corpus = corpus();
    let observed: HashSet<(&str, &str)> = corpus
        .iter()
        .flat_map(|sentence| sentence.windows(2).map(|pair| (pair[0], pair[1])))
        .collect();
    let model = ModelBuilder::new(order)
        .strategy(GenerationStrategy::Backoff)
        .build(&corpus)
        .unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..300 {
        let sentence = model.generate_sentence_with(&mut rng);
        assert!(["the", "a"].contains(&sentence[0].as_str()), "{sentence:?}");
        for pair in sentence.windows(2) {
            assert!(
                observed.contains(&(pair[0].as_str(), pair[1].as_str())),
                "{pair:?} was never observed"
            );
        }
    }
}

#[test]
fn test_interpolated_can_leave_observed_paths() {
    let model = ModelBuilder::new(Bi).build(corpus()).unwrap();
    let mut rng = StdRng::seed_from_u64(11);

    let first_tokens: HashSet<Token> = (0..500)
        .filter_map(|_| model.generated_tokens(&mut rng).next())
        .collect();
    assert!(first_tokens.contains("the"));
    assert!(first_tokens.len() > 2, "{first_tokens:?}");
}

#[test]
fn test_custom_sentinels_never_generated() {
    let sentinels = Sentinels::new("BOS", "EOS", "OOV");
    let model = ModelBuilder::new(Tri)
        .sentinels(sentinels.clone())
        .build(corpus())
        .unwrap();
    let mut rng = StdRng::seed_from_u64(9);

    for _ in 0..200 {
        let sentence: Vec<_> = model.generated_tokens(&mut rng).take(MAX_TOKENS).collect();
        assert!(sentence.iter().all(|token| token != "BOS" && token != "EOS"));
    }
    assert!(model.vocabulary().any(|word| word == "OOV"));
}

#[test]
fn test_empty_corpus_generation_is_capped() {
    let model = ModelBuilder::new(Bi).build(Vec::<Vec<&str>>::new()).unwrap();
    let sentence: Vec<_> = model
        .generated_tokens(StdRng::seed_from_u64(0))
        .take(20)
        .collect();
    assert_eq!(sentence.len(), 20);
    assert!(sentence.iter().all(|token| token == "*UNKNOWN*"));
}

#[test]
fn test_generate_sentence_with_thread_rng() {
    let model = ModelBuilder::new(Bi)
        .strategy(GenerationStrategy::Backoff)
        .build([["only", "sentence"]])
        .unwrap();
    assert_eq!(LanguageModel::generate_sentence(&model), ["only", "sentence"]);
    assert_eq!(model.generate_sentence(), ["only", "sentence"]);
}
