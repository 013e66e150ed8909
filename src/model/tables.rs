use super::BuildError;
use crate::{
    conditional::ConditionalFrequencyTable,
    frequency::FrequencyTable,
    order::{NgramOrder, CONTEXT_MAX_LEN},
    token::{Context, Sentinels, Token},
};

pub type ContextTable = ConditionalFrequencyTable<Context, Token>;

/// Unigram counts and one context table per context length.
///
/// Filled raw by a single pass over the corpus, the model keeps
/// this raw copy next to a normalized clone.
#[derive(Clone, Debug, Default)]
pub(super) struct Tables {
    pub(super) unigrams: FrequencyTable<Token>,
    /// Indexed by context length - 1
    pub(super) contexts: [ContextTable; CONTEXT_MAX_LEN],
    pub(super) sentences: usize,
}

impl Tables {
    /// Counts every word of a bracketed sentence, with all of its
    /// contexts up to `order - 1` preceding tokens.
    pub(super) fn add_sentence(&mut self, bracketed: &[Token], order: NgramOrder) {
        let context_len = order.context_len();
        debug_assert!(bracketed.len() > context_len, "Sentence is not bracketed");

        for i in context_len..bracketed.len() {
            let word = &bracketed[i];
            self.unigrams.increment(word.clone(), 1.0);
            for len in 1..=context_len {
                let context: Context = bracketed[i - len..i].iter().cloned().collect();
                self.contexts[len - 1].increment(context, word.clone(), 1.0);
            }
        }
        self.sentences += 1;
    }

    /// Combines counts of two corpus shards, `other` following `self`
    pub(super) fn merge(mut self, other: Self) -> Self {
        self.unigrams.merge(other.unigrams);
        for (mine, theirs) in self.contexts.iter_mut().zip(other.contexts) {
            mine.merge(theirs);
        }
        self.sentences += other.sentences;
        self
    }

    /// One synthetic observation of the unknown symbol,
    /// so unseen words never get a zero unigram probability
    #[inline]
    pub(super) fn seed_unknown(&mut self, sentinels: &Sentinels) {
        self.unigrams.increment(sentinels.unknown.clone(), 1.0);
    }

    pub(super) fn normalized(&self) -> Self {
        let mut normalized = self.clone();
        normalized.unigrams.normalize();
        normalized
            .contexts
            .iter_mut()
            .for_each(ConditionalFrequencyTable::normalize_all);
        normalized
    }

    /// Table of contexts with `len` preceding tokens
    #[inline]
    pub(super) fn context_table(&self, len: usize) -> &ContextTable {
        debug_assert!((1..=CONTEXT_MAX_LEN).contains(&len));
        &self.contexts[len - 1]
    }
}

/// Rejects empty tokens and tokens clashing with the sentinels
pub(super) fn validate_sentence<T: AsRef<str>>(
    index: usize,
    sentence: &[T],
    sentinels: &Sentinels,
) -> Result<(), BuildError> {
    for (position, token) in sentence.iter().enumerate() {
        let token = token.as_ref();
        if token.is_empty() {
            return Err(BuildError::EmptyToken {
                sentence: index,
                position,
            });
        }
        if sentinels.contains(token) {
            return Err(BuildError::ReservedToken {
                sentence: index,
                position,
                token: token.into(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn tables(order: NgramOrder, corpus: &[&[&str]]) -> Tables {
        let sentinels = Sentinels::default();
        let mut tables = Tables::default();
        for sentence in corpus {
            tables.add_sentence(&sentinels.bracket(sentence, order), order);
        }
        tables
    }

    fn context(tokens: &[&str]) -> Context {
        tokens.iter().map(|&t| Token::from(t)).collect()
    }

    #[test]
    fn test_bigram_counts() {
        let t = tables(NgramOrder::Bi, &[&["the", "cat"], &["the", "dog"]]);

        assert_eq!(t.sentences, 2);
        assert_eq!(t.unigrams.get("the"), 2.0);
        assert_eq!(t.unigrams.get("</S>"), 2.0);
        assert_eq!(t.unigrams.get("<S>"), 0.0);
        assert_eq!(t.context_table(1).get(&context(&["<S>"]), "the"), 2.0);
        assert_eq!(t.context_table(1).get(&context(&["the"]), "cat"), 1.0);
        assert!(t.context_table(2).is_empty());
    }

    #[test]
    fn test_trigram_counts() {
        let t = tables(NgramOrder::Tri, &[&["a", "b"], &["a", "c"]]);

        assert_eq!(t.context_table(2).get(&context(&["<S>", "<S>"]), "a"), 2.0);
        assert_eq!(t.context_table(2).get(&context(&["<S>", "a"]), "b"), 1.0);
        assert_eq!(t.context_table(2).get(&context(&["a", "c"]), "</S>"), 1.0);
        assert_eq!(t.context_table(1).get(&context(&["<S>"]), "a"), 2.0);
        assert_eq!(t.context_table(1).get(&context(&["b"]), "</S>"), 1.0);
    }

    #[test]
    fn test_structural_contexts_do_not_collide() {
        let t = tables(NgramOrder::Tri, &[&["a b", "c", "x"], &["a", "b c", "y"]]);

        assert_eq!(t.context_table(2).get(&context(&["a b", "c"]), "x"), 1.0);
        assert_eq!(t.context_table(2).get(&context(&["a b", "c"]), "y"), 0.0);
        assert_eq!(t.context_table(2).get(&context(&["a", "b c"]), "y"), 1.0);
    }

    #[test]
    fn test_slice_lookup_matches_context_key() {
        let t = tables(NgramOrder::Bi, &[&["the", "cat"]]);
        let key = [Token::from("the")];
        assert_eq!(t.context_table(1).get(&key[..], "cat"), 1.0);
    }

    #[test]
    fn test_normalized_clone() {
        let mut raw = tables(NgramOrder::Bi, &[&["the", "cat"], &["the", "dog"]]);
        raw.seed_unknown(&Sentinels::default());
        let normalized = raw.normalized();

        assert_eq!(raw.unigrams.get("*UNKNOWN*"), 1.0);
        assert!(approx_eq!(f64, normalized.unigrams.get("*UNKNOWN*"), 1.0 / 7.0));
        assert!(approx_eq!(f64, normalized.context_table(1).get(&context(&["the"]), "cat"), 0.5));
        assert_eq!(raw.context_table(1).get(&context(&["the"]), "cat"), 1.0);
        assert_eq!(
            raw.unigrams.keys().collect::<Vec<_>>(),
            normalized.unigrams.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_merge_equals_single_pass() {
        let corpus: &[&[&str]] = &[&["a", "b"], &["c", "a"], &["b", "b", "d"]];
        let whole = tables(NgramOrder::Tri, corpus);
        let merged =
            tables(NgramOrder::Tri, &corpus[..1]).merge(tables(NgramOrder::Tri, &corpus[1..]));

        assert_eq!(whole.sentences, merged.sentences);
        assert_eq!(
            whole.unigrams.iter().collect::<Vec<_>>(),
            merged.unigrams.iter().collect::<Vec<_>>()
        );
        for len in 1..=2 {
            let (w, m) = (whole.context_table(len), merged.context_table(len));
            assert_eq!(w.contexts().collect::<Vec<_>>(), m.contexts().collect::<Vec<_>>());
            for (ctx, counter) in w.iter() {
                for (word, count) in counter.iter() {
                    assert_eq!(m.get(ctx, word), count);
                }
            }
        }
    }

    #[test]
    fn test_validate_sentence() {
        let sentinels = Sentinels::default();
        assert!(validate_sentence(0, &["a", "b"], &sentinels).is_ok());
        assert!(matches!(
            validate_sentence(3, &["a", ""], &sentinels),
            Err(BuildError::EmptyToken { sentence: 3, position: 1 })
        ));
        assert!(matches!(
            validate_sentence(1, &["</S>"], &sentinels),
            Err(BuildError::ReservedToken { sentence: 1, position: 0, .. })
        ));
    }
}
