use ::std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};
use sentgram::{NgramModel, Smoothing};

/// One sentence per line, tokens split on whitespace, blank lines skipped
pub fn read_corpus(path: &Path) -> io::Result<Vec<Vec<String>>> {
    read_sentences(BufReader::new(File::open(path)?))
}

pub fn read_sentences(reader: impl BufRead) -> io::Result<Vec<Vec<String>>> {
    let mut sentences = Vec::new();
    for line in reader.lines() {
        let sentence = tokenize(&line?);
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
    }

    Ok(sentences)
}

#[inline]
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

/// Log probability of a held-out corpus, summed per word
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeldOutScore {
    pub sentences: usize,
    pub log_probability: f64,
    /// Words plus one stop symbol per sentence
    pub predictions: usize,
}

impl HeldOutScore {
    pub fn new<S: AsRef<[T]>, T: AsRef<str>>(
        model: &NgramModel,
        sentences: &[S],
        smoothing: Smoothing,
    ) -> Self {
        let mut log_probability = 0.0;
        let mut predictions = 0;
        for sentence in sentences {
            let sentence = sentence.as_ref();
            log_probability += model.sentence_log_probability_with(sentence, smoothing);
            predictions += sentence.len() + 1;
        }

        Self {
            sentences: sentences.len(),
            log_probability,
            predictions,
        }
    }

    #[inline]
    pub fn perplexity(&self) -> f64 {
        (-self.log_probability / self.predictions.max(1) as f64).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentgram::{ModelBuilder, NgramOrder};

    #[test]
    fn test_read_sentences() {
        let text = "the cat  sat\n\n  \nthe\tdog ran \n";
        let sentences = read_sentences(text.as_bytes()).unwrap();
        assert_eq!(
            sentences,
            [vec!["the", "cat", "sat"], vec!["the", "dog", "ran"]]
        );
    }

    #[test]
    fn test_long_held_out_line_is_finite() {
        let model = ModelBuilder::new(NgramOrder::Tri)
            .build([["the", "cat", "sat"], ["the", "dog", "ran"]])
            .unwrap();
        let line: Vec<_> = ["the", "cat", "sat", "the", "dog", "ran"]
            .into_iter()
            .cycle()
            .take(1200)
            .collect();

        for smoothing in [Smoothing::Fixed, Smoothing::WittenBell] {
            let score = HeldOutScore::new(&model, &[&line], smoothing);
            assert_eq!(score.sentences, 1);
            assert_eq!(score.predictions, 1201);
            assert!(score.log_probability.is_finite(), "{smoothing:?} {score:?}");
            assert!(score.perplexity().is_finite() && score.perplexity() >= 1.0);
        }
    }
}
