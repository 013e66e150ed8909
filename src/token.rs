use crate::order::{NgramOrder, CONTEXT_MAX_LEN};
use arrayvec::ArrayVec;
use compact_str::CompactString;

pub type Token = CompactString;

/// Preceding tokens of a prediction, oldest first.
/// Structural, so tokens containing spaces never collide.
pub type Context = ArrayVec<Token, CONTEXT_MAX_LEN>;

/// Reserved boundary and out-of-vocabulary symbols.
///
/// They must be pairwise distinct, non-empty and never occur in a corpus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sentinels {
    pub(crate) start: Token,
    pub(crate) stop: Token,
    pub(crate) unknown: Token,
}

impl Default for Sentinels {
    #[inline]
    fn default() -> Self {
        Self {
            start: Token::const_new(Self::START),
            stop: Token::const_new(Self::STOP),
            unknown: Token::const_new(Self::UNKNOWN),
        }
    }
}

impl Sentinels {
    pub const START: &'static str = "<S>";
    pub const STOP: &'static str = "</S>";
    pub const UNKNOWN: &'static str = "*UNKNOWN*";

    #[inline]
    pub fn new(start: &str, stop: &str, unknown: &str) -> Self {
        Self {
            start: start.into(),
            stop: stop.into(),
            unknown: unknown.into(),
        }
    }

    #[inline(always)]
    pub fn start(&self) -> &str {
        &self.start
    }

    #[inline(always)]
    pub fn stop(&self) -> &str {
        &self.stop
    }

    #[inline(always)]
    pub fn unknown(&self) -> &str {
        &self.unknown
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.start == token || self.stop == token || self.unknown == token
    }

    #[inline]
    pub(crate) fn is_valid(&self) -> bool {
        !self.start.is_empty()
            && !self.stop.is_empty()
            && !self.unknown.is_empty()
            && self.start != self.stop
            && self.start != self.unknown
            && self.stop != self.unknown
    }

    /// `(order - 1)` start sentinels, the sentence, one stop sentinel
    pub(crate) fn bracket<T: AsRef<str>>(&self, sentence: &[T], order: NgramOrder) -> Vec<Token> {
        let context_len = order.context_len();
        let mut bracketed = Vec::with_capacity(sentence.len() + context_len + 1);
        bracketed.extend((0..context_len).map(|_| self.start.clone()));
        bracketed.extend(sentence.iter().map(|t| Token::from(t.as_ref())));
        bracketed.push(self.stop.clone());
        bracketed
    }

    /// Last `order - 1` tokens of `preceding`, left-padded with start sentinels
    pub(crate) fn context<T: AsRef<str>>(&self, preceding: &[T], order: NgramOrder) -> Context {
        let context_len = order.context_len();
        let taken = preceding.len().min(context_len);
        let mut context = Context::new_const();
        for _ in taken..context_len {
            context.push(self.start.clone());
        }
        for t in &preceding[preceding.len() - taken..] {
            context.push(Token::from(t.as_ref()));
        }
        context
    }
}
