use strum::EnumCount;
use strum_macros::{EnumCount, EnumIter};
use thiserror::Error;

/// Highest supported order
pub(crate) const ORDER_MAX: usize = 3;
/// Longest context (`ORDER_MAX - 1` preceding tokens)
pub(crate) const CONTEXT_MAX_LEN: usize = ORDER_MAX - 1;

/// Order of the Markov model, the length of the longest n-gram it counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, EnumCount, EnumIter)]
#[repr(usize)]
pub enum NgramOrder {
    #[default]
    Bi = 2,
    Tri = 3,
}

impl NgramOrder {
    /// Number of preceding tokens a prediction is conditioned on
    #[inline(always)]
    pub const fn context_len(self) -> usize {
        self as usize - 1
    }

    #[inline(always)]
    pub const fn as_usize(self) -> usize {
        self as usize
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Unsupported ngram order {0}, expected 2 or 3")]
pub struct OrderError(pub usize);

impl TryFrom<usize> for NgramOrder {
    type Error = OrderError;

    #[inline]
    fn try_from(v: usize) -> Result<Self, Self::Error> {
        match v {
            2 => Ok(Self::Bi),
            3 => Ok(Self::Tri),
            _ => Err(OrderError(v)),
        }
    }
}

const _: () = assert!(NgramOrder::COUNT == ORDER_MAX - 1);
