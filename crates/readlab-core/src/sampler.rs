//! Length-constrained vocabulary sampling for word-reading quizzes.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::corpus::WordBank;

/// Draws random exact-length subsets from a word bank.
#[derive(Debug, Clone)]
pub struct WordSampler {
    bank: WordBank,
}

impl WordSampler {
    pub fn new(bank: WordBank) -> Self {
        Self { bank }
    }

    /// The underlying word bank.
    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    /// Up to `count` tokens of exactly `length` characters, drawn without
    /// replacement, in uniformly random order.
    ///
    /// A pool smaller than `count` degrades to the whole pool; an empty
    /// pool yields an empty result. Neither is an error.
    pub fn sample<R: Rng + ?Sized>(&self, length: usize, count: usize, rng: &mut R) -> Vec<String> {
        let mut pool = self.bank.of_length(length);
        pool.shuffle(rng);
        pool.truncate(count);
        pool.into_iter().map(str::to_owned).collect()
    }
}
