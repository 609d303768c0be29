//! Sentence synthesis with a novelty guard and a bounded fallback.
//!
//! Each requested sentence is drawn independently: up to
//! [`GenerationPolicy::max_tries`] guarded walks, then a short-sentence
//! fallback with the guard waived, then `None`. The retry ceiling bounds
//! worst-case latency per item.

use rand::Rng;

use crate::chain::MarkovChain;
use crate::corpus::Corpus;

/// Bounded retry policy for one sentence draw.
#[derive(Debug, Clone)]
pub struct GenerationPolicy {
    /// Walk attempts before giving up on a novelty-guarded candidate.
    pub max_tries: u32,
    /// Largest share of a candidate's own word count allowed to match a
    /// contiguous run in the source text.
    pub max_overlap_ratio: f64,
    /// Absolute cap on the allowed run length, in words.
    pub max_overlap_total: usize,
    /// Character cap accepted by the fallback short sentence.
    pub fallback_max_chars: usize,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            max_tries: 100,
            max_overlap_ratio: 0.7,
            max_overlap_total: 15,
            fallback_max_chars: 120,
        }
    }
}

/// Per-language sentence generator: a fitted chain plus the corpus it was
/// fitted from (kept for the novelty guard).
#[derive(Debug, Clone)]
pub struct SentenceGenerator {
    chain: MarkovChain,
    corpus: Corpus,
    policy: GenerationPolicy,
}

impl SentenceGenerator {
    /// Fits a generator with the default policy.
    pub fn fit(corpus: Corpus) -> Self {
        Self::with_policy(corpus, GenerationPolicy::default())
    }

    /// Fits a generator with an explicit policy.
    pub fn with_policy(corpus: Corpus, policy: GenerationPolicy) -> Self {
        let chain = MarkovChain::fit(&corpus);
        if chain.is_empty() {
            tracing::warn!("corpus has no usable sentences; generation will yield null items");
        }
        Self {
            chain,
            corpus,
            policy,
        }
    }

    /// The active policy.
    pub fn policy(&self) -> &GenerationPolicy {
        &self.policy
    }

    /// Produces exactly `n` sentences, each drawn independently.
    ///
    /// An entry is `None` only when both the guarded budget and the
    /// fallback budget come up empty; callers must tolerate null items.
    pub fn generate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Option<String>> {
        (0..n).map(|_| self.sentence(rng)).collect()
    }

    /// One guarded draw with fallback.
    fn sentence<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        for _ in 0..self.policy.max_tries {
            match self.chain.walk(rng) {
                Some(words) if self.is_novel(&words) => return Some(words.join(" ")),
                Some(_) => continue,
                // Empty chain: retrying cannot produce anything.
                None => break,
            }
        }
        tracing::debug!("novelty budget exhausted, trying short-sentence fallback");
        self.short_sentence(rng)
    }

    /// Fallback draw: same chain, guard waived, length capped.
    fn short_sentence<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        for _ in 0..self.policy.max_tries {
            match self.chain.walk(rng) {
                Some(words) => {
                    let sentence = words.join(" ");
                    if sentence.chars().count() <= self.policy.fallback_max_chars {
                        return Some(sentence);
                    }
                }
                None => break,
            }
        }
        None
    }

    /// The novelty guard: a candidate is rejected when any contiguous run
    /// of `min(round(ratio × word_count), total_cap) + 1` words appears
    /// verbatim in the source text. Candidates shorter than the allowed
    /// run are rejected only as verbatim copies.
    fn is_novel(&self, words: &[String]) -> bool {
        let overlap_max = ((self.policy.max_overlap_ratio * words.len() as f64).round() as usize)
            .min(self.policy.max_overlap_total);
        let run = overlap_max + 1;
        if run >= words.len() {
            return !self.corpus.contains_run(words);
        }
        !words.windows(run).any(|gram| self.corpus.contains_run(gram))
    }
}
