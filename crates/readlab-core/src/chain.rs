//! Word-level Markov chain fitted once from a corpus.
//!
//! States are the two preceding words; transition weights are raw
//! occurrence counts from the source sentences. The chain itself is
//! immutable after fitting and safe to share across calls.

use std::collections::HashMap;

use rand::Rng;

use crate::corpus::Corpus;

/// Number of preceding words a chain state carries.
const STATE_SIZE: usize = 2;

/// Sentinel tokens padding sentence starts and marking sentence ends.
/// Control characters: whitespace tokenization never produces them.
const BEGIN: &str = "\u{2}";
const END: &str = "\u{3}";

/// Outgoing transitions for one state.
///
/// Counts keep insertion order so a seeded walk is reproducible.
#[derive(Debug, Clone, Default)]
struct Transitions {
    counts: Vec<(String, u32)>,
    total: u32,
}

impl Transitions {
    fn record(&mut self, word: &str) {
        self.total += 1;
        match self.counts.iter_mut().find(|(w, _)| w == word) {
            Some(entry) => entry.1 += 1,
            None => self.counts.push((word.to_owned(), 1)),
        }
    }

    /// Weighted draw proportional to occurrence counts.
    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.total == 0 {
            return None;
        }
        let mut remaining = rng.random_range(0..self.total);
        for (word, count) in &self.counts {
            if remaining < *count {
                return Some(word);
            }
            remaining -= count;
        }
        None
    }
}

/// An order-2 word chain.
#[derive(Debug, Clone)]
pub struct MarkovChain {
    transitions: HashMap<(String, String), Transitions>,
}

impl MarkovChain {
    /// Fits the chain from a corpus's tokenized sentences.
    pub fn fit(corpus: &Corpus) -> Self {
        let mut transitions: HashMap<(String, String), Transitions> = HashMap::new();
        for words in corpus.sentences() {
            let mut run: Vec<&str> = Vec::with_capacity(words.len() + STATE_SIZE + 1);
            run.extend([BEGIN; STATE_SIZE]);
            run.extend(words.iter().map(String::as_str));
            run.push(END);
            for window in run.windows(STATE_SIZE + 1) {
                let state = (window[0].to_owned(), window[1].to_owned());
                transitions.entry(state).or_default().record(window[2]);
            }
        }
        Self { transitions }
    }

    /// Whether the chain has no states (empty corpus).
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Number of distinct states.
    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    /// Walks from the sentence-start state to a sentence end, drawing each
    /// next word in proportion to its training count.
    ///
    /// Returns `None` when the chain is empty. Termination holds with
    /// probability one: every reachable state was observed in training and
    /// its training continuation leads to the end marker.
    pub fn walk<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vec<String>> {
        let mut state = (BEGIN.to_owned(), BEGIN.to_owned());
        let mut words = Vec::new();
        loop {
            let next = self.transitions.get(&state)?.pick(rng)?.to_owned();
            if next == END {
                break;
            }
            state = (state.1, next.clone());
            words.push(next);
        }
        if words.is_empty() {
            None
        } else {
            Some(words)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fit_records_sentence_windows() {
        let corpus = Corpus::from_text("a b c.");
        let chain = MarkovChain::fit(&corpus);
        // (B,B)->a, (B,a)->b, (a,b)->c., (b,c.)->E
        assert_eq!(chain.state_count(), 4);
    }

    #[test]
    fn walk_on_single_sentence_corpus_is_deterministic() {
        let corpus = Corpus::from_text("a b c.");
        let chain = MarkovChain::fit(&corpus);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            let words = chain.walk(&mut rng).unwrap();
            assert_eq!(words, vec!["a", "b", "c."]);
        }
    }

    #[test]
    fn walk_follows_observed_branches() {
        let corpus = Corpus::from_text("the cat sat. the dog sat.");
        let chain = MarkovChain::fit(&corpus);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let words = chain.walk(&mut rng).unwrap();
            assert_eq!(words.len(), 3);
            assert_eq!(words[0], "the");
            assert!(words[1] == "cat" || words[1] == "dog");
            assert_eq!(words[2], "sat.");
        }
    }

    #[test]
    fn walk_on_empty_chain_yields_none() {
        let corpus = Corpus::from_text("");
        let chain = MarkovChain::fit(&corpus);
        assert!(chain.is_empty());
        let mut rng = StdRng::seed_from_u64(3);
        assert!(chain.walk(&mut rng).is_none());
    }
}
