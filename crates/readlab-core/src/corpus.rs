//! Corpus and word-bank sources.
//!
//! Both are immutable once loaded: files are read once at startup and the
//! resulting structures are shared read-only for the process lifetime.

use std::path::Path;

use anyhow::{Context, Result};

/// A block of natural-language text, split into tokenized sentences, used
/// to fit a sentence model.
///
/// Also keeps the corpus re-joined from its own tokens so the generator's
/// novelty guard can check candidate word runs against the source text.
#[derive(Debug, Clone)]
pub struct Corpus {
    sentences: Vec<Vec<String>>,
    rejoined: String,
}

impl Corpus {
    /// Builds a corpus from raw text.
    ///
    /// Sentences end at `.`, `!` or `?` (kept attached to their word) or at
    /// a line break. Empty sentences are dropped.
    pub fn from_text(text: &str) -> Self {
        let sentences = split_sentences(text);
        let rejoined = sentences
            .iter()
            .map(|words| words.join(" "))
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            sentences,
            rejoined,
        }
    }

    /// Reads a UTF-8 text file and builds a corpus from it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read corpus from {}", path.display()))?;
        Ok(Self::from_text(&text))
    }

    /// The tokenized sentences.
    pub fn sentences(&self) -> &[Vec<String>] {
        &self.sentences
    }

    /// Number of sentences.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Whether no usable sentences were found.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Whether the given contiguous word run appears verbatim in the
    /// source text (runs may span sentence boundaries).
    pub fn contains_run(&self, words: &[String]) -> bool {
        self.rejoined.contains(&words.join(" "))
    }
}

/// An ordered vocabulary list for one language.
///
/// Loaded from a plain text file, one token per line; blank lines are
/// skipped. Tokens are not de-duplicated: uniqueness is the source list's
/// responsibility.
#[derive(Debug, Clone)]
pub struct WordBank {
    words: Vec<String>,
}

impl WordBank {
    /// Builds a word bank from newline-separated text.
    pub fn from_text(text: &str) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_owned)
            .collect();
        Self { words }
    }

    /// Reads a UTF-8 word-list file, one token per line.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read word list from {}", path.display()))?;
        Ok(Self::from_text(&text))
    }

    /// All tokens, in source order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the bank holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Tokens whose character length (Unicode scalars, not bytes) is
    /// exactly `length`.
    pub fn of_length(&self, length: usize) -> Vec<&str> {
        self.words
            .iter()
            .filter(|w| w.chars().count() == length)
            .map(String::as_str)
            .collect()
    }
}

/// Splits raw text into tokenized sentences.
fn split_sentences(text: &str) -> Vec<Vec<String>> {
    let mut sentences = Vec::new();
    for line in text.lines() {
        let mut current: Vec<String> = Vec::new();
        for word in line.split_whitespace() {
            current.push(word.to_owned());
            if ends_sentence(word) {
                sentences.push(std::mem::take(&mut current));
            }
        }
        // A line break terminates any sentence left open.
        if !current.is_empty() {
            sentences.push(current);
        }
    }
    sentences
}

/// Whether a token closes a sentence: it ends with `.`, `!` or `?`,
/// optionally followed by closing quotes or brackets.
fn ends_sentence(word: &str) -> bool {
    word.trim_end_matches(['"', '\'', ')', ']'])
        .ends_with(['.', '!', '?'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        let corpus = Corpus::from_text("The cat sat. The dog ran! Did it rain?");
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.sentences()[0], vec!["The", "cat", "sat."]);
        assert_eq!(corpus.sentences()[2], vec!["Did", "it", "rain?"]);
    }

    #[test]
    fn splits_on_line_breaks() {
        let corpus = Corpus::from_text("one two three\nfour five\n\nsix.");
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.sentences()[1], vec!["four", "five"]);
    }

    #[test]
    fn keeps_closing_quotes_on_sentence_end() {
        let corpus = Corpus::from_text("\"Stop!\" she said.");
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.sentences()[0], vec!["\"Stop!\""]);
    }

    #[test]
    fn empty_text_yields_empty_corpus() {
        let corpus = Corpus::from_text("   \n  \n");
        assert!(corpus.is_empty());
    }

    #[test]
    fn contains_run_matches_source_text() {
        let corpus = Corpus::from_text("The quick brown fox jumps over the lazy dog.");
        let run: Vec<String> = ["quick", "brown", "fox"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(corpus.contains_run(&run));

        let missing: Vec<String> = ["quick", "lazy", "fox"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(!corpus.contains_run(&missing));
    }

    #[test]
    fn contains_run_spans_sentence_boundaries() {
        let corpus = Corpus::from_text("It was late. Rain fell hard.");
        let run: Vec<String> = ["late.", "Rain"].iter().map(|s| s.to_string()).collect();
        assert!(corpus.contains_run(&run));
    }

    #[test]
    fn word_bank_skips_blank_lines() {
        let bank = WordBank::from_text("araw\n\n  buhay  \n\ntala\n");
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.words(), ["araw", "buhay", "tala"]);
    }

    #[test]
    fn of_length_counts_characters_not_bytes() {
        let bank = WordBank::from_text("mañana\nseñor\nbahay\nluz");
        let five: Vec<&str> = bank.of_length(5);
        assert_eq!(five, vec!["señor", "bahay"]);
        assert_eq!(bank.of_length(3), vec!["luz"]);
        assert!(bank.of_length(9).is_empty());
    }
}
