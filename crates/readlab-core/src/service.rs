//! Quiz content orchestration.
//!
//! The [`ContentLibrary`] is the process-wide immutable content state:
//! corpora and word banks are loaded and models fitted once at startup,
//! then shared read-only for the process lifetime (rebuilt only by a
//! restart). The [`QuizContentService`] owns the injected library and
//! dispatches quiz requests to the generator or sampler.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ContentConfig;
use crate::corpus::{Corpus, WordBank};
use crate::error::ContentError;
use crate::generator::SentenceGenerator;
use crate::model::{Language, QuizSpec, QuizType};
use crate::sampler::WordSampler;

/// Per-language fitted generators and samplers.
#[derive(Debug, Default)]
pub struct ContentLibrary {
    generators: BTreeMap<Language, SentenceGenerator>,
    samplers: BTreeMap<Language, WordSampler>,
}

/// What one registered language can serve.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LanguageSupport {
    pub language: Language,
    pub sentences: bool,
    pub words: bool,
}

impl ContentLibrary {
    /// An empty library; content is added with the insert methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every configured language's sources and fits its models.
    pub fn from_config(config: &ContentConfig) -> Result<Self> {
        let mut library = Self::new();
        for (language, sources) in &config.languages {
            let corpus = Corpus::load(&sources.corpus)
                .with_context(|| format!("loading {language} corpus"))?;
            tracing::info!(%language, sentences = corpus.len(), "loaded corpus");
            library.insert_corpus(*language, corpus);

            if let Some(words_path) = &sources.words {
                let bank = WordBank::load(words_path)
                    .with_context(|| format!("loading {language} word list"))?;
                tracing::info!(%language, words = bank.len(), "loaded word bank");
                library.insert_word_bank(*language, bank);
            }
        }
        Ok(library)
    }

    /// Registers a corpus, fitting its sentence generator.
    pub fn insert_corpus(&mut self, language: Language, corpus: Corpus) {
        self.generators.insert(language, SentenceGenerator::fit(corpus));
    }

    /// Registers a word bank for word quizzes.
    pub fn insert_word_bank(&mut self, language: Language, bank: WordBank) {
        self.samplers.insert(language, WordSampler::new(bank));
    }

    pub fn generator(&self, language: Language) -> Option<&SentenceGenerator> {
        self.generators.get(&language)
    }

    pub fn sampler(&self, language: Language) -> Option<&WordSampler> {
        self.samplers.get(&language)
    }

    /// Whether any content at all is registered for the language.
    pub fn supports(&self, language: Language) -> bool {
        self.generators.contains_key(&language) || self.samplers.contains_key(&language)
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty() && self.samplers.is_empty()
    }

    /// Registered languages with their supported quiz types, in stable
    /// order.
    pub fn languages(&self) -> Vec<LanguageSupport> {
        Language::ALL
            .iter()
            .filter(|l| self.supports(**l))
            .map(|l| LanguageSupport {
                language: *l,
                sentences: self.generators.contains_key(l),
                words: self.samplers.contains_key(l),
            })
            .collect()
    }
}

/// A generated quiz payload, shaped for the outer rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuizContent {
    /// Sentence-reading quiz: null entries mark total fallback exhaustion.
    Sentences { question: Vec<Option<String>> },
    /// Word-reading quiz.
    Words { words: Vec<String> },
}

impl QuizContent {
    /// Number of items in the payload.
    pub fn len(&self) -> usize {
        match self {
            QuizContent::Sentences { question } => question.len(),
            QuizContent::Words { words } => words.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Translates a [`QuizSpec`] into its question payload.
#[derive(Debug)]
pub struct QuizContentService {
    library: ContentLibrary,
}

impl QuizContentService {
    /// Builds the service around an already-loaded library.
    pub fn new(library: ContentLibrary) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &ContentLibrary {
        &self.library
    }

    /// Produces exactly `n` sentences in `language`.
    pub fn sentences<R: Rng + ?Sized>(
        &self,
        language: Language,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Option<String>>, ContentError> {
        match self.library.generator(language) {
            Some(generator) => Ok(generator.generate(n, rng)),
            None => Err(self.unsupported(language, QuizType::Sentence)),
        }
    }

    /// Samples up to `count` words of exact `length` in `language`.
    pub fn words<R: Rng + ?Sized>(
        &self,
        language: Language,
        length: usize,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<String>, ContentError> {
        match self.library.sampler(language) {
            Some(sampler) => Ok(sampler.sample(length, count, rng)),
            None => Err(self.unsupported(language, QuizType::Word)),
        }
    }

    /// Dispatches a quiz request to the generator or the sampler.
    ///
    /// Output cardinality matches `spec.count` for sentence quizzes; word
    /// quizzes may degrade to a smaller pool.
    pub fn quiz_content<R: Rng + ?Sized>(
        &self,
        spec: &QuizSpec,
        rng: &mut R,
    ) -> Result<QuizContent, ContentError> {
        match spec.quiz_type {
            QuizType::Sentence => Ok(QuizContent::Sentences {
                question: self.sentences(spec.language, spec.count, rng)?,
            }),
            QuizType::Word => {
                let length = match spec.word_length {
                    Some(length) if length > 0 => length,
                    _ => return Err(ContentError::MissingWordLength),
                };
                Ok(QuizContent::Words {
                    words: self.words(spec.language, length, spec.count, rng)?,
                })
            }
        }
    }

    /// A language with no content at all is unsupported outright; one that
    /// is registered but lacks the requested facet fails on the quiz type.
    fn unsupported(&self, language: Language, quiz_type: QuizType) -> ContentError {
        if self.library.supports(language) {
            ContentError::UnsupportedQuizType {
                language,
                quiz_type,
            }
        } else {
            ContentError::UnsupportedLanguage(language)
        }
    }
}
