//! Core data model types for readlab.
//!
//! These are the fundamental types the rest of the system uses to describe
//! quiz requests and completed quiz attempts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Languages the practice-content pipeline knows about.
///
/// A language value does not imply content is loaded for it; the
/// [`ContentLibrary`](crate::service::ContentLibrary) decides that from
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Tagalog,
}

impl Language {
    /// All known languages, in a stable order.
    pub const ALL: [Language; 2] = [Language::English, Language::Tagalog];
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "english"),
            Language::Tagalog => write!(f, "tagalog"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "tagalog" | "tl" => Ok(Language::Tagalog),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

/// The two kinds of reading quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizType {
    /// Read generated sentences aloud.
    Sentence,
    /// Read sampled vocabulary words of a fixed length.
    Word,
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizType::Sentence => write!(f, "sentence"),
            QuizType::Word => write!(f, "word"),
        }
    }
}

impl FromStr for QuizType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sentence" | "sentences" => Ok(QuizType::Sentence),
            "word" | "words" => Ok(QuizType::Word),
            other => Err(format!("unknown quiz type: {other}")),
        }
    }
}

/// A single content-generation request.
///
/// Transient: exists only for the duration of one generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSpec {
    /// Language to generate content in.
    pub language: Language,
    /// Which kind of quiz to build.
    pub quiz_type: QuizType,
    /// Number of items requested. Zero is valid and yields empty content.
    pub count: usize,
    /// Exact character length for word quizzes. Ignored for sentence
    /// quizzes; must be positive for word quizzes.
    #[serde(default)]
    pub word_length: Option<usize>,
}

impl QuizSpec {
    /// A sentence-reading quiz request.
    pub fn sentences(language: Language, count: usize) -> Self {
        Self {
            language,
            quiz_type: QuizType::Sentence,
            count,
            word_length: None,
        }
    }

    /// A word-reading quiz request.
    pub fn words(language: Language, count: usize, word_length: usize) -> Self {
        Self {
            language,
            quiz_type: QuizType::Word,
            count,
            word_length: Some(word_length),
        }
    }
}

/// One learner's completed quiz with its measured outcomes.
///
/// Consumed, never produced, by this crate: records are created by the
/// outer submission layer (see [`crate::ingest`]) and are immutable once
/// ingested. Numeric fields default to zero when the submission omitted
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    /// Record identifier.
    pub id: Uuid,
    /// The learner who took the quiz.
    pub learner_id: u64,
    /// Quiz language, when the submission carried one.
    #[serde(default)]
    pub language: Option<Language>,
    /// Quiz kind, when the submission carried one.
    #[serde(default)]
    pub quiz_type: Option<QuizType>,
    /// How many items the quiz contained.
    #[serde(default)]
    pub question_count: u32,
    /// Word length parameter for word quizzes.
    #[serde(default)]
    pub word_length: u32,
    /// Elapsed-time budget in seconds.
    #[serde(default)]
    pub time_limit_secs: u32,
    /// When the quiz was completed.
    pub taken_at: DateTime<Utc>,
    /// Reading speed in words per minute (sentence quizzes).
    #[serde(default)]
    pub speed: f64,
    /// Accuracy percentage (word quizzes).
    #[serde(default)]
    pub correctness: f64,
    /// Stutter miscue count.
    #[serde(default)]
    pub stutter: f64,
    /// Repetition miscue count.
    #[serde(default)]
    pub repetition: f64,
    /// Total pause duration in seconds.
    #[serde(default)]
    pub pause: f64,
    /// Pronunciation score percentage.
    #[serde(default)]
    pub pronunciation: f64,
    /// Total words read.
    #[serde(default)]
    pub total_words: u32,
    /// Mentor's free-text comment.
    #[serde(default)]
    pub comment: String,
    /// Overall score percentage.
    #[serde(default)]
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_display_and_parse() {
        assert_eq!(Language::English.to_string(), "english");
        assert_eq!(Language::Tagalog.to_string(), "tagalog");
        assert_eq!("english".parse::<Language>().unwrap(), Language::English);
        assert_eq!("Tagalog".parse::<Language>().unwrap(), Language::Tagalog);
        assert_eq!("tl".parse::<Language>().unwrap(), Language::Tagalog);
        assert!("french".parse::<Language>().is_err());
    }

    #[test]
    fn quiz_type_display_and_parse() {
        assert_eq!(QuizType::Sentence.to_string(), "sentence");
        assert_eq!("word".parse::<QuizType>().unwrap(), QuizType::Word);
        assert_eq!("Sentences".parse::<QuizType>().unwrap(), QuizType::Sentence);
        assert!("essay".parse::<QuizType>().is_err());
    }

    #[test]
    fn quiz_spec_constructors() {
        let spec = QuizSpec::sentences(Language::English, 5);
        assert_eq!(spec.quiz_type, QuizType::Sentence);
        assert_eq!(spec.count, 5);
        assert!(spec.word_length.is_none());

        let spec = QuizSpec::words(Language::Tagalog, 10, 4);
        assert_eq!(spec.quiz_type, QuizType::Word);
        assert_eq!(spec.word_length, Some(4));
    }

    #[test]
    fn quiz_attempt_serde_roundtrip() {
        let attempt = QuizAttempt {
            id: Uuid::nil(),
            learner_id: 7,
            language: Some(Language::Tagalog),
            quiz_type: Some(QuizType::Word),
            question_count: 10,
            word_length: 4,
            time_limit_secs: 60,
            taken_at: "2026-08-01T10:00:00Z".parse().unwrap(),
            speed: 82.5,
            correctness: 90.0,
            stutter: 2.0,
            repetition: 1.0,
            pause: 3.5,
            pronunciation: 88.0,
            total_words: 40,
            comment: "steady improvement".into(),
            score: 89.0,
        };
        let json = serde_json::to_string(&attempt).unwrap();
        let back: QuizAttempt = serde_json::from_str(&json).unwrap();
        assert_eq!(back.learner_id, 7);
        assert_eq!(back.language, Some(Language::Tagalog));
        assert_eq!(back.score, 89.0);
    }

    #[test]
    fn quiz_attempt_numeric_fields_default_to_zero() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "learner_id": 1,
            "taken_at": "2026-08-01T10:00:00Z"
        }"#;
        let attempt: QuizAttempt = serde_json::from_str(json).unwrap();
        assert_eq!(attempt.speed, 0.0);
        assert_eq!(attempt.score, 0.0);
        assert_eq!(attempt.total_words, 0);
        assert!(attempt.comment.is_empty());
    }
}
