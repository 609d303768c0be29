//! Content and ingestion error types.
//!
//! Defined here so callers can classify failures without string matching.
//! All of these are recoverable at the call boundary: a failed generation
//! or a malformed submission never takes the process down.

use thiserror::Error;

use crate::model::{Language, QuizType};

/// Errors from quiz content generation and sampling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// The language has no registered corpus or word bank at all.
    #[error("no content registered for language: {0}")]
    UnsupportedLanguage(Language),

    /// The language is registered, but not for this kind of quiz.
    #[error("no {quiz_type} quiz content for language: {language}")]
    UnsupportedQuizType {
        language: Language,
        quiz_type: QuizType,
    },

    /// A word quiz was requested without a positive word length.
    #[error("word quiz requested without a positive word length")]
    MissingWordLength,
}

/// Errors raised while coercing one loosely-typed attempt submission.
///
/// Each error covers a single record; batch ingestion excludes the record
/// and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// The submission is not a JSON object.
    #[error("attempt record is not a JSON object")]
    NotAnObject,

    /// A required field is absent.
    #[error("attempt field '{field}' is missing")]
    MissingField { field: &'static str },

    /// A numeric field could not be coerced to a number.
    #[error("attempt field '{field}' is not numeric: {value:?}")]
    MalformedNumber { field: &'static str, value: String },

    /// A timestamp field could not be parsed as RFC 3339.
    #[error("attempt field '{field}' is not a valid timestamp: {value:?}")]
    MalformedTimestamp { field: &'static str, value: String },
}

impl IngestError {
    /// The field this error concerns, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            IngestError::NotAnObject => None,
            IngestError::MissingField { field }
            | IngestError::MalformedNumber { field, .. }
            | IngestError::MalformedTimestamp { field, .. } => Some(field),
        }
    }
}
