//! Attempt-submission ingestion.
//!
//! Submissions arrive from the outer web layer as loosely-typed JSON:
//! numeric fields may be numbers, percent-suffixed strings ("85%"), empty
//! strings, or missing entirely. This module coerces them into
//! [`QuizAttempt`] records before they ever reach aggregation. A bad field
//! invalidates only its own record; batch ingestion reports the failures
//! and keeps the rest.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::IngestError;
use crate::model::{Language, QuizAttempt, QuizType};

/// Coerces one submission into an attempt record.
pub fn parse_attempt(value: &Value) -> Result<QuizAttempt, IngestError> {
    let obj = value.as_object().ok_or(IngestError::NotAnObject)?;

    Ok(QuizAttempt {
        id: record_id(obj),
        learner_id: learner_id(obj)?,
        language: enum_field::<Language>(obj, "language"),
        quiz_type: enum_field::<QuizType>(obj, "quiz_type"),
        question_count: integer_field(obj, "question_count")?,
        word_length: integer_field(obj, "word_length")?,
        time_limit_secs: integer_field(obj, "time_limit_secs")?,
        taken_at: taken_at(obj)?,
        speed: numeric_field(obj, "speed")?,
        correctness: numeric_field(obj, "correctness")?,
        stutter: numeric_field(obj, "stutter")?,
        repetition: numeric_field(obj, "repetition")?,
        pause: numeric_field(obj, "pause")?,
        pronunciation: numeric_field(obj, "pronunciation")?,
        total_words: integer_field(obj, "total_words")?,
        comment: obj
            .get("comment")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        score: numeric_field(obj, "score")?,
    })
}

/// Coerces a batch, excluding records that fail and reporting each failure
/// with its index. Aggregation over the good records never aborts on the
/// bad ones.
pub fn parse_attempts(values: &[Value]) -> (Vec<QuizAttempt>, Vec<(usize, IngestError)>) {
    let mut attempts = Vec::with_capacity(values.len());
    let mut failures = Vec::new();
    for (index, value) in values.iter().enumerate() {
        match parse_attempt(value) {
            Ok(attempt) => attempts.push(attempt),
            Err(err) => failures.push((index, err)),
        }
    }
    (attempts, failures)
}

/// A submitted id is honored when it is a valid UUID; otherwise the record
/// gets a fresh one.
fn record_id(obj: &Map<String, Value>) -> Uuid {
    obj.get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}

fn learner_id(obj: &Map<String, Value>) -> Result<u64, IngestError> {
    match obj.get("learner_id") {
        None | Some(Value::Null) => Err(IngestError::MissingField {
            field: "learner_id",
        }),
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| IngestError::MalformedNumber {
            field: "learner_id",
            value: n.to_string(),
        }),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| IngestError::MalformedNumber {
            field: "learner_id",
            value: s.clone(),
        }),
        Some(other) => Err(IngestError::MalformedNumber {
            field: "learner_id",
            value: other.to_string(),
        }),
    }
}

/// Numeric coercion: missing, null and empty strings become zero; strings
/// may carry a trailing percent sign.
fn numeric_field(obj: &Map<String, Value>, field: &'static str) -> Result<f64, IngestError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(0.0)),
        Some(Value::String(s)) => {
            let trimmed = s.trim().trim_end_matches('%').trim_end();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed.parse().map_err(|_| IngestError::MalformedNumber {
                field,
                value: s.clone(),
            })
        }
        Some(other) => Err(IngestError::MalformedNumber {
            field,
            value: other.to_string(),
        }),
    }
}

/// Non-negative integer coercion through the numeric rules.
fn integer_field(obj: &Map<String, Value>, field: &'static str) -> Result<u32, IngestError> {
    Ok(numeric_field(obj, field)?.max(0.0) as u32)
}

fn enum_field<T: std::str::FromStr>(obj: &Map<String, Value>, field: &str) -> Option<T> {
    obj.get(field)
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
}

/// A missing timestamp defaults to ingestion time.
fn taken_at(obj: &Map<String, Value>) -> Result<DateTime<Utc>, IngestError> {
    match obj.get("taken_at") {
        None | Some(Value::Null) => Ok(Utc::now()),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| IngestError::MalformedTimestamp {
                field: "taken_at",
                value: s.clone(),
            }),
        Some(other) => Err(IngestError::MalformedTimestamp {
            field: "taken_at",
            value: other.to_string(),
        }),
    }
}
