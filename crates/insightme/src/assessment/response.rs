use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw answer as produced by a collector. Its meaning depends on the question kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Empty,
}

impl Answer {
    /// Numeric value for scale questions. Booleans and text never count as numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Answer::Integer(value) => Some(*value as f64),
            Answer::Float(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    /// Like [`Self::as_number`], but also accepts finite numeric text such as `"4"` or `" 3.5 "`.
    pub fn parse_number(&self) -> Option<f64> {
        match self {
            Answer::Text(value) => value.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => self.as_number(),
        }
    }

    /// Stringified form used to match option values and yes/no tokens.
    pub fn as_key(&self) -> String {
        match self {
            Answer::Boolean(value) => value.to_string(),
            Answer::Integer(value) => value.to_string(),
            Answer::Float(value) => format!("{value:?}"),
            Answer::Text(value) => value.clone(),
            Answer::Empty => String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Answer::Text(value) => value.trim().is_empty(),
            Answer::Empty => true,
            _ => false,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

impl From<i64> for Answer {
    fn from(value: i64) -> Self {
        Answer::Integer(value)
    }
}

impl From<i32> for Answer {
    fn from(value: i32) -> Self {
        Answer::Integer(i64::from(value))
    }
}

impl From<f64> for Answer {
    fn from(value: f64) -> Self {
        Answer::Float(value)
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Answer::Boolean(value)
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

/// One `(question_id, answer)` pair. Lists may repeat an id; every entry is scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: String,
    pub answer: Answer,
}

impl Response {
    pub fn new(question_id: impl Into<String>, answer: impl Into<Answer>) -> Self {
        Self {
            question_id: question_id.into(),
            answer: answer.into(),
        }
    }
}

/// A user's submitted answers for one assessment, as persisted by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSet {
    pub user_id: String,
    pub assessment_name: String,
    pub recorded_at: DateTime<Utc>,
    pub responses: Vec<Response>,
}

impl ResponseSet {
    pub fn new(
        user_id: impl Into<String>,
        assessment_name: impl Into<String>,
        recorded_at: DateTime<Utc>,
        responses: Vec<Response>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            assessment_name: assessment_name.into(),
            recorded_at,
            responses,
        }
    }
}
