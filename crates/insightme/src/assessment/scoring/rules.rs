use super::super::catalog::{Interpretation, Question, QuestionKind, ScoringRule};
use super::super::response::Answer;
use serde::Serialize;

const AFFIRMATIVE_TOKENS: [&str; 6] = ["có", "co", "c", "yes", "true", "1"];
const NEGATIVE_TOKENS: [&str; 7] = ["không", "khong", "k", "ko", "no", "false", "0"];

/// Points one answer adds to one dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub dimension: String,
    pub score: f64,
}

/// Why an answer produced no contribution. Never surfaced as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unscored {
    UnknownQuestion,
    NoScoringRule,
    FreeText,
    NonNumericAnswer,
    UnrecognizedToken,
    UnmappedChoice,
}

impl Unscored {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::UnknownQuestion,
            Self::NoScoringRule,
            Self::FreeText,
            Self::NonNumericAnswer,
            Self::UnrecognizedToken,
            Self::UnmappedChoice,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UnknownQuestion => "Question not in catalog",
            Self::NoScoringRule => "No scoring rule",
            Self::FreeText => "Free-text or unsupported type",
            Self::NonNumericAnswer => "Non-numeric scale answer",
            Self::UnrecognizedToken => "Unrecognized yes/no answer",
            Self::UnmappedChoice => "Choice without points",
        }
    }
}

/// Dispatches on the question kind. A rule shaped for a different kind scores nothing.
pub(crate) fn score_answer(question: &Question, answer: &Answer) -> Result<Contribution, Unscored> {
    if question.kind.is_open_ended() || matches!(question.kind, QuestionKind::Other(_)) {
        return Err(Unscored::FreeText);
    }

    let rule = question.scoring.as_ref().ok_or(Unscored::NoScoringRule)?;

    match (&question.kind, rule) {
        (
            QuestionKind::Likert,
            ScoringRule::Likert {
                dimension,
                interpretation,
            },
        ) => {
            let value = answer.as_number().ok_or(Unscored::NonNumericAnswer)?;
            let score = match interpretation {
                Interpretation::Direct => value,
                Interpretation::Inverse => (question.scale_max + question.scale_min) as f64 - value,
            };
            Ok(contribution(dimension, score))
        }
        (
            QuestionKind::YesNo,
            ScoringRule::YesNo {
                dimension,
                yes_value,
                no_value,
            },
        ) => match yes_no_token(answer) {
            Some(true) => Ok(contribution(dimension, *yes_value)),
            Some(false) => Ok(contribution(dimension, *no_value)),
            None => Err(Unscored::UnrecognizedToken),
        },
        (QuestionKind::SingleChoice, ScoringRule::Choice { .. }) => choice_contribution(rule, answer),
        _ => Err(Unscored::NoScoringRule),
    }
}

/// Motivation-trend scoring: choice points as usual, likert answers (numeric text included)
/// taken at face value.
pub(crate) fn trend_contribution(question: &Question, answer: &Answer) -> Option<Contribution> {
    match (&question.kind, question.scoring.as_ref()?) {
        (QuestionKind::SingleChoice, rule @ ScoringRule::Choice { .. }) => {
            choice_contribution(rule, answer).ok()
        }
        (QuestionKind::Likert, ScoringRule::Likert { dimension, .. }) => answer
            .parse_number()
            .map(|value| contribution(dimension, value)),
        _ => None,
    }
}

fn choice_contribution(rule: &ScoringRule, answer: &Answer) -> Result<Contribution, Unscored> {
    let ScoringRule::Choice { points } = rule else {
        return Err(Unscored::NoScoringRule);
    };

    points
        .get(&answer.as_key())
        .map(|entry| contribution(&entry.dimension, entry.points))
        .ok_or(Unscored::UnmappedChoice)
}

/// `Some(true)` for affirmative tokens, `Some(false)` for negative ones, case-insensitive.
pub(crate) fn yes_no_token(answer: &Answer) -> Option<bool> {
    let token = answer.as_key().to_lowercase();
    if AFFIRMATIVE_TOKENS.contains(&token.as_str()) {
        Some(true)
    } else if NEGATIVE_TOKENS.contains(&token.as_str()) {
        Some(false)
    } else {
        None
    }
}

fn contribution(dimension: &str, score: f64) -> Contribution {
    Contribution {
        dimension: dimension.to_string(),
        score,
    }
}
