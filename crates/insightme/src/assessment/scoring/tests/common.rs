use crate::assessment::catalog::{QuestionCatalog, QuestionRecord};
use crate::assessment::response::{Answer, Response};
use crate::assessment::scoring::ScoringEngine;
use serde_json::json;

pub(super) const VALUES: &str = "Core Values";
pub(super) const MOTIVATION: &str = "Learning & Action Motivation";

pub(super) fn fixture_records() -> Vec<QuestionRecord> {
    serde_json::from_value(json!([
        {
            "id": "cv_direct",
            "text": "I keep my promises.",
            "category": VALUES,
            "type": "likert",
            "scale_min": 1,
            "scale_max": 5,
            "scoring_info": {"dimension": "Integrity", "interpretation": "direct"}
        },
        {
            "id": "cv_inverse",
            "text": "I bend rules when it suits me.",
            "category": VALUES,
            "type": "likert",
            "scoring_info": {"dimension": "Integrity", "interpretation": "inverse"}
        },
        {
            "id": "cv_choice_1",
            "text": "What matters most?",
            "category": VALUES,
            "type": "multiple_choice_single",
            "options": [
                {"value": "a", "text": "Family"},
                {"value": "b", "text": "Career"}
            ],
            "scoring_info": {
                "a": {"dimension": "Belonging", "points": 1},
                "b": {"dimension": "Achievement", "points": 0.5}
            }
        },
        {
            "id": "cv_choice_2",
            "text": "Pick a guiding word.",
            "category": VALUES,
            "type": "multiple_choice_single",
            "options": [
                {"value": "a", "text": "Family"},
                {"value": "b", "text": "Career"}
            ]
        },
        {
            "id": "mi_help",
            "text": "Do friends ask you for advice?",
            "category": "Multiple Intelligences",
            "type": "yes_no",
            "scoring_info": {"dimension": "Interpersonal", "yes_value": 2, "no_value": 0}
        },
        {
            "id": "mo_curious",
            "text": "I study because I am curious.",
            "category": MOTIVATION,
            "type": "likert",
            "scoring_info": {"dimension": "Intrinsic", "interpretation": "inverse"}
        },
        {
            "id": "mo_reason",
            "text": "Why do you finish tasks?",
            "category": MOTIVATION,
            "type": "multiple_choice_single",
            "options": [
                {"value": "a", "text": "Enjoyment"},
                {"value": "b", "text": "Rewards"}
            ],
            "scoring_info": {
                "a": {"dimension": "Intrinsic", "points": 4},
                "b": {"dimension": "Extrinsic", "points": 3}
            }
        },
        {
            "id": "mo_unscored",
            "text": "How often do you plan your week?",
            "category": MOTIVATION,
            "type": "likert"
        },
        {
            "id": "reflect_long",
            "text": "Describe a recent challenge.",
            "category": "Reflection",
            "type": "open_long"
        },
        {
            "id": "odd_kind",
            "text": "Rank these items.",
            "category": "Reflection",
            "type": "ranking",
            "scoring_info": {"dimension": "Planning"}
        }
    ]))
    .expect("fixture records parse")
}

pub(super) fn engine() -> ScoringEngine {
    let catalog = QuestionCatalog::from_records(fixture_records()).expect("fixture catalog builds");
    ScoringEngine::new(catalog)
}

pub(super) fn response(question_id: &str, answer: impl Into<Answer>) -> Response {
    Response::new(question_id, answer)
}
