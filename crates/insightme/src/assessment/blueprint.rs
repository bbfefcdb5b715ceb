use super::catalog::{ChoiceOption, ChoicePoints, Interpretation, Question, QuestionKind, ScoringRule};
use super::{DEFAULT_CORE_VALUES_CATEGORY, DEFAULT_MOTIVATION_CATEGORY};
use std::collections::BTreeMap;

const INTELLIGENCES: &str = "Multiple Intelligences";
const REFLECTION: &str = "Reflection";

pub(super) fn standard_questions() -> Vec<Question> {
    vec![
        likert(
            "CV01",
            "I tell the truth even when it costs me something.",
            DEFAULT_CORE_VALUES_CATEGORY,
            "Integrity",
            Interpretation::Direct,
        ),
        likert(
            "CV02",
            "I am comfortable bending rules when nobody is watching.",
            DEFAULT_CORE_VALUES_CATEGORY,
            "Integrity",
            Interpretation::Inverse,
        ),
        likert(
            "CV03",
            "I make time to help people close to me.",
            DEFAULT_CORE_VALUES_CATEGORY,
            "Compassion",
            Interpretation::Direct,
        ),
        choice(
            "CV04",
            "Which of these matters most to you right now?",
            DEFAULT_CORE_VALUES_CATEGORY,
            &[
                ("a", "Family", "Belonging", 1.0),
                ("b", "Career growth", "Achievement", 1.0),
                ("c", "Freedom", "Autonomy", 1.0),
                ("d", "Contribution to society", "Compassion", 1.0),
            ],
        ),
        choice(
            "CV05",
            "When two commitments clash, what usually decides for you?",
            DEFAULT_CORE_VALUES_CATEGORY,
            &[
                ("a", "Family", "Belonging", 1.0),
                ("b", "Career growth", "Achievement", 0.5),
                ("c", "Freedom", "Autonomy", 0.5),
                ("d", "Contribution to society", "Compassion", 1.0),
            ],
        ),
        likert(
            "MI01",
            "I enjoy solving puzzles and logic problems.",
            INTELLIGENCES,
            "Logical-Mathematical",
            Interpretation::Direct,
        ),
        likert(
            "MI02",
            "I find it easy to express ideas in writing.",
            INTELLIGENCES,
            "Linguistic",
            Interpretation::Direct,
        ),
        yes_no(
            "MI03",
            "Do friends often come to you to talk through their problems?",
            INTELLIGENCES,
            "Interpersonal",
            5.0,
            1.0,
        ),
        yes_no(
            "MI04",
            "Can you picture how furniture would fit in a room before moving it?",
            INTELLIGENCES,
            "Spatial",
            5.0,
            1.0,
        ),
        likert(
            "MI05",
            "I struggle to stay with a melody or rhythm.",
            INTELLIGENCES,
            "Musical",
            Interpretation::Inverse,
        ),
        likert(
            "MI06",
            "I understand my own moods and what triggers them.",
            INTELLIGENCES,
            "Intrapersonal",
            Interpretation::Direct,
        ),
        choice(
            "LM01",
            "Why do you usually start learning something new?",
            DEFAULT_MOTIVATION_CATEGORY,
            &[
                ("a", "Curiosity", "Intrinsic Motivation", 5.0),
                ("b", "A grade or certificate", "Extrinsic Motivation", 4.0),
                ("c", "Someone asked me to", "Extrinsic Motivation", 2.0),
                ("d", "I rarely start on my own", "Amotivation", 3.0),
            ],
        ),
        likert(
            "LM02",
            "I keep working on a task after the reward is gone.",
            DEFAULT_MOTIVATION_CATEGORY,
            "Intrinsic Motivation",
            Interpretation::Direct,
        ),
        likert(
            "LM03",
            "I mostly study to avoid disappointing others.",
            DEFAULT_MOTIVATION_CATEGORY,
            "Extrinsic Motivation",
            Interpretation::Direct,
        ),
        choice(
            "LM04",
            "When a plan stalls, what do you do first?",
            DEFAULT_MOTIVATION_CATEGORY,
            &[
                ("a", "Break it into smaller steps", "Persistence", 5.0),
                ("b", "Ask for help", "Persistence", 4.0),
                ("c", "Wait for a better moment", "Persistence", 2.0),
                ("d", "Drop it", "Amotivation", 4.0),
            ],
        ),
        open(
            "RF01",
            "Name one strength you want to use more often.",
            QuestionKind::OpenShort,
        ),
        open(
            "RF02",
            "Describe a recent challenge and what it taught you.",
            QuestionKind::OpenLong,
        ),
    ]
}

fn likert(
    id: &str,
    text: &str,
    category: &str,
    dimension: &str,
    interpretation: Interpretation,
) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        category: category.to_string(),
        kind: QuestionKind::Likert,
        scale_min: 1,
        scale_max: 5,
        options: Vec::new(),
        scoring: Some(ScoringRule::Likert {
            dimension: dimension.to_string(),
            interpretation,
        }),
    }
}

fn yes_no(
    id: &str,
    text: &str,
    category: &str,
    dimension: &str,
    yes_value: f64,
    no_value: f64,
) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        category: category.to_string(),
        kind: QuestionKind::YesNo,
        scale_min: 1,
        scale_max: 5,
        options: Vec::new(),
        scoring: Some(ScoringRule::YesNo {
            dimension: dimension.to_string(),
            yes_value,
            no_value,
        }),
    }
}

/// `(value, text, dimension, points)` per option.
fn choice(id: &str, text: &str, category: &str, options: &[(&str, &str, &str, f64)]) -> Question {
    let points: BTreeMap<String, ChoicePoints> = options
        .iter()
        .map(|(value, _, dimension, points)| {
            (
                value.to_string(),
                ChoicePoints {
                    dimension: dimension.to_string(),
                    points: *points,
                },
            )
        })
        .collect();

    Question {
        id: id.to_string(),
        text: text.to_string(),
        category: category.to_string(),
        kind: QuestionKind::SingleChoice,
        scale_min: 1,
        scale_max: 5,
        options: options
            .iter()
            .map(|(value, text, _, _)| ChoiceOption {
                value: value.to_string(),
                text: text.to_string(),
            })
            .collect(),
        scoring: Some(ScoringRule::Choice { points }),
    }
}

fn open(id: &str, text: &str, kind: QuestionKind) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        category: REFLECTION.to_string(),
        kind,
        scale_min: 1,
        scale_max: 5,
        options: Vec::new(),
        scoring: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::QuestionCatalog;

    #[test]
    fn standard_questions_have_unique_ids() {
        let catalog =
            QuestionCatalog::from_questions(standard_questions()).expect("ids are unique");
        assert_eq!(catalog.len(), standard_questions().len());
    }

    #[test]
    fn standard_catalog_covers_every_kind_and_category() {
        let catalog = QuestionCatalog::standard();

        assert_eq!(
            catalog.categories(),
            vec![
                DEFAULT_CORE_VALUES_CATEGORY,
                INTELLIGENCES,
                DEFAULT_MOTIVATION_CATEGORY,
                REFLECTION
            ]
        );
        for kind in [
            QuestionKind::Likert,
            QuestionKind::YesNo,
            QuestionKind::SingleChoice,
            QuestionKind::OpenShort,
            QuestionKind::OpenLong,
        ] {
            assert!(
                catalog.questions().iter().any(|question| question.kind == kind),
                "missing {kind:?}"
            );
        }
        assert!(catalog.warnings().is_empty());
    }
}
