use super::super::catalog::{QuestionCatalog, QuestionKind};
use super::super::response::Response;
use super::aggregate::{round_to, Tallies};
use super::rules::trend_contribution;
use std::collections::BTreeMap;

/// Share of each chosen option text among single-choice answers in `category`, in percent.
///
/// Answers whose value matches no option still count toward the denominator.
pub(crate) fn value_proportions(
    catalog: &QuestionCatalog,
    responses: &[Response],
    category: &str,
) -> BTreeMap<String, f64> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    let mut relevant: u32 = 0;

    for response in responses {
        let Some(question) = catalog.get(&response.question_id) else {
            continue;
        };
        if question.category != category || question.kind != QuestionKind::SingleChoice {
            continue;
        }

        relevant += 1;
        if let Some(text) = question.option_text(&response.answer.as_key()) {
            *counts.entry(text.to_string()).or_default() += 1;
        }
    }

    if relevant == 0 {
        return BTreeMap::new();
    }

    counts
        .into_iter()
        .map(|(text, count)| {
            let share = 100.0 * f64::from(count) / f64::from(relevant);
            (text, round_to(share, 1))
        })
        .collect()
}

/// Average score per dimension over the scored questions of one category.
pub(crate) fn motivation_trends(
    catalog: &QuestionCatalog,
    responses: &[Response],
    category: &str,
) -> BTreeMap<String, f64> {
    let mut tallies = Tallies::default();

    for response in responses {
        let Some(question) = catalog.get(&response.question_id) else {
            continue;
        };
        if question.category != category {
            continue;
        }
        if let Some(contribution) = trend_contribution(question, &response.answer) {
            tallies.record(contribution);
        }
    }

    tallies.averages()
}
