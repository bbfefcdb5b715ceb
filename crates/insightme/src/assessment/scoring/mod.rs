mod aggregate;
mod categories;
mod ranking;
mod rules;

#[cfg(test)]
mod tests;

pub use ranking::{identify_strengths_weaknesses, DimensionScore, StrengthsWeaknesses};
pub use rules::{Contribution, Unscored};

use super::catalog::QuestionCatalog;
use super::response::{Answer, Response};
use super::AnalysisSettings;
use aggregate::Tallies;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Stateless scorer over an immutable catalog. Cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: Arc<QuestionCatalog>,
}

impl ScoringEngine {
    pub fn new(catalog: QuestionCatalog) -> Self {
        Self::from_shared(Arc::new(catalog))
    }

    pub fn from_shared(catalog: Arc<QuestionCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Scores one answer, reporting why nothing was contributed when the answer is unscored.
    pub fn evaluate_response(
        &self,
        question_id: &str,
        answer: &Answer,
    ) -> Result<Contribution, Unscored> {
        let question = self
            .catalog
            .get(question_id)
            .ok_or(Unscored::UnknownQuestion)?;
        let outcome = rules::score_answer(question, answer);
        if let Err(reason) = &outcome {
            trace!(question_id, ?reason, "answer left unscored");
        }
        outcome
    }

    /// Dimension contributions of one answer. Empty when the answer is unscored.
    pub fn score_response(&self, question_id: &str, answer: &Answer) -> BTreeMap<String, f64> {
        self.evaluate_response(question_id, answer)
            .map(|contribution| BTreeMap::from([(contribution.dimension, contribution.score)]))
            .unwrap_or_default()
    }

    /// Average score per dimension across every response, duplicates included.
    pub fn overall_scores(&self, responses: &[Response]) -> BTreeMap<String, f64> {
        let mut tallies = Tallies::default();
        for response in responses {
            if let Ok(contribution) = self.evaluate_response(&response.question_id, &response.answer)
            {
                tallies.record(contribution);
            }
        }
        tallies.averages()
    }

    pub fn strengths_weaknesses(
        &self,
        overall_scores: &BTreeMap<String, f64>,
        top_n: usize,
    ) -> StrengthsWeaknesses {
        identify_strengths_weaknesses(overall_scores, top_n)
    }

    pub fn value_proportions(&self, responses: &[Response], category: &str) -> BTreeMap<String, f64> {
        categories::value_proportions(&self.catalog, responses, category)
    }

    pub fn motivation_trends(&self, responses: &[Response], category: &str) -> BTreeMap<String, f64> {
        categories::motivation_trends(&self.catalog, responses, category)
    }

    /// Free-text answers to open questions, in response order. Blank answers are omitted.
    pub fn open_ended_responses(&self, responses: &[Response]) -> Vec<OpenEndedResponse> {
        responses
            .iter()
            .filter(|response| !response.answer.is_blank())
            .filter_map(|response| {
                let question = self.catalog.get(&response.question_id)?;
                question.kind.is_open_ended().then(|| OpenEndedResponse {
                    question_id: question.id.clone(),
                    question_text: question.text.clone(),
                    answer: response.answer.to_string(),
                })
            })
            .collect()
    }

    pub fn coverage(&self, responses: &[Response]) -> ScoringCoverage {
        let mut coverage = ScoringCoverage {
            total: responses.len(),
            ..ScoringCoverage::default()
        };
        for response in responses {
            match self.evaluate_response(&response.question_id, &response.answer) {
                Ok(_) => coverage.scored += 1,
                Err(reason) => *coverage.unscored.entry(reason).or_default() += 1,
            }
        }
        coverage
    }

    /// Runs every analysis over one response list.
    pub fn analyze(
        &self,
        responses: &[Response],
        settings: &AnalysisSettings,
    ) -> AssessmentAnalysis {
        let overall_scores = self.overall_scores(responses);
        let strengths_weaknesses = identify_strengths_weaknesses(&overall_scores, settings.top_n);
        let value_proportions =
            self.value_proportions(responses, &settings.core_values_category);
        let motivation_trends = self.motivation_trends(responses, &settings.motivation_category);
        let open_ended = self.open_ended_responses(responses);
        let coverage = self.coverage(responses);

        debug!(
            responses = responses.len(),
            dimensions = overall_scores.len(),
            scored = coverage.scored,
            "assessment analyzed"
        );

        AssessmentAnalysis {
            overall_scores,
            strengths_weaknesses,
            value_proportions,
            motivation_trends,
            open_ended,
            coverage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenEndedResponse {
    pub question_id: String,
    pub question_text: String,
    pub answer: String,
}

/// How many responses produced a contribution, and why the rest did not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoringCoverage {
    pub total: usize,
    pub scored: usize,
    pub unscored: BTreeMap<Unscored, usize>,
}

impl ScoringCoverage {
    /// Responses that were expected to score. Free text is excluded.
    pub fn scorable(&self) -> usize {
        self.total
            - self
                .unscored
                .get(&Unscored::FreeText)
                .copied()
                .unwrap_or_default()
    }

    /// Scored share of scorable responses in `0.0..=1.0`; `None` when nothing was scorable.
    pub fn scored_share(&self) -> Option<f64> {
        match self.scorable() {
            0 => None,
            scorable => Some(self.scored as f64 / scorable as f64),
        }
    }
}

/// Every engine output for one response list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentAnalysis {
    pub overall_scores: BTreeMap<String, f64>,
    pub strengths_weaknesses: StrengthsWeaknesses,
    pub value_proportions: BTreeMap<String, f64>,
    pub motivation_trends: BTreeMap<String, f64>,
    pub open_ended: Vec<OpenEndedResponse>,
    pub coverage: ScoringCoverage,
}
