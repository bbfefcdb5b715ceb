use super::super::scoring::{AssessmentAnalysis, DimensionScore, Unscored};
use super::views::{
    AssessmentInsights, AssessmentReportSummary, CoverageView, DimensionScoreEntry,
    OpenEndedEntry, ShareEntry, UnscoredEntry,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// One user's analysis, ready to be rendered.
#[derive(Debug, Clone)]
pub struct AssessmentReport {
    pub user_id: String,
    pub generated_at: DateTime<Utc>,
    pub analysis: AssessmentAnalysis,
}

impl AssessmentReport {
    pub fn new(
        user_id: impl Into<String>,
        generated_at: DateTime<Utc>,
        analysis: AssessmentAnalysis,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            generated_at,
            analysis,
        }
    }

    pub fn summary(&self) -> AssessmentReportSummary {
        let analysis = &self.analysis;
        let coverage = &analysis.coverage;

        let unscored = Unscored::ordered()
            .into_iter()
            .filter_map(|reason| {
                coverage.unscored.get(&reason).map(|count| UnscoredEntry {
                    reason,
                    reason_label: reason.label(),
                    count: *count,
                })
            })
            .collect();

        AssessmentReportSummary {
            user_id: self.user_id.clone(),
            generated_at: self.generated_at,
            dimension_scores: ranked_scores(&analysis.overall_scores),
            strengths: entries(&analysis.strengths_weaknesses.strengths),
            weaknesses: entries(&analysis.strengths_weaknesses.weaknesses),
            value_proportions: ranked_scores(&analysis.value_proportions)
                .into_iter()
                .map(|entry| ShareEntry {
                    label: entry.dimension,
                    percent: entry.score,
                })
                .collect(),
            motivation_trends: ranked_scores(&analysis.motivation_trends),
            open_ended: analysis
                .open_ended
                .iter()
                .map(|response| OpenEndedEntry {
                    question_id: response.question_id.clone(),
                    question_text: response.question_text.clone(),
                    answer: response.answer.clone(),
                })
                .collect(),
            coverage: CoverageView {
                total: coverage.total,
                scored: coverage.scored,
                scorable: coverage.scorable(),
                scored_share: coverage.scored_share(),
                unscored,
            },
        }
    }

    /// `report_<user>_<YYYYmmddHHMM>.html`
    pub fn file_name(&self) -> String {
        super::report_file_name(&self.user_id, self.generated_at)
    }

    /// Full HTML document for this report.
    pub fn render_html(&self) -> String {
        let summary = self.summary();
        let insights = summary.insights();
        super::render_html(&summary, &insights)
    }
}

impl AssessmentReportSummary {
    pub fn insights(&self) -> AssessmentInsights {
        super::generate_insights(self)
    }
}

/// Highest score first; equal scores by name.
fn ranked_scores(scores: &BTreeMap<String, f64>) -> Vec<DimensionScoreEntry> {
    let mut ranked: Vec<DimensionScoreEntry> = scores
        .iter()
        .map(|(dimension, score)| DimensionScoreEntry {
            dimension: dimension.clone(),
            score: *score,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.dimension.cmp(&b.dimension))
    });
    ranked
}

fn entries(scores: &[DimensionScore]) -> Vec<DimensionScoreEntry> {
    scores
        .iter()
        .map(|(dimension, score)| DimensionScoreEntry {
            dimension: dimension.clone(),
            score: *score,
        })
        .collect()
}
