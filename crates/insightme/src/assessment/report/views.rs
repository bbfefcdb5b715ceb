use super::super::scoring::Unscored;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScoreEntry {
    pub dimension: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareEntry {
    pub label: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenEndedEntry {
    pub question_id: String,
    pub question_text: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnscoredEntry {
    pub reason: Unscored,
    pub reason_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageView {
    pub total: usize,
    pub scored: usize,
    pub scorable: usize,
    /// Scored fraction of `scorable` in `0.0..=1.0`; `None` when nothing was scorable.
    pub scored_share: Option<f64>,
    pub unscored: Vec<UnscoredEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReportSummary {
    pub user_id: String,
    pub generated_at: DateTime<Utc>,
    pub dimension_scores: Vec<DimensionScoreEntry>,
    pub strengths: Vec<DimensionScoreEntry>,
    pub weaknesses: Vec<DimensionScoreEntry>,
    pub value_proportions: Vec<ShareEntry>,
    pub motivation_trends: Vec<DimensionScoreEntry>,
    pub open_ended: Vec<OpenEndedEntry>,
    pub coverage: CoverageView,
}

/// How much of the questionnaire produced usable scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    Complete,
    Partial,
    Insufficient,
}

impl ReadinessLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::Partial => "Partial",
            Self::Insufficient => "Insufficient",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentInsights {
    pub readiness_level: ReadinessLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scored_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_strength: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_motivation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_actions: Vec<String>,
}
