//! Self-assessment questionnaires: catalog, responses, scoring and reporting.

mod blueprint;
pub mod catalog;
pub mod import;
pub mod report;
pub mod response;
pub mod router;
pub mod scoring;
pub mod service;

pub use catalog::{
    CatalogError, CatalogWarning, ChoiceOption, ChoicePoints, Interpretation, Question,
    QuestionCatalog, QuestionKind, QuestionRecord, ScoringRule,
};
pub use import::{ResponseImportError, ResponseImporter};
pub use report::AssessmentReport;
pub use response::{Answer, Response, ResponseSet};
pub use router::assessment_router;
pub use scoring::{
    AssessmentAnalysis, Contribution, DimensionScore, OpenEndedResponse, ScoringCoverage,
    ScoringEngine, StrengthsWeaknesses, Unscored,
};
pub use service::{AssessmentService, ServiceError};

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_N: usize = 3;
pub const DEFAULT_CORE_VALUES_CATEGORY: &str = "Core Values";
pub const DEFAULT_MOTIVATION_CATEGORY: &str = "Learning & Action Motivation";

/// Knobs for the aggregate analyses that are not part of the catalog itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub top_n: usize,
    pub core_values_category: String,
    pub motivation_category: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            core_values_category: DEFAULT_CORE_VALUES_CATEGORY.to_string(),
            motivation_category: DEFAULT_MOTIVATION_CATEGORY.to_string(),
        }
    }
}
