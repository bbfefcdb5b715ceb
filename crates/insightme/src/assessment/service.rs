use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::report::AssessmentReport;
use super::response::{Response, ResponseSet};
use super::scoring::{AssessmentAnalysis, ScoringEngine};
use super::AnalysisSettings;
use crate::storage::{ResponseStore, StorageError, StoredResponseRef};

/// Service composing the scoring engine, response storage and analysis settings.
pub struct AssessmentService<S> {
    engine: ScoringEngine,
    store: Arc<S>,
    settings: AnalysisSettings,
}

impl<S> AssessmentService<S>
where
    S: ResponseStore + 'static,
{
    pub fn new(engine: ScoringEngine, store: Arc<S>, settings: AnalysisSettings) -> Self {
        Self {
            engine,
            store,
            settings,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Persist a submitted response set stamped with the current time.
    pub fn submit(
        &self,
        user_id: &str,
        assessment_name: &str,
        responses: Vec<Response>,
    ) -> Result<(ResponseSet, StoredResponseRef), ServiceError> {
        let set = ResponseSet::new(user_id, assessment_name, Utc::now(), responses);
        let stored = self.store.save(&set)?;
        info!(
            user_id,
            assessment_name,
            responses = set.responses.len(),
            "response set stored"
        );
        Ok((set, stored))
    }

    pub fn analyze(&self, responses: &[Response]) -> AssessmentAnalysis {
        self.engine.analyze(responses, &self.settings)
    }

    /// Same as [`Self::analyze`] with a different strengths/weaknesses count.
    pub fn analyze_with_top_n(&self, responses: &[Response], top_n: usize) -> AssessmentAnalysis {
        let settings = AnalysisSettings {
            top_n,
            ..self.settings.clone()
        };
        self.engine.analyze(responses, &settings)
    }

    pub fn latest_set(
        &self,
        user_id: &str,
        assessment_name: &str,
    ) -> Result<ResponseSet, ServiceError> {
        self.store
            .load_latest(user_id, assessment_name)?
            .ok_or_else(|| ServiceError::NotFound {
                user_id: user_id.to_string(),
                assessment_name: assessment_name.to_string(),
            })
    }

    pub fn latest_analysis(
        &self,
        user_id: &str,
        assessment_name: &str,
    ) -> Result<AssessmentAnalysis, ServiceError> {
        let set = self.latest_set(user_id, assessment_name)?;
        Ok(self.analyze(&set.responses))
    }

    /// Report over the latest stored set, dated `now`.
    pub fn report(
        &self,
        user_id: &str,
        assessment_name: &str,
        now: DateTime<Utc>,
    ) -> Result<AssessmentReport, ServiceError> {
        let analysis = self.latest_analysis(user_id, assessment_name)?;
        Ok(AssessmentReport::new(user_id, now, analysis))
    }

    pub fn history(
        &self,
        user_id: &str,
        assessment_name: &str,
    ) -> Result<Vec<StoredResponseRef>, ServiceError> {
        Ok(self.store.list(user_id, assessment_name)?)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("no responses stored for user '{user_id}' in assessment '{assessment_name}'")]
    NotFound {
        user_id: String,
        assessment_name: String,
    },
}
