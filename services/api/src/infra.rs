use chrono::Utc;
use insightme::assessment::{
    QuestionCatalog, Response, ResponseImporter, ResponseSet, ScoringEngine,
};
use insightme::error::AppError;
use insightme::storage::{validate_key, ResponseStore, StorageError, StoredResponseRef};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

type StoreKey = (String, String);

/// Process-local store used by tests and the demo.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResponseStore {
    sets: Arc<Mutex<HashMap<StoreKey, Vec<ResponseSet>>>>,
}

impl ResponseStore for InMemoryResponseStore {
    fn save(&self, set: &ResponseSet) -> Result<StoredResponseRef, StorageError> {
        validate_key(&set.user_id)?;
        validate_key(&set.assessment_name)?;
        let mut guard = self.sets.lock().expect("response store mutex poisoned");
        guard
            .entry((set.user_id.clone(), set.assessment_name.clone()))
            .or_default()
            .push(set.clone());
        Ok(StoredResponseRef {
            user_id: set.user_id.clone(),
            assessment_name: set.assessment_name.clone(),
            recorded_at: set.recorded_at,
            location: None,
        })
    }

    fn load_latest(
        &self,
        user_id: &str,
        assessment_name: &str,
    ) -> Result<Option<ResponseSet>, StorageError> {
        let guard = self.sets.lock().expect("response store mutex poisoned");
        Ok(guard
            .get(&(user_id.to_string(), assessment_name.to_string()))
            .and_then(|sets| sets.iter().max_by_key(|set| set.recorded_at))
            .cloned())
    }

    fn list(
        &self,
        user_id: &str,
        assessment_name: &str,
    ) -> Result<Vec<StoredResponseRef>, StorageError> {
        let guard = self.sets.lock().expect("response store mutex poisoned");
        let mut refs: Vec<StoredResponseRef> = guard
            .get(&(user_id.to_string(), assessment_name.to_string()))
            .map(|sets| {
                sets.iter()
                    .map(|set| StoredResponseRef {
                        user_id: set.user_id.clone(),
                        assessment_name: set.assessment_name.clone(),
                        recorded_at: set.recorded_at,
                        location: None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        refs.sort_by_key(|stored| stored.recorded_at);
        Ok(refs)
    }
}

/// Configured catalog file, or the built-in catalog when none is set.
pub(crate) fn load_engine(catalog_path: Option<&Path>) -> Result<ScoringEngine, AppError> {
    let catalog = match catalog_path {
        Some(path) => QuestionCatalog::from_path(path)?,
        None => QuestionCatalog::standard(),
    };
    info!(
        questions = catalog.len(),
        warnings = catalog.warnings().len(),
        "question catalog ready"
    );
    Ok(ScoringEngine::new(catalog))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResponsesFile {
    Stored(ResponseSet),
    Bare(Vec<Response>),
}

/// Responses from a CSV export (by extension), a stored response set or a bare JSON array.
pub(crate) fn load_responses_file(path: &Path) -> Result<Vec<Response>, AppError> {
    let is_csv = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"));
    if is_csv {
        return Ok(ResponseImporter::from_path(path)?);
    }

    let raw = std::fs::read_to_string(path)?;
    parse_responses_json(&raw)
}

pub(crate) fn parse_responses_json(raw: &str) -> Result<Vec<Response>, AppError> {
    let parsed: ResponsesFile = serde_json::from_str(raw)?;
    Ok(match parsed {
        ResponsesFile::Stored(set) => set.responses,
        ResponsesFile::Bare(responses) => responses,
    })
}

pub(crate) fn sample_response_set(user_id: &str, assessment_name: &str) -> ResponseSet {
    ResponseSet::new(
        user_id,
        assessment_name,
        Utc::now(),
        vec![
            Response::new("CV01", 5),
            Response::new("CV02", 2),
            Response::new("CV03", 4),
            Response::new("CV04", "a"),
            Response::new("CV05", "d"),
            Response::new("MI01", 4),
            Response::new("MI02", 3),
            Response::new("MI03", "Có"),
            Response::new("MI04", "không"),
            Response::new("MI05", 2),
            Response::new("MI06", 5),
            Response::new("LM01", "a"),
            Response::new("LM02", 4),
            Response::new("LM03", 2),
            Response::new("LM04", "b"),
            Response::new("RF01", "Listening"),
            Response::new(
                "RF02",
                "Switching teams taught me to ask questions early.",
            ),
        ],
    )
}
