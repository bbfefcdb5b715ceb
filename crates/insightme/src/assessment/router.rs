use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response as HttpResponse},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::response::Response;
use super::service::{AssessmentService, ServiceError};
use crate::storage::{ResponseStore, StorageError};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub responses: Vec<Response>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub user_id: String,
    pub responses: Vec<Response>,
}

/// Router builder exposing the catalog, analysis, submission and report endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: ResponseStore + 'static,
{
    Router::new()
        .route("/api/v1/catalog", get(catalog_handler::<S>))
        .route("/api/v1/analyze", post(analyze_handler::<S>))
        .route(
            "/api/v1/assessments/:assessment/responses",
            post(submit_handler::<S>),
        )
        .route(
            "/api/v1/assessments/:assessment/users/:user_id/analysis",
            get(analysis_handler::<S>),
        )
        .route(
            "/api/v1/assessments/:assessment/users/:user_id/report",
            get(report_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn catalog_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> HttpResponse
where
    S: ResponseStore + 'static,
{
    let catalog = service.engine().catalog();
    let payload = json!({
        "categories": catalog.categories(),
        "questions": catalog.questions(),
        "warnings": catalog.warnings(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn analyze_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    axum::Json(request): axum::Json<AnalyzeRequest>,
) -> HttpResponse
where
    S: ResponseStore + 'static,
{
    let analysis = match request.top_n {
        Some(top_n) => service.analyze_with_top_n(&request.responses, top_n),
        None => service.analyze(&request.responses),
    };
    (StatusCode::OK, axum::Json(analysis)).into_response()
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(assessment): Path<String>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> HttpResponse
where
    S: ResponseStore + 'static,
{
    match service.submit(&request.user_id, &assessment, request.responses) {
        Ok((set, _stored)) => {
            let analysis = service.analyze(&set.responses);
            let payload = json!({
                "user_id": set.user_id,
                "assessment_name": set.assessment_name,
                "recorded_at": set.recorded_at,
                "response_count": set.responses.len(),
                "analysis": analysis,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn analysis_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path((assessment, user_id)): Path<(String, String)>,
) -> HttpResponse
where
    S: ResponseStore + 'static,
{
    match service.latest_analysis(&user_id, &assessment) {
        Ok(analysis) => (StatusCode::OK, axum::Json(analysis)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path((assessment, user_id)): Path<(String, String)>,
) -> HttpResponse
where
    S: ResponseStore + 'static,
{
    match service.report(&user_id, &assessment, Utc::now()) {
        Ok(report) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            report.render_html(),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> HttpResponse {
    let status = match &error {
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Storage(StorageError::InvalidKey { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
