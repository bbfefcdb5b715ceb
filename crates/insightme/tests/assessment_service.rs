use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use insightme::assessment::{
    assessment_router, AnalysisSettings, AssessmentService, QuestionCatalog, Response,
    ScoringEngine, ServiceError,
};
use insightme::storage::{FileResponseStore, StorageError};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn build_service() -> (Arc<AssessmentService<FileResponseStore>>, TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = Arc::new(FileResponseStore::new(dir.path()));
    let service = AssessmentService::new(
        ScoringEngine::new(QuestionCatalog::standard()),
        store,
        AnalysisSettings::default(),
    );
    (Arc::new(service), dir)
}

fn sample_responses() -> Vec<Response> {
    vec![
        Response::new("CV01", 4),
        Response::new("CV03", 5),
        Response::new("MI01", 2),
        Response::new("MI03", "yes"),
        Response::new("LM01", "b"),
        Response::new("RF01", "Patience <3"),
    ]
}

async fn read_body(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

async fn read_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("json payload")
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[test]
fn submitted_sets_drive_latest_analysis() {
    let (service, _dir) = build_service();

    let (set, stored) = service
        .submit("u1", "full", sample_responses())
        .expect("submit succeeds");
    assert_eq!(set.responses.len(), 6);
    assert!(stored.location.is_some());

    let analysis = service
        .latest_analysis("u1", "full")
        .expect("analysis available");
    assert_eq!(analysis.overall_scores.get("Compassion"), Some(&5.0));
    assert_eq!(analysis.motivation_trends.get("Extrinsic Motivation"), Some(&4.0));

    let history = service.history("u1", "full").expect("history lists");
    assert_eq!(history.len(), 1);
}

#[test]
fn unknown_users_are_not_found() {
    let (service, _dir) = build_service();

    match service.latest_analysis("nobody", "full") {
        Err(ServiceError::NotFound { user_id, .. }) => assert_eq!(user_id, "nobody"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn path_like_user_ids_are_rejected() {
    let (service, _dir) = build_service();

    match service.submit("../u1", "full", sample_responses()) {
        Err(ServiceError::Storage(StorageError::InvalidKey { .. })) => {}
        other => panic!("expected invalid key, got {other:?}"),
    }
}

#[tokio::test]
async fn catalog_route_lists_questions() {
    let (service, _dir) = build_service();
    let router = assessment_router(service);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/catalog")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["categories"][0], json!("Core Values"));
    assert!(payload["questions"]
        .as_array()
        .is_some_and(|questions| !questions.is_empty()));
}

#[tokio::test]
async fn analyze_route_honors_top_n() {
    let (service, _dir) = build_service();
    let router = assessment_router(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/analyze",
            json!({
                "responses": [
                    {"question_id": "CV01", "answer": 5},
                    {"question_id": "MI01", "answer": 1},
                    {"question_id": "MI02", "answer": 3}
                ],
                "top_n": 1
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(
        payload["strengths_weaknesses"]["strengths"],
        json!([["Integrity", 5.0]])
    );
    assert_eq!(
        payload["strengths_weaknesses"]["weaknesses"],
        json!([["Logical-Mathematical", 1.0]])
    );
    assert_eq!(payload["coverage"]["scored"], json!(3));
}

#[tokio::test]
async fn submit_then_fetch_analysis_and_report() {
    let (service, _dir) = build_service();
    let router = assessment_router(service);

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/assessments/full/responses",
            json!({
                "user_id": "u1",
                "responses": serde_json::to_value(sample_responses()).expect("responses serialize")
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json(response).await;
    assert_eq!(payload["assessment_name"], json!("full"));
    assert_eq!(payload["response_count"], json!(6));

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/assessments/full/users/u1/analysis")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["overall_scores"]["Integrity"], json!(4.0));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/assessments/full/users/u1/report")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/html; charset=utf-8")
    );
    let html = String::from_utf8(read_body(response).await).expect("utf-8 html");
    assert!(html.contains("Patience &lt;3"));
    assert!(!html.contains("Patience <3"));
}

#[tokio::test]
async fn missing_analysis_returns_not_found() {
    let (service, _dir) = build_service();
    let router = assessment_router(service);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/assessments/full/users/ghost/analysis")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("ghost")));
}
