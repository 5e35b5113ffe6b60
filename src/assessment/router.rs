use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{AssessmentId, BorrowerProfile, ResponseValue};
use super::recommendations::Recommendation;
use super::repository::{AssessmentRepository, AssessmentStatusView, OpportunityDirectory};
use super::scoring::ScoreSnapshot;
use super::service::{AssessmentService, ServiceError};

/// Router builder exposing HTTP endpoints for the assessment wizard and
/// lender matching.
pub fn assessment_router<R, O>(service: Arc<AssessmentService<R, O>>) -> Router
where
    R: AssessmentRepository + 'static,
    O: OpportunityDirectory + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(start_handler::<R, O>))
        .route(
            "/api/v1/assessments/:assessment_id",
            get(status_handler::<R, O>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/responses",
            put(responses_handler::<R, O>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/score",
            post(score_handler::<R, O>),
        )
        .route("/api/v1/matches", post(matches_handler::<R, O>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub owner: String,
}

#[derive(Debug, Deserialize)]
pub struct ResponseEntry {
    pub criterion_id: String,
    pub value: ResponseValue,
}

#[derive(Debug, Deserialize)]
pub struct ResponsesRequest {
    pub responses: Vec<ResponseEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScoreResponse {
    snapshot: ScoreSnapshot,
    recommendations: Vec<Recommendation>,
}

pub(crate) async fn start_handler<R, O>(
    State(service): State<Arc<AssessmentService<R, O>>>,
    axum::Json(request): axum::Json<StartRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
    O: OpportunityDirectory + 'static,
{
    match service.start(&request.owner) {
        Ok(assessment) => {
            let view = AssessmentStatusView::from_assessment(&assessment);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, O>(
    State(service): State<Arc<AssessmentService<R, O>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
    O: OpportunityDirectory + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.get(&id) {
        Ok(assessment) => {
            let view = AssessmentStatusView::from_assessment(&assessment);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn responses_handler<R, O>(
    State(service): State<Arc<AssessmentService<R, O>>>,
    Path(assessment_id): Path<String>,
    axum::Json(request): axum::Json<ResponsesRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
    O: OpportunityDirectory + 'static,
{
    let id = AssessmentId(assessment_id);
    let entries = request
        .responses
        .into_iter()
        .map(|entry| (entry.criterion_id, entry.value))
        .collect();

    match service.record_responses(&id, entries) {
        Ok(assessment) => {
            let view = AssessmentStatusView::from_assessment(&assessment);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<R, O>(
    State(service): State<Arc<AssessmentService<R, O>>>,
    Path(assessment_id): Path<String>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
    O: OpportunityDirectory + 'static,
{
    let id = AssessmentId(assessment_id);
    let today = Local::now().date_naive();

    match service.score(&id, request.industry.as_deref(), today) {
        Ok(assessment) => {
            // Both are set by a successful scoring pass.
            let snapshot = assessment.snapshot.clone().unwrap_or_else(|| {
                service.engine().score(&assessment.responses)
            });
            let body = ScoreResponse {
                snapshot,
                recommendations: assessment.recommendations.clone(),
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn matches_handler<R, O>(
    State(service): State<Arc<AssessmentService<R, O>>>,
    axum::Json(profile): axum::Json<BorrowerProfile>,
) -> Response
where
    R: AssessmentRepository + 'static,
    O: OpportunityDirectory + 'static,
{
    match service.matches(&profile) {
        Ok(matches) => (StatusCode::OK, axum::Json(json!({ "matches": matches }))).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (error.status_code(), axum::Json(payload)).into_response()
}
