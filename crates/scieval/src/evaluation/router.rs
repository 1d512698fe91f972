use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CategoryInputs, Period, RawSubmission, SubjectId};
use super::service::{EvaluationService, ServiceError, SupersedePolicy};
use super::store::{EvaluationStore, StoreError};
use super::weights::WeightConfig;

/// Intake request: raw block figures plus the weights to evaluate under.
/// Omitted weights fall back to the equal-weight default.
#[derive(Debug, Deserialize)]
pub struct EvaluationRequest {
    pub subject: String,
    pub period: String,
    #[serde(default)]
    pub weights: WeightConfig,
    pub entries: Vec<CategoryInputs>,
    /// Explicit opt-in to replace an existing final evaluation.
    #[serde(default)]
    pub supersede: bool,
}

/// Router builder exposing the engine's HTTP endpoints.
pub fn evaluation_router<S>(service: Arc<EvaluationService<S>>) -> Router
where
    S: EvaluationStore + 'static,
{
    Router::new()
        .route("/api/v1/evaluations", post(evaluate_handler::<S>))
        .route(
            "/api/v1/evaluations/:subject/:period",
            get(final_handler::<S>),
        )
        .route(
            "/api/v1/periods/:period/evaluations",
            get(period_report_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response
where
    S: EvaluationStore + 'static,
{
    let policy = if request.supersede {
        SupersedePolicy::Replace
    } else {
        SupersedePolicy::Deny
    };

    let draft = match service.evaluate(
        SubjectId(request.subject),
        Period(request.period),
        RawSubmission {
            entries: request.entries,
        },
        request.weights,
    ) {
        Ok(draft) => draft,
        Err(error) => return error_response(error),
    };

    match service.commit(draft, policy) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.summary())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn final_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    Path((subject, period)): Path<(String, String)>,
) -> Response
where
    S: EvaluationStore + 'static,
{
    match service.find_final(&SubjectId(subject), &Period(period)) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "no final evaluation for this subject and period" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn period_report_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    Path(period): Path<String>,
) -> Response
where
    S: EvaluationStore + 'static,
{
    match service.report_for_period(&Period(period)) {
        Ok(rows) => (StatusCode::OK, axum::Json(rows)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Evaluation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::FinalExists { .. } | ServiceError::Store(StoreError::Conflict) => {
            StatusCode::CONFLICT
        }
        ServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::NotDraft { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
