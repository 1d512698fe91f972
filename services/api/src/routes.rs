use crate::infra::{AppState, InMemoryEvaluationStore};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use scieval::evaluation::{evaluation_router, EvaluationService, Period, ReportRow};
use serde_json::json;
use std::sync::Arc;

/// Engine endpoints plus the operational and export routes.
pub(crate) fn with_evaluation_routes(
    service: Arc<EvaluationService<InMemoryEvaluationStore>>,
) -> axum::Router {
    let export_routes = axum::Router::new()
        .route(
            "/api/v1/periods/:period/export",
            axum::routing::get(export_endpoint),
        )
        .with_state(service.clone());

    evaluation_router(service)
        .merge(export_routes)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Spreadsheet-compatible export of one period: the projected report rows
/// encoded as CSV, superseded records included for the audit trail.
pub(crate) async fn export_endpoint(
    State(service): State<Arc<EvaluationService<InMemoryEvaluationStore>>>,
    Path(period): Path<String>,
) -> axum::response::Response {
    let rows = match service.report_for_period(&Period(period.clone())) {
        Ok(rows) => rows,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
        }
    };

    match encode_csv(&rows) {
        Ok(body) => {
            let filename = format!("evaluations_{period}.csv");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename={filename}"),
                    ),
                ],
                body,
            )
                .into_response()
        }
        Err(error) => {
            let payload = json!({ "error": format!("export encoding failed: {error}") });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) fn encode_csv(rows: &[ReportRow]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(std::io::Error::other(err)))
}
