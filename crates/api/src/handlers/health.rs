//! Health endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use noticeboard_domain::envelope::ApiSuccess;
use noticeboard_domain::types::HealthStatus;

use crate::context::AppContext;
use crate::extract::Query;
use crate::middleware::RequestId;

#[derive(Debug, Default, Deserialize)]
pub struct HealthParams {
    pub mode: Option<String>,
}

/// `GET /api/health` — quick connectivity check by default,
/// `?mode=detailed` for the full component rollup. Unhealthy results
/// answer 503 so load balancers can act on the status code alone.
pub async fn health(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<HealthParams>,
) -> Response {
    if params.mode.as_deref() == Some("detailed") {
        let result = ctx.health.check_health().await;
        let status = http_status(result.status);
        (status, Json(ApiSuccess::new(result, Some(request_id.0)))).into_response()
    } else {
        let quick = ctx.health.check_health_quick().await;
        let status = http_status(quick.status);
        (status, Json(ApiSuccess::new(quick, Some(request_id.0)))).into_response()
    }
}

/// `GET /api/health/live` — the process answers, nothing else checked.
pub async fn liveness(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
) -> Response {
    let alive = ctx.health.check_liveness();
    Json(ApiSuccess::new(json!({ "alive": alive }), Some(request_id.0))).into_response()
}

/// `GET /api/health/ready` — ready to take traffic unless unhealthy.
pub async fn readiness(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
) -> Response {
    let ready = ctx.health.check_readiness().await;
    let status = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status, Json(ApiSuccess::new(json!({ "ready": ready }), Some(request_id.0)))).into_response()
}

fn http_status(status: HealthStatus) -> StatusCode {
    match status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    }
}
