//! Metrics endpoint.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use noticeboard_domain::envelope::ApiSuccess;
use noticeboard_domain::errors::AppError;

use crate::context::AppContext;
use crate::extract::Query;
use crate::middleware::{HandlerError, RequestId};

const DEFAULT_WINDOW_MINUTES: i64 = 5;
const DEFAULT_RECENT_LIMIT: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct MetricsParams {
    /// `summary` (default), `requests`, or `recent`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Window in minutes for `type=requests`.
    pub window: Option<i64>,
    /// Entry cap for `type=recent`.
    pub limit: Option<usize>,
}

/// `GET /api/metrics` — summary, windowed request stats, or recent raw
/// entries, selected by `type`.
pub async fn metrics(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<MetricsParams>,
) -> Result<Response, HandlerError> {
    let request_id = Some(request_id.0);
    match params.kind.as_deref().unwrap_or("summary") {
        "summary" => {
            let summary = ctx.metrics.summary(ctx.process.as_ref());
            Ok(Json(ApiSuccess::new(summary, request_id)).into_response())
        }
        "requests" => {
            let window = params.window.unwrap_or(DEFAULT_WINDOW_MINUTES);
            let stats = ctx.metrics.window_stats(window);
            Ok(Json(ApiSuccess::new(json!({ "window": window, "stats": stats }), request_id))
                .into_response())
        }
        "recent" => {
            let limit = params.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
            let body = json!({
                "requests": ctx.metrics.recent_requests(limit),
                "samples": ctx.metrics.recent_samples(limit),
            });
            Ok(Json(ApiSuccess::new(body, request_id)).into_response())
        }
        other => {
            let mut metadata = Map::new();
            metadata.insert("type".to_string(), Value::from(other));
            Err(AppError::validation("지원하지 않는 메트릭 유형입니다", Some(metadata)).into())
        }
    }
}
