//! Request observation middleware.
//!
//! Every request gets an opaque id before its handler runs. Handlers
//! fail with [`HandlerError`]; its `IntoResponse` impl parks the inner
//! [`Failure`] in the response extensions, and this middleware picks it
//! back up, logs it with the request context, and translates it into the
//! canonical error envelope. The same pass records every completed
//! request in the metrics store, success or not.

use std::any::Any;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use noticeboard_common::sanitize_context;
use noticeboard_core::{Failure, LogInput};

use crate::context::AppContext;

/// Opaque per-request id, `req_<millis>_<suffix>`.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    #[must_use]
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let uuid = Uuid::new_v4().simple().to_string();
        // Eight hex chars are plenty for log correlation.
        let suffix = &uuid[..8];
        Self(format!("req_{millis}_{suffix}"))
    }
}

/// Handler failure wrapper.
///
/// Anything convertible into [`Failure`] converts into this with `?`.
/// Its response is a placeholder; [`observe_request`] replaces it with
/// the translated envelope before the response leaves the stack.
#[derive(Debug)]
pub struct HandlerError(pub Failure);

impl<E> From<E> for HandlerError
where
    Failure: From<E>,
{
    fn from(err: E) -> Self {
        Self(Failure::from(err))
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self.0);
        response
    }
}

/// Contain handler panics inside the translation boundary.
///
/// The rest of the request runs on its own task, so an unwinding panic
/// stops at the join instead of tearing down the connection. The panic
/// payload becomes a [`Failure::Generic`] when it carries a message and
/// [`Failure::Unknown`] otherwise; either way [`observe_request`] picks
/// it up from the response extensions and translates it.
pub async fn catch_panics(request: Request, next: Next) -> Response {
    match tokio::spawn(next.run(request)).await {
        Ok(response) => response,
        Err(err) => {
            let failure = if err.is_panic() {
                match err.try_into_panic() {
                    Ok(payload) => match panic_message(payload.as_ref()) {
                        Some(message) => Failure::Generic(message),
                        None => Failure::Unknown,
                    },
                    Err(_) => Failure::Unknown,
                }
            } else {
                Failure::Unknown
            };
            let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
            response.extensions_mut().insert(failure);
            response
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
}

/// Assign a request id, time the request, translate parked failures, and
/// record the request sample.
pub async fn observe_request(
    State(ctx): State<AppContext>,
    mut request: Request,
    next: Next,
) -> Response {
    let request_id = RequestId::generate();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let url = request.uri().to_string();
    let headers = header_context(request.headers());
    request.extensions_mut().insert(request_id.clone());

    let started = Instant::now();
    let mut response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    if let Some(failure) = response.extensions_mut().remove::<Failure>() {
        let mut context = Map::new();
        context.insert("requestId".to_string(), Value::from(request_id.0.clone()));
        context.insert("method".to_string(), Value::from(method.clone()));
        context.insert("url".to_string(), Value::from(url));
        context.insert("headers".to_string(), Value::Object(headers));
        ctx.logger.error(LogInput::from(&failure), Some(context));

        let (status, envelope) = ctx.translator.translate(&failure, Some(request_id.0.clone()));
        let status =
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        response = (status, Json(envelope)).into_response();
    }

    ctx.metrics.record_request(&method, &path, response.status().as_u16(), elapsed_ms);
    response
}

/// Headers as a context map, with sensitive header values redacted
/// before they reach any log record.
fn header_context(headers: &HeaderMap) -> Map<String, Value> {
    let raw: Map<String, Value> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                Value::from(String::from_utf8_lossy(value.as_bytes()).into_owned()),
            )
        })
        .collect();
    sanitize_context(&raw)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue};
    use serde_json::json;

    use super::{header_context, panic_message, RequestId};

    #[test]
    fn panic_payloads_keep_their_message_when_they_have_one() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("연결이 끊어졌습니다");
        assert_eq!(panic_message(boxed.as_ref()).as_deref(), Some("연결이 끊어졌습니다"));

        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("boom"));
        assert_eq!(panic_message(owned.as_ref()).as_deref(), Some("boom"));

        let opaque: Box<dyn std::any::Any + Send> = Box::new(42_u32);
        assert!(panic_message(opaque.as_ref()).is_none());
    }

    #[test]
    fn request_ids_carry_the_expected_shape() {
        let RequestId(id) = RequestId::generate();
        let parts: Vec<&str> = id.splitn(3, '_').collect();

        assert_eq!(parts[0], "req");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 8);
    }

    #[test]
    fn header_context_redacts_credentials() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
        headers.insert("cookie", HeaderValue::from_static("session=1"));
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let context = header_context(&headers);
        assert_eq!(context["authorization"], json!("[REDACTED]"));
        assert_eq!(context["cookie"], json!("[REDACTED]"));
        assert_eq!(context["accept"], json!("application/json"));
    }
}
