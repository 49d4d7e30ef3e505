//! Extractors whose rejections stay inside the translation boundary.
//!
//! axum's stock `Json`/`Path`/`Query` answer malformed input with
//! plain-text rejections, which would bypass the canonical envelope.
//! These wrappers delegate to the stock extractors and map every
//! rejection into a [`HandlerError`], so a bad body or path parameter is
//! logged and translated exactly like any other handler failure.

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use noticeboard_core::Failure;
use noticeboard_domain::errors::{AppError, ErrorKind};

use crate::middleware::HandlerError;

/// JSON body extractor; doubles as the JSON response wrapper.
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                invalid_input("요청 본문이 올바르지 않습니다", rejection.body_text())
            })?;
        Ok(Self(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Path parameter extractor.
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) =
            axum::extract::Path::<T>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    invalid_input("요청 경로가 올바르지 않습니다", rejection.body_text())
                })?;
        Ok(Self(value))
    }
}

/// Query string extractor.
pub struct Query<T>(pub T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) =
            axum::extract::Query::<T>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    invalid_input("요청 쿼리가 올바르지 않습니다", rejection.body_text())
                })?;
        Ok(Self(value))
    }
}

fn invalid_input(message: &str, reason: String) -> HandlerError {
    let mut metadata = Map::new();
    metadata.insert("reason".to_string(), Value::from(reason));
    HandlerError(Failure::Typed(
        AppError::new(ErrorKind::InvalidInput, message).with_metadata(metadata),
    ))
}
