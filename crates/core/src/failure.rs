//! Failure classification and response translation.
//!
//! [`Failure`] is the single sum type a request handler can fail with:
//! a typed application error, a classified storage error, a generic
//! message, or an unknown failure. [`Translator`] turns any of them into
//! the canonical error envelope plus status code. Internal storage and
//! generic messages are replaced with fixed caller-facing text unless
//! verbose mode is on; typed application errors pass their message
//! through unchanged because the factories only produce safe text.

use thiserror::Error;

use noticeboard_domain::config::ObservabilityConfig;
use noticeboard_domain::envelope::ApiFailure;
use noticeboard_domain::errors::{AppError, ErrorKind};

use crate::logging::LogInput;
use crate::storage_ports::{StorageError, StorageErrorCode};

/// Caller-facing text for hidden internal failures.
pub const GENERIC_INTERNAL_MESSAGE: &str = "서버 내부 오류가 발생했습니다";
/// Caller-facing text for failures with no usable information at all.
pub const GENERIC_UNKNOWN_MESSAGE: &str = "알 수 없는 오류가 발생했습니다";
/// Caller-facing text for uniqueness violations.
pub const DUPLICATE_MESSAGE: &str = "이미 존재하는 데이터입니다";
/// Caller-facing text for missing rows reported by storage.
pub const ROW_NOT_FOUND_MESSAGE: &str = "데이터를 찾을 수 없습니다";

/// Everything a request handler can fail with.
#[derive(Debug, Clone, Error)]
pub enum Failure {
    /// A typed application error; translates verbatim.
    #[error(transparent)]
    Typed(AppError),
    /// A classified storage error; translates by its code.
    #[error("storage error: {0}")]
    Foreign(StorageError),
    /// An error that only has a message.
    #[error("{0}")]
    Generic(String),
    /// A failure with no usable information.
    #[error("unknown error")]
    Unknown,
}

impl From<AppError> for Failure {
    fn from(error: AppError) -> Self {
        Self::Typed(error)
    }
}

impl From<StorageError> for Failure {
    fn from(error: StorageError) -> Self {
        Self::Foreign(error)
    }
}

impl From<&Failure> for LogInput {
    fn from(failure: &Failure) -> Self {
        match failure {
            Failure::Typed(err) => LogInput::App(err.clone()),
            Failure::Foreign(err) => LogInput::foreign("StorageError", err.message.clone()),
            Failure::Generic(message) => LogInput::foreign("Error", message.clone()),
            Failure::Unknown => LogInput::foreign("UnknownError", GENERIC_UNKNOWN_MESSAGE),
        }
    }
}

/// Turns failures into the wire contract: `(status, error envelope)`.
#[derive(Debug, Clone)]
pub struct Translator {
    config: ObservabilityConfig,
}

impl Translator {
    #[must_use]
    pub fn new(config: ObservabilityConfig) -> Self {
        Self { config }
    }

    /// Translate a failure into its status code and error envelope.
    ///
    /// Typed errors keep their kind, message, status, and metadata.
    /// Storage errors map by code: uniqueness violations to
    /// `ALREADY_EXISTS`/409, missing rows to `NOT_FOUND`/404, anything
    /// else to the hidden internal path. Generic and unknown failures are
    /// always 500; generic messages surface only in verbose mode.
    #[must_use]
    pub fn translate(&self, failure: &Failure, request_id: Option<String>) -> (u16, ApiFailure) {
        match failure {
            Failure::Typed(err) => (
                err.status,
                ApiFailure::new(
                    err.kind,
                    err.message.clone(),
                    err.metadata.clone().map(serde_json::Value::Object),
                    request_id,
                ),
            ),
            Failure::Foreign(err) => match err.code {
                StorageErrorCode::UniqueViolation => (
                    409,
                    ApiFailure::new(
                        ErrorKind::AlreadyExists,
                        DUPLICATE_MESSAGE,
                        err.details.clone(),
                        request_id,
                    ),
                ),
                StorageErrorCode::NotFound => (
                    404,
                    ApiFailure::new(ErrorKind::NotFound, ROW_NOT_FOUND_MESSAGE, None, request_id),
                ),
                StorageErrorCode::Other => {
                    (500, self.internal_envelope(&err.message, request_id))
                }
            },
            Failure::Generic(message) => (500, self.internal_envelope(message, request_id)),
            Failure::Unknown => (
                500,
                ApiFailure::new(
                    ErrorKind::InternalError,
                    GENERIC_UNKNOWN_MESSAGE,
                    None,
                    request_id,
                ),
            ),
        }
    }

    fn internal_envelope(&self, internal_message: &str, request_id: Option<String>) -> ApiFailure {
        let message = if self.config.verbose {
            internal_message
        } else {
            GENERIC_INTERNAL_MESSAGE
        };
        ApiFailure::new(ErrorKind::InternalError, message, None, request_id)
    }
}
