//! The closed error taxonomy used throughout the application.
//!
//! [`ErrorKind`] is the single source of truth for caller-facing status
//! codes: every kind maps to exactly one default status, and no other
//! component decides status codes. [`AppError`] values are immutable once
//! constructed; the named factories never fail and never panic.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Result type alias for operations that fail with an [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;

/// Closed set of failure categories, independent of any particular
/// transport's status-code scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    // Auth (4xx)
    Unauthorized,
    Forbidden,
    InvalidCredentials,
    TokenExpired,

    // Validation (4xx)
    ValidationError,
    InvalidInput,
    MissingRequiredField,

    // Resource (4xx)
    NotFound,
    AlreadyExists,
    Conflict,

    // Server (5xx)
    InternalError,
    DatabaseError,
    ExternalServiceError,

    // Business rules
    BusinessRuleViolation,
}

impl ErrorKind {
    /// The fixed HTTP-equivalent status for this kind.
    #[must_use]
    pub const fn default_status(self) -> u16 {
        match self {
            Self::Unauthorized | Self::InvalidCredentials | Self::TokenExpired => 401,
            Self::Forbidden => 403,
            Self::ValidationError | Self::InvalidInput | Self::MissingRequiredField => 400,
            Self::NotFound => 404,
            Self::AlreadyExists | Self::Conflict => 409,
            Self::InternalError | Self::DatabaseError => 500,
            Self::ExternalServiceError => 502,
            Self::BusinessRuleViolation => 422,
        }
    }

    /// Stable wire label, identical to the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidInput => "INVALID_INPUT",
            Self::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ExternalServiceError => "EXTERNAL_SERVICE_ERROR",
            Self::BusinessRuleViolation => "BUSINESS_RULE_VIOLATION",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured metadata attached to an error at construction.
pub type ErrorMetadata = Map<String, Value>;

/// A typed error value carrying a kind, message, HTTP-equivalent status,
/// and optional structured metadata.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// Failure category.
    pub kind: ErrorKind,
    /// Human-readable message, safe to surface to callers.
    pub message: String,
    /// Caller-facing status code, always the kind's fixed mapping.
    pub status: u16,
    /// Optional structured detail (validation field lists, etc.).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ErrorMetadata>,
}

impl AppError {
    /// Construct an error from a kind and message using the kind's fixed
    /// status.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), status: kind.default_status(), metadata: None }
    }

    /// Attach structured metadata (builder style).
    #[must_use]
    pub fn with_metadata(mut self, metadata: ErrorMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Authentication required.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(ErrorKind::Unauthorized, "인증이 필요합니다")
    }

    /// Caller lacks permission.
    #[must_use]
    pub fn forbidden() -> Self {
        Self::new(ErrorKind::Forbidden, "권한이 없습니다")
    }

    /// Named resource does not exist.
    #[must_use]
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorKind::NotFound, format!("{resource}을(를) 찾을 수 없습니다"))
    }

    /// Input failed validation; metadata may carry the offending fields.
    #[must_use]
    pub fn validation(message: impl Into<String>, metadata: Option<ErrorMetadata>) -> Self {
        let mut error = Self::new(ErrorKind::ValidationError, message);
        error.metadata = metadata;
        error
    }

    /// State conflict with an existing resource.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Unexpected server-side failure.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalError, message)
    }

    /// Storage-layer failure.
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DatabaseError, message)
    }

    /// Returns `true` when the error carries the given kind.
    #[must_use]
    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}
