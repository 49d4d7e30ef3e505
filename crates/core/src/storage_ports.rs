//! Storage port: the storage client seam the core depends on.
//!
//! The core never sees a concrete driver. It sees a connectivity probe
//! ([`StoragePort`]) and a closed error shape ([`StorageError`]) that the
//! infra adapter maps driver errors into. The translator keys off
//! [`StorageErrorCode`], never off driver-specific strings.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Driver-independent classification of a storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// A uniqueness constraint was violated.
    UniqueViolation,
    /// The targeted row does not exist.
    NotFound,
    /// Anything else the driver reported.
    Other,
}

/// A storage failure, already classified by the infra adapter.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct StorageError {
    pub code: StorageErrorCode,
    /// Driver-level message. Internal; never sent to callers verbatim
    /// outside verbose mode.
    pub message: String,
    /// Optional structured detail, e.g. the violated column set.
    pub details: Option<Value>,
}

impl StorageError {
    /// A uniqueness-constraint violation.
    #[must_use]
    pub fn unique_violation(message: impl Into<String>, details: Option<Value>) -> Self {
        Self { code: StorageErrorCode::UniqueViolation, message: message.into(), details }
    }

    /// A missing-row failure.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self { code: StorageErrorCode::NotFound, message: message.into(), details: None }
    }

    /// An unclassified driver failure.
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self { code: StorageErrorCode::Other, message: message.into(), details: None }
    }
}

/// Connectivity probe over the storage backend.
#[async_trait]
pub trait StoragePort: Send + Sync {
    /// Execute a trivial query against the backend. `Ok` means reachable.
    async fn ping(&self) -> Result<(), StorageError>;
}
