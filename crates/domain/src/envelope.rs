//! Canonical response envelopes.
//!
//! Every handler response is translated into one of two wire shapes: the
//! success envelope `{success: true, data, timestamp, requestId?}` or the
//! error envelope `{success: false, error: {code, message, details?},
//! timestamp, requestId?}`. This two-shape contract is what every API
//! consumer depends on and must be preserved exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ErrorKind;

/// Canonical success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSuccess<T> {
    /// Always `true`.
    pub success: bool,
    /// Handler payload.
    pub data: T,
    /// ISO-8601 creation instant.
    pub timestamp: DateTime<Utc>,
    /// Request-scoped opaque id, when the request layer assigned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl<T> ApiSuccess<T> {
    /// Wrap a payload in the success envelope.
    #[must_use]
    pub fn new(data: T, request_id: Option<String>) -> Self {
        Self { success: true, data, timestamp: Utc::now(), request_id }
    }
}

/// Error detail inside the error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Taxonomy kind, rendered as its wire label.
    pub code: ErrorKind,
    /// Caller-facing message.
    pub message: String,
    /// Optional structured detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Canonical error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFailure {
    /// Always `false`.
    pub success: bool,
    /// Error detail.
    pub error: ApiErrorBody,
    /// ISO-8601 creation instant.
    pub timestamp: DateTime<Utc>,
    /// Request-scoped opaque id, when the request layer assigned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ApiFailure {
    /// Build an error envelope for the given kind and message.
    #[must_use]
    pub fn new(
        code: ErrorKind,
        message: impl Into<String>,
        details: Option<Value>,
        request_id: Option<String>,
    ) -> Self {
        Self {
            success: false,
            error: ApiErrorBody { code, message: message.into(), details },
            timestamp: Utc::now(),
            request_id,
        }
    }
}

/// Pagination block carried by list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// A page of items plus its pagination block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    /// Assemble a page from its items and counts.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_items: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(u64::from(page_size)) as u32
        };
        Self {
            items,
            pagination: Pagination {
                page,
                page_size,
                total_items,
                total_pages,
                has_next: page < total_pages,
                has_previous: page > 1,
            },
        }
    }
}
