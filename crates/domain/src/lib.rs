//! # Noticeboard Domain
//!
//! Pure data model layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The closed error taxonomy and its status-code mapping
//! - The canonical success/error response envelopes
//! - Observability record types (audit events, metric samples, health)
//! - Application configuration
//!
//! ## Architecture Principles
//! - No database, HTTP, or platform code
//! - Every wire-visible type is serde-serializable
//! - Values are immutable once constructed

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod config;
pub mod envelope;
pub mod errors;
pub mod types;

pub use config::{Config, DatabaseConfig, ObservabilityConfig, ServerConfig, StoreLimits};
pub use envelope::{ApiErrorBody, ApiFailure, ApiSuccess, Paginated, Pagination};
pub use errors::{AppError, ErrorKind, Result};
