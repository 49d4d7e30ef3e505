//! # Noticeboard Core
//!
//! The observability and error-handling core every request handler is
//! wrapped in:
//! - Structured logger with context sanitization
//! - Failure sum type and its wire-level translator
//! - Append-only, capacity-bounded audit trail
//! - Bounded, time-windowed metrics store
//! - Composite health-check aggregator
//!
//! ## Architecture Principles
//! - Only depends on `noticeboard-common` and `noticeboard-domain`
//! - No database, HTTP, or platform code
//! - All external collaborators (storage client, process metrics source,
//!   audit sink) via traits
//! - Stores are explicitly constructed and injected; no global state

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod audit;
pub mod failure;
pub mod health;
pub mod logging;
pub mod metrics;

// Infrastructure ports
pub mod notice_ports;
pub mod process_ports;
pub mod storage_ports;

pub use audit::{AuditQuery, AuditSink, AuditTrail, NoOpAuditSink};
pub use failure::{Failure, Translator};
pub use health::HealthService;
pub use logging::{LogInput, LogLevel, LogRecord, StructuredLogger};
pub use metrics::{MetricsStore, Timer};
pub use notice_ports::{CreateNotice, NoticeRepository};
pub use process_ports::ProcessMetricsPort;
pub use storage_ports::{StorageError, StorageErrorCode, StoragePort};
