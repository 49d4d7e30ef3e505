//! # Noticeboard Infra
//!
//! Concrete adapters behind the core's ports: pooled SQLite storage,
//! procfs-backed process metrics, and the tracing subscriber setup plus
//! the tracing-backed audit sink.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod database;
pub mod observability;
pub mod process;

pub use database::{DbManager, SqliteNoticeRepository};
pub use observability::{init_tracing, TracingAuditSink};
pub use process::SystemProcessMetrics;
