//! Foundational utilities shared across Noticeboard crates.
//!
//! This crate has no domain knowledge: it provides the bounded collections
//! the observability stores are built on and the context-sanitization
//! helpers every log and audit write must pass through.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod collections;
pub mod privacy;

pub use collections::BoundedLog;
pub use privacy::{is_sensitive_key, sanitize_context, REDACTION_MARKER};
