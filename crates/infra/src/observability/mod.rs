//! Tracing subscriber setup and the tracing-backed audit sink.

use tracing_subscriber::EnvFilter;

use noticeboard_core::audit::AuditSink;
use noticeboard_domain::config::ObservabilityConfig;
use noticeboard_domain::types::AuditEvent;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise verbose mode defaults to `debug`
/// with human-readable output and quiet mode to `info` with one JSON
/// object per line.
pub fn init_tracing(config: &ObservabilityConfig) {
    let default_directive = if config.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    if config.verbose {
        tracing_subscriber::fmt().with_env_filter(filter).pretty().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    }
}

/// Audit sink that emits every event on the `noticeboard::audit` target,
/// so the trail's contents survive in the log stream beyond the bounded
/// in-memory window.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn forward(&self, event: &AuditEvent) {
        match serde_json::to_string(event) {
            Ok(line) => tracing::info!(target: "noticeboard::audit", "{line}"),
            Err(_) => tracing::warn!(
                target: "noticeboard::audit",
                action = %event.action,
                "audit event serialization failed"
            ),
        }
    }
}
