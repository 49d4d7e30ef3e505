//! End-to-end tests of the observability core: failure translation,
//! logging, audit trail, metrics, and health working together the way
//! the request layer drives them.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use noticeboard_core::{
    AuditQuery, AuditTrail, Failure, HealthService, LogInput, LogLevel, MetricsStore,
    NoOpAuditSink, ProcessMetricsPort, StorageError, StoragePort, StructuredLogger, Translator,
};
use noticeboard_domain::config::ObservabilityConfig;
use noticeboard_domain::errors::{AppError, ErrorKind};
use noticeboard_domain::types::{HealthStatus, MemoryUsage};

struct FakeStorage {
    healthy: bool,
}

#[async_trait]
impl StoragePort for FakeStorage {
    async fn ping(&self) -> Result<(), StorageError> {
        if self.healthy {
            Ok(())
        } else {
            Err(StorageError::other("database is locked"))
        }
    }
}

struct FakeProcess;

impl ProcessMetricsPort for FakeProcess {
    fn memory(&self) -> MemoryUsage {
        MemoryUsage {
            heap_used_bytes: 64 * 1024 * 1024,
            heap_total_bytes: 256 * 1024 * 1024,
            rss_bytes: 96 * 1024 * 1024,
        }
    }

    fn uptime(&self) -> Duration {
        Duration::from_secs(7_500)
    }
}

fn context(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

/// A handler fails with a typed error; the caller sees the typed
/// envelope, and the composed log record carries the request context
/// with secrets redacted.
#[test]
fn typed_failure_translates_and_logs_with_redaction() {
    let config = ObservabilityConfig::default();
    let logger = StructuredLogger::new(config);
    let translator = Translator::new(config);

    let failure = Failure::from(AppError::validation(
        "제목은 필수입니다",
        Some(context(&[("field", json!("title"))])),
    ));

    let (status, envelope) = translator.translate(&failure, Some("req_1700000000_ab12cd34".into()));
    assert_eq!(status, 400);
    assert_eq!(envelope.error.code, ErrorKind::ValidationError);
    assert_eq!(envelope.error.details, Some(json!({ "field": "title" })));
    assert_eq!(envelope.request_id.as_deref(), Some("req_1700000000_ab12cd34"));

    let record = logger.compose(
        LogLevel::Error,
        LogInput::from(&failure),
        Some(context(&[
            ("requestId", json!("req_1700000000_ab12cd34")),
            ("method", json!("POST")),
            ("url", json!("/api/notices")),
            ("authorization", json!("Bearer abc123")),
        ])),
    );

    let ctx = record.context.unwrap();
    assert_eq!(ctx["authorization"], json!("[REDACTED]"));
    assert_eq!(ctx["method"], json!("POST"));
    assert_eq!(ctx["errorMetadata"]["field"], json!("title"));
    assert_eq!(record.error.unwrap().kind.as_deref(), Some("VALIDATION_ERROR"));
}

/// A storage-level duplicate surfaces as the fixed conflict contract,
/// never as driver text, while the internal message stays available for
/// the log record.
#[test]
fn duplicate_insert_reaches_the_caller_as_conflict() {
    let translator = Translator::new(ObservabilityConfig::default());
    let failure = Failure::from(StorageError::unique_violation(
        "UNIQUE constraint failed: notices.title",
        Some(json!({ "target": "notices.title" })),
    ));

    let (status, envelope) = translator.translate(&failure, None);
    assert_eq!(status, 409);
    assert_eq!(envelope.error.code, ErrorKind::AlreadyExists);
    assert_eq!(envelope.error.message, "이미 존재하는 데이터입니다");

    // The raw driver message still reaches the logger.
    let record = StructuredLogger::new(ObservabilityConfig::default()).compose(
        LogLevel::Error,
        LogInput::from(&failure),
        None,
    );
    assert_eq!(
        record.error.unwrap().message,
        "UNIQUE constraint failed: notices.title"
    );
}

/// The audit trail and metrics store stay bounded under sustained load
/// and keep only the most recent entries, in order.
#[test]
fn stores_stay_bounded_under_load() {
    let trail = AuditTrail::new(100, Arc::new(NoOpAuditSink));
    for i in 0..1_000 {
        trail.record_data_create(1, "kim", "공지", &i.to_string(), None);
    }
    assert_eq!(trail.len(), 100);
    let events = trail.query(&AuditQuery::default());
    assert_eq!(events.first().unwrap().resource_id.as_deref(), Some("900"));
    assert_eq!(events.last().unwrap().resource_id.as_deref(), Some("999"));

    let metrics = MetricsStore::new(50);
    for i in 0..500 {
        metrics.record_request("GET", "/api/notices", 200, f64::from(i));
    }
    assert_eq!(metrics.request_count(), 50);
    let stats = metrics.window_stats(5);
    assert_eq!(stats.total_requests, 50);
    assert_eq!(stats.min_duration, 450.0);
    assert_eq!(stats.max_duration, 499.0);
}

/// Measuring a failing operation records the error-tagged sample and
/// re-raises the failure unchanged.
#[tokio::test]
async fn measured_failures_are_recorded_and_reraised() {
    let metrics = MetricsStore::new(10);

    let result: Result<(), StorageError> = metrics
        .measure_execution_time("notices.create", async {
            Err(StorageError::other("disk I/O error"))
        })
        .await;

    assert!(result.is_err());
    let sample = &metrics.recent_samples(1)[0];
    assert_eq!(sample.name, "notices.create");
    assert_eq!(sample.tags.as_ref().unwrap()["status"], "error");
}

/// The summary combines window stats with process memory and uptime
/// from the port.
#[test]
fn summary_reads_the_process_port() {
    let metrics = MetricsStore::new(10);
    metrics.record_request("GET", "/api/health", 200, 5.0);

    let summary = metrics.summary(&FakeProcess);
    assert_eq!(summary.requests.total_requests, 1);
    assert_eq!(summary.memory.heap_used_mb, 64);
    assert_eq!(summary.memory.rss_mb, 96);
    assert_eq!(summary.uptime.hours, 2);
}

/// A broken storage backend makes the rollup unhealthy without
/// suppressing the memory and uptime components.
#[tokio::test]
async fn health_rollup_isolates_the_failing_component() {
    let broken = HealthService::new(Arc::new(FakeStorage { healthy: false }), Arc::new(FakeProcess));

    let result = broken.check_health().await;
    assert_eq!(result.status, HealthStatus::Unhealthy);
    assert_eq!(result.checks.database.status, HealthStatus::Unhealthy);
    assert_eq!(result.checks.memory.status, HealthStatus::Healthy);
    assert_eq!(result.checks.uptime.message.as_deref(), Some("Uptime: 2h 5m"));

    let healthy = HealthService::new(Arc::new(FakeStorage { healthy: true }), Arc::new(FakeProcess));
    assert_eq!(healthy.check_health().await.status, HealthStatus::Healthy);
    assert!(healthy.check_readiness().await);
    assert!(!broken.check_readiness().await);
}
