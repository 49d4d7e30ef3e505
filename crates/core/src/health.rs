//! Composite health checks.
//!
//! Three sub-checks (storage connectivity, process memory, uptime) run
//! concurrently on separate tasks. A sub-check that fails or panics is
//! reported unhealthy in place; it never aborts the others. The overall
//! status is the worst status among the components.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde_json::{Map, Value};

use noticeboard_domain::types::{
    ComponentHealth, HealthCheckResult, HealthChecks, HealthStatus, QuickHealth,
};

use crate::process_ports::ProcessMetricsPort;
use crate::storage_ports::StoragePort;

/// Storage ping slower than this is degraded, in milliseconds.
const SLOW_STORAGE_MS: u64 = 1_000;
/// Heap usage above this percentage is degraded.
const MEMORY_DEGRADED_PERCENT: f64 = 75.0;
/// Heap usage above this percentage is unhealthy.
const MEMORY_UNHEALTHY_PERCENT: f64 = 90.0;

/// Aggregates component health over the injected ports.
pub struct HealthService {
    storage: Arc<dyn StoragePort>,
    process: Arc<dyn ProcessMetricsPort>,
}

impl HealthService {
    #[must_use]
    pub fn new(storage: Arc<dyn StoragePort>, process: Arc<dyn ProcessMetricsPort>) -> Self {
        Self { storage, process }
    }

    /// Run all sub-checks concurrently and roll them up.
    pub async fn check_health(&self) -> HealthCheckResult {
        let started = Instant::now();

        let storage = Arc::clone(&self.storage);
        let database = tokio::spawn(async move { check_database(storage.as_ref()).await });
        let process = Arc::clone(&self.process);
        let memory = tokio::spawn(async move { check_memory(process.as_ref()) });
        let process = Arc::clone(&self.process);
        let uptime = tokio::spawn(async move { check_uptime(process.as_ref()) });

        let (database, memory, uptime) = tokio::join!(database, memory, uptime);

        // A panicked or cancelled sub-check counts as unhealthy for that
        // component only.
        let database =
            database.unwrap_or_else(|_| ComponentHealth::unhealthy("Database check failed"));
        let memory = memory.unwrap_or_else(|_| ComponentHealth::unhealthy("Memory check failed"));
        let uptime = uptime.unwrap_or_else(|_| ComponentHealth::unhealthy("Uptime check failed"));

        let status = [database.status, memory.status, uptime.status]
            .into_iter()
            .max()
            .unwrap_or(HealthStatus::Unhealthy);

        let mut metadata = Map::new();
        metadata.insert(
            "totalResponseTime".to_string(),
            Value::from(started.elapsed().as_millis() as u64),
        );

        HealthCheckResult {
            status,
            timestamp: Utc::now(),
            checks: HealthChecks { database, memory, uptime },
            metadata: Some(metadata),
        }
    }

    /// Connectivity-only check for high-frequency probes.
    pub async fn check_health_quick(&self) -> QuickHealth {
        let status = match self.storage.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(_) => HealthStatus::Unhealthy,
        };
        QuickHealth { status, timestamp: Utc::now() }
    }

    /// Ready to take traffic: anything short of unhealthy passes.
    pub async fn check_readiness(&self) -> bool {
        self.check_health().await.status != HealthStatus::Unhealthy
    }

    /// The process is running and able to answer.
    #[must_use]
    pub fn check_liveness(&self) -> bool {
        true
    }
}

async fn check_database(storage: &dyn StoragePort) -> ComponentHealth {
    let started = Instant::now();
    match storage.ping().await {
        Ok(()) => {
            let elapsed = started.elapsed().as_millis() as u64;
            let mut health = if elapsed < SLOW_STORAGE_MS {
                ComponentHealth::healthy("Database connection successful")
            } else {
                ComponentHealth {
                    status: HealthStatus::Degraded,
                    message: Some("Database response time degraded".to_string()),
                    response_time: None,
                    details: None,
                }
            };
            health.response_time = Some(elapsed);
            health
        }
        Err(err) => {
            let mut health = ComponentHealth::unhealthy("Database connection failed");
            health.response_time = Some(started.elapsed().as_millis() as u64);
            let mut details = Map::new();
            details.insert("error".to_string(), Value::from(err.message));
            health.details = Some(details);
            health
        }
    }
}

fn check_memory(process: &dyn ProcessMetricsPort) -> ComponentHealth {
    let usage = process.memory();
    let percent = if usage.heap_total_bytes == 0 {
        0.0
    } else {
        usage.heap_used_bytes as f64 / usage.heap_total_bytes as f64 * 100.0
    };

    let (status, message) = if percent > MEMORY_UNHEALTHY_PERCENT {
        (HealthStatus::Unhealthy, "Memory usage critical")
    } else if percent > MEMORY_DEGRADED_PERCENT {
        (HealthStatus::Degraded, "Memory usage high")
    } else {
        (HealthStatus::Healthy, "Memory usage normal")
    };

    const MB: u64 = 1024 * 1024;
    let mut details = Map::new();
    details.insert("heapUsedMb".to_string(), Value::from(usage.heap_used_bytes / MB));
    details.insert("heapTotalMb".to_string(), Value::from(usage.heap_total_bytes / MB));
    details.insert("rssMb".to_string(), Value::from(usage.rss_bytes / MB));
    details.insert("usagePercent".to_string(), Value::from((percent * 10.0).round() / 10.0));

    ComponentHealth {
        status,
        message: Some(message.to_string()),
        response_time: None,
        details: Some(details),
    }
}

fn check_uptime(process: &dyn ProcessMetricsPort) -> ComponentHealth {
    let seconds = process.uptime().as_secs();
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    let mut details = Map::new();
    details.insert("seconds".to_string(), Value::from(seconds));

    let mut health = ComponentHealth::healthy(format!("Uptime: {hours}h {minutes}m"));
    health.details = Some(details);
    health
}
