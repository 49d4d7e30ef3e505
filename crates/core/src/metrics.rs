//! Bounded in-memory metrics store.
//!
//! Two independent ring buffers: completed requests and named
//! performance samples. Both are capacity-bounded with oldest-first
//! eviction, so memory use is flat no matter how long the process runs.
//! Statistics are computed over a sliding time window at read time;
//! nothing is pre-aggregated.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use chrono::{Duration, Utc};
use parking_lot::Mutex;

use noticeboard_common::BoundedLog;
use noticeboard_domain::types::{
    MetricsSummary, PerformanceSample, RequestSample, RequestStats, UptimeSummary,
};

use crate::process_ports::ProcessMetricsPort;

/// Window used by [`MetricsStore::summary`].
pub const SUMMARY_WINDOW_MINUTES: i64 = 5;

/// Request and performance-sample buffers with sliding-window stats.
pub struct MetricsStore {
    requests: Mutex<BoundedLog<RequestSample>>,
    samples: Mutex<BoundedLog<PerformanceSample>>,
}

impl MetricsStore {
    /// Create a store whose two buffers each hold at most `capacity`
    /// entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            requests: Mutex::new(BoundedLog::new(capacity)),
            samples: Mutex::new(BoundedLog::new(capacity)),
        }
    }

    /// Record one completed request.
    pub fn record_request(&self, method: &str, path: &str, status_code: u16, duration_ms: f64) {
        self.requests.lock().append(RequestSample {
            method: method.to_string(),
            path: path.to_string(),
            status_code,
            duration: duration_ms,
            timestamp: Utc::now(),
        });
    }

    /// Record one named measurement.
    pub fn record_sample(
        &self,
        name: &str,
        value: f64,
        unit: &str,
        tags: Option<HashMap<String, String>>,
    ) {
        self.samples.lock().append(PerformanceSample {
            name: name.to_string(),
            value,
            unit: unit.to_string(),
            timestamp: Utc::now(),
            tags,
        });
    }

    /// Aggregate request statistics over the trailing `window_minutes`.
    ///
    /// An empty window yields the all-zero stats; division by an empty
    /// set never happens.
    #[must_use]
    pub fn window_stats(&self, window_minutes: i64) -> RequestStats {
        if window_minutes <= 0 {
            return RequestStats::default();
        }
        let cutoff = Utc::now() - Duration::minutes(window_minutes);
        let requests = self.requests.lock();
        let recent: Vec<&RequestSample> =
            requests.iter().filter(|sample| sample.timestamp > cutoff).collect();
        if recent.is_empty() {
            return RequestStats::default();
        }

        let total = recent.len();
        let sum: f64 = recent.iter().map(|sample| sample.duration).sum();
        let max = recent.iter().map(|s| s.duration).fold(f64::MIN, f64::max);
        let min = recent.iter().map(|s| s.duration).fold(f64::MAX, f64::min);
        let errors = recent.iter().filter(|sample| sample.status_code >= 400).count();

        RequestStats {
            total_requests: total,
            avg_duration: sum / total as f64,
            max_duration: max,
            min_duration: min,
            error_rate: errors as f64 / total as f64 * 100.0,
            requests_per_minute: total as f64 / window_minutes as f64,
        }
    }

    /// The most recent `limit` requests, oldest first.
    #[must_use]
    pub fn recent_requests(&self, limit: usize) -> Vec<RequestSample> {
        self.requests.lock().tail(limit)
    }

    /// The most recent `limit` samples, oldest first.
    #[must_use]
    pub fn recent_samples(&self, limit: usize) -> Vec<PerformanceSample> {
        self.samples.lock().tail(limit)
    }

    /// Fixed 5-minute stats plus process memory and uptime.
    #[must_use]
    pub fn summary(&self, process: &dyn ProcessMetricsPort) -> MetricsSummary {
        MetricsSummary {
            requests: self.window_stats(SUMMARY_WINDOW_MINUTES),
            memory: process.memory().into(),
            uptime: UptimeSummary::from_secs(process.uptime().as_secs()),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.lock().len()
    }

    pub fn clear(&self) {
        self.requests.lock().clear();
        self.samples.lock().clear();
    }

    /// Start a named wall-clock timer bound to this store.
    #[must_use]
    pub fn timer(self: &Arc<Self>, name: impl Into<String>) -> Timer {
        Timer { name: name.into(), started: Instant::now(), store: Arc::clone(self) }
    }

    /// Time an async operation and record the elapsed milliseconds as a
    /// sample tagged `status=success` or `status=error`. The operation's
    /// result is returned untouched either way.
    pub async fn measure_execution_time<F, T, E>(&self, name: &str, operation: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let started = Instant::now();
        let result = operation.await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let status = if result.is_ok() { "success" } else { "error" };
        let mut tags = HashMap::new();
        tags.insert("status".to_string(), status.to_string());
        self.record_sample(name, elapsed_ms, "ms", Some(tags));

        result
    }
}

/// A running named timer. Dropping it without [`Timer::stop`] records
/// nothing.
#[must_use = "a timer records nothing until stopped"]
pub struct Timer {
    name: String,
    started: Instant,
    store: Arc<MetricsStore>,
}

impl Timer {
    /// Milliseconds elapsed so far, without recording.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Stop the timer, record the elapsed milliseconds as a sample, and
    /// return them.
    pub fn stop(self, tags: Option<HashMap<String, String>>) -> f64 {
        let elapsed_ms = self.duration();
        self.store.record_sample(&self.name, elapsed_ms, "ms", tags);
        elapsed_ms
    }
}
