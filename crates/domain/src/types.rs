//! Observability and content record types.
//!
//! Field names follow the wire contract of the API (camelCase). Audit
//! events and metric samples are append-only values: constructed once,
//! never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Closed set of business events the audit trail records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    // Auth
    UserLogin,
    UserLogout,
    UserRegister,
    PasswordChange,
    PasswordReset,

    // Data mutation
    DataCreate,
    DataUpdate,
    DataDelete,
    DataExport,

    // Permissions
    PermissionGrant,
    PermissionRevoke,
    AccessDenied,

    // System
    SystemConfigChange,
    SecurityAlert,

    // Business process
    ApplicationSubmit,
    ApplicationApprove,
    ApplicationReject,
    ProgramRegister,
    ProgramCancel,
}

/// One immutable entry in the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub event_type: AuditEventType,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_role: Option<String>,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AuditEvent {
    /// Start an event of the given type and action; `success` defaults to
    /// true and the timestamp is captured now.
    #[must_use]
    pub fn new(event_type: AuditEventType, action: impl Into<String>) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
            user_id: None,
            user_name: None,
            user_role: None,
            action: action.into(),
            resource: None,
            resource_id: None,
            details: None,
            ip_address: None,
            user_agent: None,
            success: true,
            error_message: None,
        }
    }

    /// Set the acting user.
    #[must_use]
    pub fn with_user(mut self, user_id: i64, user_name: impl Into<String>) -> Self {
        self.user_id = Some(user_id);
        self.user_name = Some(user_name.into());
        self
    }

    /// Set the acting user's role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.user_role = Some(role.into());
        self
    }

    /// Set the affected resource and its id.
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>, id: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self.resource_id = Some(id.into());
        self
    }

    /// Attach structured detail.
    #[must_use]
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = Some(details);
        self
    }

    /// Set the originating IP address.
    #[must_use]
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    /// Set the caller's user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Mark the event failed with an explanation.
    #[must_use]
    pub fn failed(mut self, error_message: impl Into<String>) -> Self {
        self.success = false;
        self.error_message = Some(error_message.into());
        self
    }
}

/// One completed request observed by the metrics store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSample {
    pub method: String,
    pub path: String,
    pub status_code: u16,
    /// Elapsed wall time in milliseconds.
    pub duration: f64,
    pub timestamp: DateTime<Utc>,
}

/// One ad-hoc named performance measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSample {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
}

/// Aggregate statistics over the request buffer for a sliding window.
///
/// All numeric fields are zero when no samples fall inside the window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStats {
    pub total_requests: usize,
    pub avg_duration: f64,
    pub max_duration: f64,
    pub min_duration: f64,
    /// Fraction of requests with status >= 400, as a percentage.
    pub error_rate: f64,
    pub requests_per_minute: f64,
}

/// Process heap and resident memory, in bytes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    pub heap_used_bytes: u64,
    pub heap_total_bytes: u64,
    pub rss_bytes: u64,
}

/// Memory block of the metrics summary, in whole megabytes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySummary {
    pub heap_used_mb: u64,
    pub heap_total_mb: u64,
    pub rss_mb: u64,
}

impl From<MemoryUsage> for MemorySummary {
    fn from(usage: MemoryUsage) -> Self {
        const MB: u64 = 1024 * 1024;
        Self {
            heap_used_mb: usage.heap_used_bytes / MB,
            heap_total_mb: usage.heap_total_bytes / MB,
            rss_mb: usage.rss_bytes / MB,
        }
    }
}

/// Uptime block of the metrics summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UptimeSummary {
    pub seconds: u64,
    pub minutes: u64,
    pub hours: u64,
}

impl UptimeSummary {
    /// Break an uptime duration into its summary units.
    #[must_use]
    pub fn from_secs(seconds: u64) -> Self {
        Self { seconds, minutes: seconds / 60, hours: seconds / 3600 }
    }
}

/// Fixed 5-minute request stats plus process memory and uptime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub requests: RequestStats,
    pub memory: MemorySummary,
    pub uptime: UptimeSummary,
    pub timestamp: DateTime<Utc>,
}

/// Health of the system or of one component, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Outcome of one health sub-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Elapsed check time in milliseconds, when the check is timed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

impl ComponentHealth {
    /// A healthy component with a message.
    #[must_use]
    pub fn healthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: Some(message.into()),
            response_time: None,
            details: None,
        }
    }

    /// An unhealthy component with a diagnostic message.
    #[must_use]
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            response_time: None,
            details: None,
        }
    }
}

/// The three sub-checks of a full health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    pub database: ComponentHealth,
    pub memory: ComponentHealth,
    pub uptime: ComponentHealth,
}

/// Full health check result: per-component health plus the max-severity
/// rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Minimal shape returned by the quick health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickHealth {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
}

/// A published notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub date: String,
    pub views: i64,
    pub visibility: String,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a notice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotice {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
}
