//! Bounded audit trail.
//!
//! Events land in a capacity-bounded in-memory log (oldest evicted
//! first) and are also forwarded to an [`AuditSink`] so deployments can
//! attach a durable destination without the trail knowing about it.
//! Queries AND their filters together and preserve insertion order;
//! a limit keeps the most recent matches.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::{Map, Value};

use noticeboard_common::BoundedLog;
use noticeboard_domain::types::{AuditEvent, AuditEventType};

/// Forwarding destination for recorded events.
pub trait AuditSink: Send + Sync {
    fn forward(&self, event: &AuditEvent);
}

/// Sink that discards everything. Default for tests and minimal setups.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAuditSink;

impl AuditSink for NoOpAuditSink {
    fn forward(&self, _event: &AuditEvent) {}
}

/// Filter set for audit queries. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    pub event_type: Option<AuditEventType>,
    pub user_id: Option<i64>,
    pub resource: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Keep only this many of the most recent matches.
    pub limit: Option<usize>,
}

impl AuditQuery {
    fn matches(&self, event: &AuditEvent) -> bool {
        if let Some(event_type) = self.event_type {
            if event.event_type != event_type {
                return false;
            }
        }
        if let Some(user_id) = self.user_id {
            if event.user_id != Some(user_id) {
                return false;
            }
        }
        if let Some(resource) = &self.resource {
            if event.resource.as_deref() != Some(resource.as_str()) {
                return false;
            }
        }
        if let Some(start) = self.start {
            if event.timestamp < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if event.timestamp > end {
                return false;
            }
        }
        true
    }
}

/// Append-only audit store with a hard capacity.
pub struct AuditTrail {
    events: Mutex<BoundedLog<AuditEvent>>,
    sink: Arc<dyn AuditSink>,
}

impl AuditTrail {
    #[must_use]
    pub fn new(capacity: usize, sink: Arc<dyn AuditSink>) -> Self {
        Self { events: Mutex::new(BoundedLog::new(capacity)), sink }
    }

    /// Record an event: append to the bounded log, then forward to the
    /// sink. The sink sees every event, including ones later evicted.
    pub fn record(&self, event: AuditEvent) {
        self.events.lock().append(event.clone());
        self.sink.forward(&event);
    }

    /// All events matching the query, in insertion order. When a limit is
    /// set, the most recent matches win.
    #[must_use]
    pub fn query(&self, query: &AuditQuery) -> Vec<AuditEvent> {
        let events = self.events.lock();
        let matches: Vec<AuditEvent> =
            events.iter().filter(|event| query.matches(event)).cloned().collect();
        match query.limit {
            Some(limit) if matches.len() > limit => {
                matches[matches.len() - limit..].to_vec()
            }
            _ => matches,
        }
    }

    /// The most recent `limit` events for one user.
    #[must_use]
    pub fn query_by_user(&self, user_id: i64, limit: usize) -> Vec<AuditEvent> {
        self.query(&AuditQuery {
            user_id: Some(user_id),
            limit: Some(limit),
            ..AuditQuery::default()
        })
    }

    /// The most recent `limit` events touching one resource, optionally
    /// narrowed to a single resource id.
    #[must_use]
    pub fn query_by_resource(
        &self,
        resource: &str,
        resource_id: Option<&str>,
        limit: usize,
    ) -> Vec<AuditEvent> {
        let events = self.events.lock();
        let matches: Vec<AuditEvent> = events
            .iter()
            .filter(|event| {
                event.resource.as_deref() == Some(resource)
                    && resource_id
                        .map_or(true, |id| event.resource_id.as_deref() == Some(id))
            })
            .cloned()
            .collect();
        if matches.len() > limit {
            matches[matches.len() - limit..].to_vec()
        } else {
            matches
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    // Named recorders for the common business events.

    pub fn record_login(&self, user_id: i64, user_name: &str, success: bool, ip: Option<&str>) {
        let mut event =
            AuditEvent::new(AuditEventType::UserLogin, "사용자 로그인").with_user(user_id, user_name);
        if let Some(ip) = ip {
            event = event.with_ip(ip);
        }
        if !success {
            event = event.failed("로그인 실패");
        }
        self.record(event);
    }

    pub fn record_logout(&self, user_id: i64, user_name: &str, ip: Option<&str>) {
        let mut event = AuditEvent::new(AuditEventType::UserLogout, "사용자 로그아웃")
            .with_user(user_id, user_name);
        if let Some(ip) = ip {
            event = event.with_ip(ip);
        }
        self.record(event);
    }

    pub fn record_data_create(
        &self,
        user_id: i64,
        user_name: &str,
        resource: &str,
        resource_id: &str,
        details: Option<Map<String, Value>>,
    ) {
        self.record_mutation(
            AuditEventType::DataCreate,
            format!("{resource} 생성"),
            user_id,
            user_name,
            resource,
            resource_id,
            details,
        );
    }

    pub fn record_data_update(
        &self,
        user_id: i64,
        user_name: &str,
        resource: &str,
        resource_id: &str,
        details: Option<Map<String, Value>>,
    ) {
        self.record_mutation(
            AuditEventType::DataUpdate,
            format!("{resource} 수정"),
            user_id,
            user_name,
            resource,
            resource_id,
            details,
        );
    }

    pub fn record_data_delete(
        &self,
        user_id: i64,
        user_name: &str,
        resource: &str,
        resource_id: &str,
        details: Option<Map<String, Value>>,
    ) {
        self.record_mutation(
            AuditEventType::DataDelete,
            format!("{resource} 삭제"),
            user_id,
            user_name,
            resource,
            resource_id,
            details,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn record_mutation(
        &self,
        event_type: AuditEventType,
        action: String,
        user_id: i64,
        user_name: &str,
        resource: &str,
        resource_id: &str,
        details: Option<Map<String, Value>>,
    ) {
        let mut event = AuditEvent::new(event_type, action)
            .with_user(user_id, user_name)
            .with_resource(resource, resource_id);
        if let Some(details) = details {
            event = event.with_details(details);
        }
        self.record(event);
    }

    /// A denied access attempt. Always recorded as failed.
    pub fn record_access_denied(
        &self,
        user_id: Option<i64>,
        user_name: Option<&str>,
        resource: &str,
        action: &str,
    ) {
        let mut event =
            AuditEvent::new(AuditEventType::AccessDenied, format!("접근 거부: {action}"))
                .failed("권한이 없습니다");
        event.user_id = user_id;
        event.user_name = user_name.map(str::to_string);
        event.resource = Some(resource.to_string());
        self.record(event);
    }

    /// A security-relevant anomaly. Always recorded as failed.
    pub fn record_security_alert(
        &self,
        action: &str,
        details: Option<Map<String, Value>>,
        ip: Option<&str>,
    ) {
        let mut event = AuditEvent::new(AuditEventType::SecurityAlert, action)
            .failed("보안 경고가 발생했습니다");
        event.details = details;
        event.ip_address = ip.map(str::to_string);
        self.record(event);
    }
}
