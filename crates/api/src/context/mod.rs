//! Application context: the dependency container the router carries.
//!
//! Everything a handler needs is built once here and cloned into each
//! request via axum state. All fields are either `Arc`s or cheap copies.

use std::sync::Arc;

use noticeboard_core::notice_ports::NoticeRepository;
use noticeboard_core::process_ports::ProcessMetricsPort;
use noticeboard_core::{AuditTrail, HealthService, MetricsStore, StructuredLogger, Translator};
use noticeboard_domain::config::Config;
use noticeboard_domain::errors::AppError;
use noticeboard_infra::{DbManager, SqliteNoticeRepository, SystemProcessMetrics, TracingAuditSink};

/// Shared application state.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub notices: Arc<dyn NoticeRepository>,
    pub audit: Arc<AuditTrail>,
    pub metrics: Arc<MetricsStore>,
    pub health: Arc<HealthService>,
    pub process: Arc<dyn ProcessMetricsPort>,
    pub logger: StructuredLogger,
    pub translator: Translator,
}

impl AppContext {
    /// Wire the full dependency graph from configuration. Opens the
    /// database and runs migrations.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let db = DbManager::open(&config.database.path, config.database.pool_size)
            .map_err(|err| AppError::database(err.to_string()))?;

        let process: Arc<dyn ProcessMetricsPort> = Arc::new(SystemProcessMetrics::new());
        let health = Arc::new(HealthService::new(Arc::new(db.clone()), Arc::clone(&process)));

        Ok(Self {
            notices: Arc::new(SqliteNoticeRepository::new(db)),
            audit: Arc::new(AuditTrail::new(
                config.limits.audit_capacity,
                Arc::new(TracingAuditSink),
            )),
            metrics: Arc::new(MetricsStore::new(config.limits.metrics_capacity)),
            health,
            process,
            logger: StructuredLogger::new(config.observability),
            translator: Translator::new(config.observability),
            config,
        })
    }
}
