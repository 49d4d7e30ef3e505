//! Structured logger.
//!
//! Every emission is composed into a [`LogRecord`] first: level, UTC
//! timestamp, message, sanitized context, and an optional error block.
//! In verbose mode records render human-readable through `tracing`
//! events; otherwise each record is one JSON line. Context sanitization
//! happens before the record ever reaches a sink, so secrets never hit
//! the log stream in either mode.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use noticeboard_common::sanitize_context;
use noticeboard_domain::config::ObservabilityConfig;
use noticeboard_domain::errors::AppError;

/// Severity of a log record. `Critical` is reserved for failures that
/// need operator attention (security alerts, storage loss).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

/// Error block of a log record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogErrorInfo {
    pub name: String,
    pub message: String,
    /// Taxonomy kind label, present for application errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Captured backtrace. Never populated in this build; kept in the
    /// wire shape so consumers don't need a schema change if it returns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// One composed log emission.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<LogErrorInfo>,
}

/// What the caller hands the logger: a plain message, an application
/// error, or a foreign error reduced to name and message.
#[derive(Debug, Clone)]
pub enum LogInput {
    Message(String),
    App(AppError),
    Foreign { name: String, message: String },
}

impl LogInput {
    /// Wrap an error from outside the taxonomy.
    #[must_use]
    pub fn foreign(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Foreign { name: name.into(), message: message.into() }
    }
}

impl From<&str> for LogInput {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for LogInput {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<AppError> for LogInput {
    fn from(error: AppError) -> Self {
        Self::App(error)
    }
}

impl From<&AppError> for LogInput {
    fn from(error: &AppError) -> Self {
        Self::App(error.clone())
    }
}

/// Context-sanitizing structured logger.
///
/// Cheap to clone; behavior is fixed by the [`ObservabilityConfig`]
/// injected at construction.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    config: ObservabilityConfig,
}

impl StructuredLogger {
    #[must_use]
    pub fn new(config: ObservabilityConfig) -> Self {
        Self { config }
    }

    pub fn debug(&self, input: impl Into<LogInput>, context: Option<Map<String, Value>>) {
        self.log(LogLevel::Debug, input, context);
    }

    pub fn info(&self, input: impl Into<LogInput>, context: Option<Map<String, Value>>) {
        self.log(LogLevel::Info, input, context);
    }

    pub fn warn(&self, input: impl Into<LogInput>, context: Option<Map<String, Value>>) {
        self.log(LogLevel::Warn, input, context);
    }

    pub fn error(&self, input: impl Into<LogInput>, context: Option<Map<String, Value>>) {
        self.log(LogLevel::Error, input, context);
    }

    pub fn critical(&self, input: impl Into<LogInput>, context: Option<Map<String, Value>>) {
        self.log(LogLevel::Critical, input, context);
    }

    /// Whether a record at this level would be emitted at all.
    /// `Debug` is dropped outright outside verbose mode.
    #[must_use]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level > LogLevel::Debug || self.config.verbose
    }

    pub fn log(
        &self,
        level: LogLevel,
        input: impl Into<LogInput>,
        context: Option<Map<String, Value>>,
    ) {
        if !self.is_enabled(level) {
            return;
        }
        let record = self.compose(level, input.into(), context);
        self.emit(&record);
    }

    /// Build the record a `log` call at this level would emit.
    ///
    /// Sanitization happens here: with redaction on, sensitive top-level
    /// context keys are replaced before the record exists. Application
    /// error metadata is folded into the context under `errorMetadata`.
    #[must_use]
    pub fn compose(
        &self,
        level: LogLevel,
        input: LogInput,
        context: Option<Map<String, Value>>,
    ) -> LogRecord {
        let mut context = context.map(|ctx| {
            if self.config.redact {
                sanitize_context(&ctx)
            } else {
                ctx
            }
        });

        let (message, error) = match input {
            LogInput::Message(message) => (message, None),
            LogInput::App(err) => {
                if let Some(metadata) = &err.metadata {
                    context
                        .get_or_insert_with(Map::new)
                        .insert("errorMetadata".to_string(), Value::Object(metadata.clone()));
                }
                let info = LogErrorInfo {
                    name: "AppError".to_string(),
                    message: err.message.clone(),
                    kind: Some(err.kind.as_str().to_string()),
                    stack: None,
                };
                (err.message, Some(info))
            }
            LogInput::Foreign { name, message } => {
                let info = LogErrorInfo {
                    name,
                    message: message.clone(),
                    kind: None,
                    stack: None,
                };
                (message, Some(info))
            }
        };

        LogRecord { level, timestamp: Utc::now(), message, context, error }
    }

    fn emit(&self, record: &LogRecord) {
        if self.config.verbose {
            match record.level {
                LogLevel::Debug => tracing::debug!(
                    target: "noticeboard",
                    context = ?record.context,
                    error = ?record.error,
                    "{}",
                    record.message
                ),
                LogLevel::Info => tracing::info!(
                    target: "noticeboard",
                    context = ?record.context,
                    error = ?record.error,
                    "{}",
                    record.message
                ),
                LogLevel::Warn => tracing::warn!(
                    target: "noticeboard",
                    context = ?record.context,
                    error = ?record.error,
                    "{}",
                    record.message
                ),
                LogLevel::Error => tracing::error!(
                    target: "noticeboard",
                    context = ?record.context,
                    error = ?record.error,
                    "{}",
                    record.message
                ),
                LogLevel::Critical => tracing::error!(
                    target: "noticeboard",
                    critical = true,
                    context = ?record.context,
                    error = ?record.error,
                    "{}",
                    record.message
                ),
            }
            return;
        }

        // One JSON object per line. Serialization of a composed record
        // cannot fail in practice; fall back to the bare message if it does.
        let line = serde_json::to_string(record)
            .unwrap_or_else(|_| format!("{{\"message\":{:?}}}", record.message));
        match record.level {
            LogLevel::Debug => tracing::debug!(target: "noticeboard", "{line}"),
            LogLevel::Info => tracing::info!(target: "noticeboard", "{line}"),
            LogLevel::Warn => tracing::warn!(target: "noticeboard", "{line}"),
            LogLevel::Error | LogLevel::Critical => {
                tracing::error!(target: "noticeboard", "{line}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map, Value};

    use noticeboard_domain::config::ObservabilityConfig;
    use noticeboard_domain::errors::AppError;

    use super::{LogInput, LogLevel, StructuredLogger};

    fn context(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn sensitive_context_keys_are_redacted() {
        let logger = StructuredLogger::new(ObservabilityConfig::default());
        let record = logger.compose(
            LogLevel::Info,
            LogInput::from("login"),
            Some(context(&[
                ("userPassword", json!("hunter2")),
                ("path", json!("/api/login")),
            ])),
        );

        let ctx = record.context.unwrap();
        assert_eq!(ctx["userPassword"], json!("[REDACTED]"));
        assert_eq!(ctx["path"], json!("/api/login"));
    }

    #[test]
    fn redaction_can_be_switched_off() {
        let config = ObservabilityConfig { verbose: false, redact: false };
        let logger = StructuredLogger::new(config);
        let record = logger.compose(
            LogLevel::Warn,
            LogInput::from("raw"),
            Some(context(&[("token", json!("abc"))])),
        );

        assert_eq!(record.context.unwrap()["token"], json!("abc"));
    }

    #[test]
    fn app_error_carries_kind_and_metadata() {
        let logger = StructuredLogger::new(ObservabilityConfig::default());
        let mut metadata = Map::new();
        metadata.insert("field".to_string(), json!("title"));
        let err = AppError::validation("제목은 필수입니다", Some(metadata));

        let record = logger.compose(LogLevel::Error, LogInput::from(err), None);

        let error = record.error.unwrap();
        assert_eq!(error.name, "AppError");
        assert_eq!(error.kind.as_deref(), Some("VALIDATION_ERROR"));
        assert!(error.stack.is_none());
        let ctx = record.context.unwrap();
        assert_eq!(ctx["errorMetadata"]["field"], json!("title"));
        assert_eq!(record.message, "제목은 필수입니다");
    }

    #[test]
    fn debug_is_suppressed_unless_verbose() {
        let quiet = StructuredLogger::new(ObservabilityConfig::default());
        assert!(!quiet.is_enabled(LogLevel::Debug));
        assert!(quiet.is_enabled(LogLevel::Info));

        let verbose = StructuredLogger::new(ObservabilityConfig { verbose: true, redact: true });
        assert!(verbose.is_enabled(LogLevel::Debug));
    }

    #[test]
    fn level_wire_labels_are_uppercase() {
        assert_eq!(serde_json::to_string(&LogLevel::Critical).unwrap(), "\"CRITICAL\"");
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"WARN\"");
    }
}
