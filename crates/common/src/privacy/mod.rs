//! Redaction of sensitive values in structured context maps.
//!
//! Every context map attached to a log record or audit event passes
//! through [`sanitize_context`] before emission. A key is sensitive when
//! its lowercase form contains any of the known credential fragments;
//! matching values are replaced with [`REDACTION_MARKER`]. Only the
//! top-level map is inspected, nested objects pass through unchanged.

use serde_json::{Map, Value};

/// Replacement value written over sensitive entries.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Lowercase fragments that mark a context key as sensitive.
const SENSITIVE_KEY_FRAGMENTS: [&str; 7] =
    ["password", "token", "secret", "authorization", "cookie", "api_key", "apikey"];

/// Returns `true` when the key must not be emitted verbatim.
#[must_use]
pub fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    SENSITIVE_KEY_FRAGMENTS.iter().any(|fragment| lower.contains(fragment))
}

/// Returns a copy of `context` with sensitive values redacted.
#[must_use]
pub fn sanitize_context(context: &Map<String, Value>) -> Map<String, Value> {
    context
        .iter()
        .map(|(key, value)| {
            if is_sensitive_key(key) {
                (key.clone(), Value::String(REDACTION_MARKER.to_string()))
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect()
}
