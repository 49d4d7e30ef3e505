//! Process metrics port: memory usage and uptime of the running process.

use std::time::Duration;

use noticeboard_domain::types::MemoryUsage;

/// Source of process-level runtime measurements.
///
/// Both calls are cheap, synchronous reads; implementations must not
/// block on I/O beyond a procfs read.
pub trait ProcessMetricsPort: Send + Sync {
    /// Current heap and resident memory of this process.
    fn memory(&self) -> MemoryUsage;

    /// Time since the process (or the adapter) started.
    fn uptime(&self) -> Duration;
}
