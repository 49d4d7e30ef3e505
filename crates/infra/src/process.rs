//! Process metrics read from procfs.
//!
//! On Linux, memory figures come from `/proc/self/status`: `VmRSS` as
//! resident/used and `VmSize` as the total address space. Elsewhere the
//! figures are zero, which the health check treats as no memory
//! pressure. Uptime is measured from adapter construction.

use std::time::{Duration, Instant};

use noticeboard_core::process_ports::ProcessMetricsPort;
use noticeboard_domain::types::MemoryUsage;

/// [`ProcessMetricsPort`] adapter over the running process.
pub struct SystemProcessMetrics {
    started: Instant,
}

impl SystemProcessMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self { started: Instant::now() }
    }
}

impl Default for SystemProcessMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessMetricsPort for SystemProcessMetrics {
    fn memory(&self) -> MemoryUsage {
        read_proc_memory().unwrap_or_default()
    }

    fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(target_os = "linux")]
fn read_proc_memory() -> Option<MemoryUsage> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let rss = parse_kb_line(&status, "VmRSS:")?;
    let total = parse_kb_line(&status, "VmSize:")?;
    Some(MemoryUsage {
        heap_used_bytes: rss * 1024,
        heap_total_bytes: total * 1024,
        rss_bytes: rss * 1024,
    })
}

#[cfg(not(target_os = "linux"))]
fn read_proc_memory() -> Option<MemoryUsage> {
    None
}

#[cfg(target_os = "linux")]
fn parse_kb_line(status: &str, key: &str) -> Option<u64> {
    status
        .lines()
        .find(|line| line.starts_with(key))?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()
}
