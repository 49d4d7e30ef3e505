//! Bounded collections for in-memory event stores.

mod bounded_log;

pub use bounded_log::BoundedLog;
