//! Notice repository port.

use async_trait::async_trait;

use noticeboard_domain::types::Notice;

use crate::storage_ports::StorageError;

/// A fully validated notice, ready to persist.
///
/// Distinct from the request-body shape: every field here is present and
/// non-empty by the time it crosses this port.
#[derive(Debug, Clone)]
pub struct CreateNotice {
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub date: String,
    pub visibility: String,
}

/// Persistence operations over notices.
#[async_trait]
pub trait NoticeRepository: Send + Sync {
    /// All notices, newest first.
    async fn list(&self) -> Result<Vec<Notice>, StorageError>;

    /// Persist a new notice and return it with its assigned id.
    async fn create(&self, notice: CreateNotice) -> Result<Notice, StorageError>;

    /// Fetch one notice by id.
    async fn get(&self, id: i64) -> Result<Notice, StorageError>;

    /// Delete one notice by id.
    async fn delete(&self, id: i64) -> Result<(), StorageError>;
}
