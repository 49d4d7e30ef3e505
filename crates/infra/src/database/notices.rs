//! SQLite-backed notice repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use noticeboard_core::notice_ports::{CreateNotice, NoticeRepository};
use noticeboard_core::storage_ports::StorageError;
use noticeboard_domain::types::Notice;

use super::{map_sqlite_error, run_blocking, DbManager};

const SELECT_COLUMNS: &str =
    "id, title, content, category, author, date, views, visibility, created_at";

/// Notice persistence over the shared [`DbManager`] pool.
#[derive(Clone)]
pub struct SqliteNoticeRepository {
    db: DbManager,
}

impl SqliteNoticeRepository {
    #[must_use]
    pub fn new(db: DbManager) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoticeRepository for SqliteNoticeRepository {
    async fn list(&self) -> Result<Vec<Notice>, StorageError> {
        let pool = self.db.pool();
        run_blocking(move || {
            let conn = pool
                .get()
                .map_err(|err| StorageError::other(format!("connection pool error: {err}")))?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM notices ORDER BY created_at DESC, id DESC"
                ))
                .map_err(map_sqlite_error)?;
            let rows = stmt
                .query_map([], row_to_notice)
                .map_err(map_sqlite_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_sqlite_error)?;
            Ok(rows)
        })
        .await
    }

    async fn create(&self, notice: CreateNotice) -> Result<Notice, StorageError> {
        let pool = self.db.pool();
        run_blocking(move || {
            let conn = pool
                .get()
                .map_err(|err| StorageError::other(format!("connection pool error: {err}")))?;
            conn.execute(
                "INSERT INTO notices (title, content, category, author, date, visibility) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    notice.title,
                    notice.content,
                    notice.category,
                    notice.author,
                    notice.date,
                    notice.visibility,
                ],
            )
            .map_err(map_sqlite_error)?;

            let id = conn.last_insert_rowid();
            conn.query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM notices WHERE id = ?1"),
                [id],
                row_to_notice,
            )
            .map_err(map_sqlite_error)
        })
        .await
    }

    async fn get(&self, id: i64) -> Result<Notice, StorageError> {
        let pool = self.db.pool();
        run_blocking(move || {
            let conn = pool
                .get()
                .map_err(|err| StorageError::other(format!("connection pool error: {err}")))?;
            conn.query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM notices WHERE id = ?1"),
                [id],
                row_to_notice,
            )
            .map_err(map_sqlite_error)
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let pool = self.db.pool();
        run_blocking(move || {
            let conn = pool
                .get()
                .map_err(|err| StorageError::other(format!("connection pool error: {err}")))?;
            let affected = conn
                .execute("DELETE FROM notices WHERE id = ?1", [id])
                .map_err(map_sqlite_error)?;
            if affected == 0 {
                return Err(StorageError::not_found(format!("notice {id} does not exist")));
            }
            Ok(())
        })
        .await
    }
}

fn row_to_notice(row: &rusqlite::Row<'_>) -> rusqlite::Result<Notice> {
    let created_at: String = row.get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(
                8,
                rusqlite::types::Type::Text,
                Box::new(err),
            )
        })?;

    Ok(Notice {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        category: row.get("category")?,
        author: row.get("author")?,
        date: row.get("date")?,
        views: row.get("views")?,
        visibility: row.get("visibility")?,
        created_at,
    })
}
