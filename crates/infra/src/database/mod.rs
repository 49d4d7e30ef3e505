//! Pooled SQLite storage.
//!
//! [`DbManager`] owns the connection pool and the schema. All SQLite
//! work runs on blocking tasks; async callers never touch a connection
//! directly. Driver errors are classified into [`StorageError`] here and
//! nowhere else, so the rest of the system keys off codes instead of
//! driver strings.

mod notices;

pub use notices::SqliteNoticeRepository;

use async_trait::async_trait;
use r2d2_sqlite::SqliteConnectionManager;

use noticeboard_core::storage_ports::{StorageError, StoragePort};

type Pool = r2d2::Pool<SqliteConnectionManager>;
type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS notices (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    category    TEXT NOT NULL,
    author      TEXT NOT NULL,
    date        TEXT NOT NULL,
    views       INTEGER NOT NULL DEFAULT 0,
    visibility  TEXT NOT NULL DEFAULT 'public',
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    UNIQUE (title)
);
";

/// Owns the SQLite pool and runs migrations on open.
#[derive(Clone)]
pub struct DbManager {
    pool: Pool,
}

impl DbManager {
    /// Open (or create) the database file, configure pragmas, and apply
    /// the schema.
    pub fn open(path: &str, pool_size: u32) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")
        });
        let pool = r2d2::Pool::builder()
            .max_size(pool_size.max(1))
            .build(manager)
            .map_err(|err| StorageError::other(format!("connection pool error: {err}")))?;

        let db = Self { pool };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA).map_err(map_sqlite_error)
    }

    pub(crate) fn conn(&self) -> Result<PooledConnection, StorageError> {
        self.pool
            .get()
            .map_err(|err| StorageError::other(format!("connection pool error: {err}")))
    }

    pub(crate) fn pool(&self) -> Pool {
        self.pool.clone()
    }
}

#[async_trait]
impl StoragePort for DbManager {
    async fn ping(&self) -> Result<(), StorageError> {
        let pool = self.pool();
        run_blocking(move || {
            let conn = pool
                .get()
                .map_err(|err| StorageError::other(format!("connection pool error: {err}")))?;
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .map(|_| ())
                .map_err(map_sqlite_error)
        })
        .await
    }
}

/// Run a storage closure on the blocking pool, folding task failure into
/// the storage error shape.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, StorageError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| StorageError::other(format!("storage task failed: {err}")))?
}

/// Classify a driver error. Uniqueness violations and missing rows get
/// their own codes; everything else is opaque.
pub(crate) fn map_sqlite_error(err: rusqlite::Error) -> StorageError {
    match &err {
        rusqlite::Error::QueryReturnedNoRows => StorageError::not_found(err.to_string()),
        rusqlite::Error::SqliteFailure(code, _)
            if code.code == rusqlite::ErrorCode::ConstraintViolation
                && matches!(
                    code.extended_code,
                    rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                        | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                ) =>
        {
            StorageError::unique_violation(err.to_string(), None)
        }
        _ => StorageError::other(err.to_string()),
    }
}
