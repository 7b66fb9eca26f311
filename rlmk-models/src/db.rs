//! SQLite database handle: an r2d2 pool of connections that all carry the
//! same pragmas, plus schema setup, stats and reset.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::{error, info, warn};

use rlmk_core::config::DatabaseConfig;
use rlmk_core::error::{RlmkError, RlmkResult};

use crate::migrations;
use crate::schema;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Writers wait this long on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Cloneable handle shared by every service.
#[derive(Clone)]
pub struct Database {
    pool: Arc<DbPool>,
}

impl Database {
    /// Open (creating if needed) the database at `db_path`, optionally check
    /// its integrity, then bring tables and data up to date.
    pub fn init(db_path: &Path, config: &DatabaseConfig) -> RlmkResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        info!("opening database at {}", db_path.display());

        let pool = Pool::builder()
            .max_size(config.pool_size.max(1))
            .connection_customizer(Box::new(Pragmas { wal_mode: config.wal_mode }))
            .build(SqliteConnectionManager::file(db_path))
            .map_err(|e| RlmkError::Pool(e.to_string()))?;
        let db = Self { pool: Arc::new(pool) };

        if config.integrity_check_on_startup {
            db.run_integrity_check()?;
        }
        db.prepare_schema()?;
        Ok(db)
    }

    fn prepare_schema(&self) -> RlmkResult<()> {
        let conn = self.conn()?;
        schema::create_tables(&conn)?;
        migrations::run_migrations(&conn)?;
        info!(
            "database ready at schema version {}",
            migrations::schema_version(&conn)?
        );
        Ok(())
    }

    pub fn conn(&self) -> RlmkResult<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| RlmkError::Pool(e.to_string()))
    }

    /// `PRAGMA integrity_check`; anything but "ok" is an error.
    pub fn run_integrity_check(&self) -> RlmkResult<()> {
        let verdict: String = self
            .conn()?
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))
            .map_err(|e| RlmkError::Database(e.to_string()))?;

        if verdict != "ok" {
            error!("database integrity check failed: {verdict}");
            return Err(RlmkError::IntegrityCheck(verdict));
        }
        Ok(())
    }

    /// Run `f` in a transaction that commits only when `f` returns `Ok`.
    pub fn transaction<T, F>(&self, f: F) -> RlmkResult<T>
    where
        F: FnOnce(&Connection) -> RlmkResult<T>,
    {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        let value = f(&tx)?;
        tx.commit().map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(value)
    }

    /// Row counts of every data table, read in one statement.
    pub fn stats(&self) -> RlmkResult<DatabaseStats> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT (SELECT COUNT(*) FROM foyers),
                    (SELECT COUNT(*) FROM utilisateurs),
                    (SELECT COUNT(*) FROM foyer_membres),
                    (SELECT COUNT(*) FROM pieces),
                    (SELECT COUNT(*) FROM stocks),
                    (SELECT COUNT(*) FROM aliments),
                    (SELECT COUNT(*) FROM plantes),
                    (SELECT COUNT(*) FROM esp32),
                    (SELECT COUNT(*) FROM mesures),
                    (SELECT COALESCE(MAX(version), 0) FROM schema_version)",
            [],
            |row| {
                Ok(DatabaseStats {
                    households: row.get(0)?,
                    users: row.get(1)?,
                    memberships: row.get(2)?,
                    rooms: row.get(3)?,
                    stocks: row.get(4)?,
                    food_items: row.get(5)?,
                    plants: row.get(6)?,
                    devices: row.get(7)?,
                    readings: row.get(8)?,
                    schema_version: row.get(9)?,
                })
            },
        )
        .map_err(|e| RlmkError::Database(e.to_string()))
    }

    /// Drop every table and rebuild an empty schema.
    pub fn reset(&self) -> RlmkResult<()> {
        warn!("resetting database, all households and readings are deleted");
        schema::drop_tables(&*self.conn()?)?;
        self.prepare_schema()
    }
}

/// Row counts per table, plus the stored schema version.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStats {
    pub households: i64,
    pub users: i64,
    pub memberships: i64,
    pub rooms: i64,
    pub stocks: i64,
    pub food_items: i64,
    pub plants: i64,
    pub devices: i64,
    pub readings: i64,
    pub schema_version: i32,
}

impl DatabaseStats {
    /// (table name, row count) pairs in schema order.
    pub fn rows(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("foyers", self.households),
            ("utilisateurs", self.users),
            ("foyer_membres", self.memberships),
            ("pieces", self.rooms),
            ("stocks", self.stocks),
            ("aliments", self.food_items),
            ("plantes", self.plants),
            ("esp32", self.devices),
            ("mesures", self.readings),
        ]
    }
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .rows()
            .into_iter()
            .map(|(table, n)| format!("{table}={n}"))
            .collect();
        write!(f, "{} (schema v{})", parts.join(", "), self.schema_version)
    }
}

/// Applied to every pooled connection when it is opened.
#[derive(Debug)]
struct Pragmas {
    wal_mode: bool,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for Pragmas {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        if self.wal_mode {
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })?;
        }
        conn.busy_timeout(BUSY_TIMEOUT)?;
        // Memberships, rooms and readings rely on cascading deletes.
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(())
    }
}
