//! Versioned data migrations.
//!
//! Tables themselves come from [`crate::schema::create_tables`]. Each entry in
//! [`MIGRATIONS`] rewrites existing rows and runs in its own transaction
//! together with the version bump, so a failed step leaves the stored version
//! at the last one that succeeded.

use rusqlite::Connection;
use tracing::{debug, info};

use rlmk_core::constants::DB_SCHEMA_VERSION;
use rlmk_core::error::{RlmkError, RlmkResult};

struct Migration {
    version: i32,
    name: &'static str,
    apply: fn(&Connection) -> rusqlite::Result<usize>,
}

/// Ordered by version; the last entry is [`DB_SCHEMA_VERSION`].
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "normalize user emails",
    apply: normalize_emails,
}];

/// Apply every migration newer than the stored version.
pub fn run_migrations(conn: &Connection) -> RlmkResult<()> {
    let current = schema_version(conn)?;
    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > current).collect();

    if pending.is_empty() {
        debug!("schema at version {current}, nothing to migrate");
        return Ok(());
    }

    for migration in pending {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RlmkError::Migration(e.to_string()))?;
        let changed = (migration.apply)(&*tx).map_err(|e| {
            RlmkError::Migration(format!("v{} ({}): {e}", migration.version, migration.name))
        })?;
        store_version(&tx, migration.version)?;
        tx.commit().map_err(|e| RlmkError::Migration(e.to_string()))?;
        info!(
            version = migration.version,
            rows = changed,
            "applied migration: {}",
            migration.name
        );
    }
    Ok(())
}

/// Stored schema version, 0 for a database never migrated.
pub fn schema_version(conn: &Connection) -> RlmkResult<i32> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, Option<i32>>(0)
    })
    .map(|version| version.unwrap_or(0))
    .map_err(|e| RlmkError::Database(e.to_string()))
}

fn store_version(conn: &Connection, version: i32) -> RlmkResult<()> {
    conn.execute_batch("DELETE FROM schema_version")
        .and_then(|_| conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version]))
        .map_err(|e| RlmkError::Migration(e.to_string()))?;
    Ok(())
}

/// Login matches emails lowercased; rows imported with mixed case or stray
/// whitespace would never match.
fn normalize_emails(conn: &Connection) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE utilisateurs SET email = lower(trim(email)) WHERE email <> lower(trim(email))",
        [],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    fn fresh() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_latest_migration_matches_schema_version() {
        assert_eq!(MIGRATIONS.last().map(|m| m.version), Some(DB_SCHEMA_VERSION));
        assert!(MIGRATIONS.windows(2).all(|w| w[0].version < w[1].version));
    }

    #[test]
    fn test_fresh_db_reaches_latest_version() {
        let conn = fresh();
        assert_eq!(schema_version(&conn).unwrap(), 0);
        run_migrations(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), DB_SCHEMA_VERSION);
    }

    #[test]
    fn test_rerun_keeps_single_version_row() {
        let conn = fresh();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_emails_are_normalized() {
        let conn = fresh();
        conn.execute(
            "INSERT INTO utilisateurs (email, mot_de_passe, prenom, nom, date_creation)
             VALUES (' Alice@Example.COM ', 'x', 'Alice', 'Martin', '2024-01-01T00:00:00Z')",
            [],
        )
        .unwrap();
        run_migrations(&conn).unwrap();

        let email: String = conn
            .query_row("SELECT email FROM utilisateurs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(email, "alice@example.com");
    }
}
