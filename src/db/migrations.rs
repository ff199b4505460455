//! Schema definition, versioning and reset.
//!
//! The accreditation schema is built by a short list of numbered migrations.
//! Applied versions are recorded in a `migrations` bookkeeping table, which
//! makes [`define_schema`] idempotent: a second call finds nothing pending
//! and leaves tables and rows untouched.
//!
//! [`reset_schema`] drops every table and re-applies all migrations inside a
//! single transaction, so a failure part-way leaves the previous schema and
//! its data exactly as they were.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use curricula::db::migrations::{define_schema, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("curricula.db")?;
//! define_schema(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), curricula::libs::error::Error>(())
//! ```

use super::schema::{CREATE_INDEXES, TABLES, TABLES_DROP_ORDER};
use crate::libs::error::{Error, Result};
use crate::libs::messages::Message;
use crate::msg_debug;
use rusqlite::{params, Connection, Transaction};

/// Bookkeeping table for applied schema versions.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single numbered schema change.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> rusqlite::Result<()>,
}

/// Ordered registry of schema migrations.
///
/// The manager is meant for single-threaded use: schema definition and reset
/// must never overlap with other reads or writes on the same database.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: the nine entity tables, parent-first
        self.add_migration(1, "create_accreditation_tables", |tx| {
            for (_, ddl) in TABLES {
                tx.execute(ddl, [])?;
            }
            Ok(())
        });

        // Version 2: indexes on the report join columns
        self.add_migration(2, "add_report_indexes", |tx| {
            for ddl in CREATE_INDEXES {
                tx.execute(ddl, [])?;
            }
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> rusqlite::Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Highest registered version.
    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Applies every pending migration in one transaction.
    ///
    /// Returns the number of migrations applied, zero when the schema is
    /// already current.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<usize> {
        let tx = conn.transaction().map_err(Error::schema)?;
        let applied = self.apply_pending(&tx)?;
        tx.commit().map_err(Error::schema)?;

        if applied > 0 {
            tracing::info!(applied, version = self.latest_version(), "schema defined");
        }
        Ok(applied)
    }

    /// Drops every table and rebuilds the schema from version 1.
    ///
    /// Drop and rebuild share one transaction. If any statement fails the
    /// transaction is rolled back on drop and the previous schema survives.
    pub fn reset(&self, conn: &mut Connection) -> Result<()> {
        let tx = conn.transaction().map_err(Error::schema)?;

        for table in TABLES_DROP_ORDER {
            msg_debug!(Message::DroppingTable(table.to_string()));
            tx.execute(&format!("DROP TABLE IF EXISTS {table}"), []).map_err(Error::schema)?;
        }
        tx.execute("DROP TABLE IF EXISTS migrations", []).map_err(Error::schema)?;

        self.apply_pending(&tx)?;
        tx.commit().map_err(Error::schema)?;

        tracing::info!(version = self.latest_version(), "schema reset");
        Ok(())
    }

    fn apply_pending(&self, tx: &Transaction) -> Result<usize> {
        tx.execute(MIGRATIONS_TABLE, []).map_err(Error::schema)?;

        let current_version = self.get_current_version(tx)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::SchemaUpToDate);
            return Ok(0);
        }

        for migration in &pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            if let Err(e) = (migration.up)(tx) {
                tracing::error!(version = migration.version, error = %e, "migration failed");
                return Err(Error::schema(e));
            }
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )
            .map_err(Error::schema)?;
        }

        Ok(pending.len())
    }

    /// Highest applied version, or 0 on an empty database.
    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn
            .query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))
            .map_err(Error::schema)?;
        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))
            .map_err(Error::schema)?;
        Ok(count > 0)
    }

    /// Applied migrations as `(version, name, applied_at)`, oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn
            .prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")
            .map_err(Error::schema)?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))
            .map_err(Error::schema)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::schema)?;

        Ok(history)
    }
}

/// Creates every table and index that does not exist yet.
pub fn define_schema(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)?;
    Ok(())
}

/// Drops and recreates every table. All rows are lost.
pub fn reset_schema(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().reset(conn)
}

/// Current schema version of the database.
///
/// A database that has never been defined reports version 0.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let exists: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'migrations'",
            [],
            |row| row.get(0),
        )
        .map_err(Error::schema)?;
    if exists == 0 {
        return Ok(0);
    }
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(get_db_version(conn)? < manager.latest_version())
}
