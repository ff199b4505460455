//! The storage session.
//!
//! A [`Db`] owns one SQLite connection with foreign-key enforcement turned
//! on and the schema defined. It is passed explicitly to every repository
//! and report; there is no process-wide handle.

use super::migrations::{self, MigrationManager};
use super::schema;
use crate::libs::config::Config;
use crate::libs::error::{Error, IntegrityError, Result};
use rusqlite::{Connection, ToSql, Transaction};
use std::fmt;
use std::path::Path;

pub const DB_FILE_NAME: &str = "curricula.db";

/// Connection string that selects a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database named by the user configuration.
    pub fn new() -> Result<Db> {
        let config = Config::read()?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &Config) -> Result<Db> {
        let path = config.database_path()?;
        Self::open(path)
    }

    /// Opens (creating if needed) the database file at `path` and defines the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        let path = path.as_ref();
        let conn = if path.as_os_str() == IN_MEMORY {
            Connection::open_in_memory()
        } else {
            Connection::open(path)
        }
        .map_err(Error::Storage)?;

        tracing::debug!(path = %path.display(), "opened database");
        Self::with_connection(conn)
    }

    /// The database file path, or `:memory:` for an in-memory session.
    pub fn location(&self) -> String {
        self.conn
            .path()
            .filter(|path| !path.is_empty())
            .unwrap_or(IN_MEMORY)
            .to_string()
    }

    pub fn open_in_memory() -> Result<Db> {
        Self::open(IN_MEMORY)
    }

    /// Opens the database without defining the schema.
    pub fn new_without_migrations<P: AsRef<Path>>(path: P) -> Result<Connection> {
        let conn = Connection::open(path).map_err(Error::Storage)?;
        enable_foreign_keys(&conn)?;
        Ok(conn)
    }

    fn with_connection(mut conn: Connection) -> Result<Db> {
        enable_foreign_keys(&conn)?;
        migrations::define_schema(&mut conn)?;
        Ok(Db { conn })
    }

    /// Idempotently creates every table that does not exist yet.
    pub fn define_schema(&mut self) -> Result<()> {
        migrations::define_schema(&mut self.conn)
    }

    /// Drops and recreates every table in one failure-atomic step.
    pub fn reset_schema(&mut self) -> Result<()> {
        migrations::reset_schema(&mut self.conn)
    }

    pub fn schema_version(&self) -> Result<u32> {
        migrations::get_db_version(&self.conn)
    }

    pub fn migration_history(&self) -> Result<Vec<(u32, String, String)>> {
        MigrationManager::new().get_migration_history(&self.conn)
    }

    /// Row count of every entity table, parent-first.
    pub fn table_row_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        schema::table_names()
            .map(|table| -> Result<(&'static str, i64)> {
                let count: i64 = self
                    .conn
                    .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
                Ok((table, count))
            })
            .collect()
    }

    /// Runs `f` inside a transaction.
    ///
    /// Commits when `f` returns `Ok`. On `Err` the transaction is dropped,
    /// which rolls it back, and the error is returned unchanged.
    pub fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction) -> Result<T>,
    {
        let tx = self.conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

fn enable_foreign_keys(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", true).map_err(Error::Storage)?;
    let enabled: bool = conn
        .pragma_query_value(None, "foreign_keys", |row| row.get(0))
        .map_err(Error::Storage)?;
    if !enabled {
        return Err(Error::Config("SQLite build does not support foreign key enforcement".to_string()));
    }
    Ok(())
}

/// Fails with a foreign-key [`IntegrityError`] unless `table.column = value` exists.
///
/// Runs inside the caller's transaction so the check and the insert see the
/// same snapshot.
pub(crate) fn ensure_exists<V>(conn: &Connection, table: &str, column: &str, value: &V) -> Result<()>
where
    V: ToSql + fmt::Display + ?Sized,
{
    let exists: bool = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE {column} = ?1)"),
        [value],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(IntegrityError::missing_reference(table, column, value).into());
    }
    Ok(())
}
