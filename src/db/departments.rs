//! Departments, the root of the accreditation hierarchy.
//!
//! A department is keyed by a short code (at most four characters) and has
//! a unique name. Faculty, programs and courses all belong to one.

use super::db::Db;
use crate::libs::error::Result;
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_DEPARTMENT: &str = "INSERT INTO departments (code, name) VALUES (?1, ?2)";
const SELECT_DEPARTMENT_BY_CODE: &str = "SELECT code, name FROM departments WHERE code = ?1";
const SELECT_DEPARTMENT_BY_NAME: &str = "SELECT code, name FROM departments WHERE name = ?1";
const SELECT_ALL_DEPARTMENTS: &str = "SELECT code, name FROM departments ORDER BY name";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub code: String,
    pub name: String,
}

impl Department {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            code: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

pub struct Departments<'a> {
    db: &'a mut Db,
}

impl<'a> Departments<'a> {
    pub fn new(db: &'a mut Db) -> Self {
        Self { db }
    }

    /// Adds a department. Duplicate codes or names are rejected.
    pub fn insert(&mut self, department: &Department) -> Result<()> {
        self.db
            .transaction(|tx| {
                tx.execute(INSERT_DEPARTMENT, params![department.code, department.name])?;
                Ok(())
            })
            .inspect(|_| tracing::debug!(code = %department.code, "department added"))
            .inspect_err(|e| tracing::warn!(code = %department.code, error = %e, "department rejected"))
    }

    pub fn get_by_code(&self, code: &str) -> Result<Option<Department>> {
        let department = self
            .db
            .conn
            .query_row(SELECT_DEPARTMENT_BY_CODE, params![code], Department::from_row)
            .optional()?;
        Ok(department)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Department>> {
        let department = self
            .db
            .conn
            .query_row(SELECT_DEPARTMENT_BY_NAME, params![name], Department::from_row)
            .optional()?;
        Ok(department)
    }

    /// All departments, ordered by name.
    pub fn list(&self) -> Result<Vec<Department>> {
        let mut stmt = self.db.conn.prepare(SELECT_ALL_DEPARTMENTS)?;
        let departments = stmt
            .query_map([], Department::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(departments)
    }
}
