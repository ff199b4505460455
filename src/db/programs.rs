//! Degree programs and their course lists.
//!
//! A program belongs to one department and may name a faculty member in
//! charge. The person in charge is not required to belong to the same
//! department. Courses are attached through the `program_courses` join table.

use super::db::{ensure_exists, Db};
use crate::libs::error::Result;
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_PROGRAM: &str = "INSERT INTO programs (name, department_code, in_charge_id) VALUES (?1, ?2, ?3)";
const INSERT_PROGRAM_COURSE: &str = "INSERT INTO program_courses (program_id, course_id) VALUES (?1, ?2)";
const SELECT_PROGRAM_BY_ID: &str = "SELECT id, name, department_code, in_charge_id FROM programs WHERE id = ?1";
const SELECT_PROGRAM_BY_NAME: &str = "SELECT id, name, department_code, in_charge_id FROM programs WHERE name = ?1";
const SELECT_PROGRAM_COURSE_IDS: &str = "SELECT course_id FROM program_courses WHERE program_id = ?1 ORDER BY course_id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProgram {
    pub name: String,
    pub department_code: String,
    pub in_charge_id: Option<i64>,
}

impl NewProgram {
    pub fn new(name: impl Into<String>, department_code: impl Into<String>, in_charge_id: Option<i64>) -> Self {
        Self {
            name: name.into(),
            department_code: department_code.into(),
            in_charge_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub name: String,
    pub department_code: String,
    pub in_charge_id: Option<i64>,
}

impl Program {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            department_code: row.get(2)?,
            in_charge_id: row.get(3)?,
        })
    }
}

pub struct Programs<'a> {
    db: &'a mut Db,
}

impl<'a> Programs<'a> {
    pub fn new(db: &'a mut Db) -> Self {
        Self { db }
    }

    /// Adds a program and returns the generated id.
    pub fn insert(&mut self, program: &NewProgram) -> Result<i64> {
        self.db
            .transaction(|tx| {
                ensure_exists(tx, "departments", "code", program.department_code.as_str())?;
                if let Some(in_charge_id) = program.in_charge_id {
                    ensure_exists(tx, "faculty", "id", &in_charge_id)?;
                }
                tx.execute(INSERT_PROGRAM, params![program.name, program.department_code, program.in_charge_id])?;
                Ok(tx.last_insert_rowid())
            })
            .inspect(|id| tracing::debug!(id, name = %program.name, "program added"))
            .inspect_err(|e| tracing::warn!(name = %program.name, error = %e, "program rejected"))
    }

    /// Attaches an existing course to an existing program.
    pub fn assign_course(&mut self, program_id: i64, course_id: &str) -> Result<()> {
        self.db
            .transaction(|tx| {
                ensure_exists(tx, "programs", "id", &program_id)?;
                ensure_exists(tx, "courses", "id", course_id)?;
                tx.execute(INSERT_PROGRAM_COURSE, params![program_id, course_id])?;
                Ok(())
            })
            .inspect(|_| tracing::debug!(program_id, course_id, "course assigned to program"))
            .inspect_err(|e| tracing::warn!(program_id, course_id, error = %e, "course assignment rejected"))
    }

    pub fn get(&self, id: i64) -> Result<Option<Program>> {
        let program = self
            .db
            .conn
            .query_row(SELECT_PROGRAM_BY_ID, params![id], Program::from_row)
            .optional()?;
        Ok(program)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Program>> {
        let program = self
            .db
            .conn
            .query_row(SELECT_PROGRAM_BY_NAME, params![name], Program::from_row)
            .optional()?;
        Ok(program)
    }

    /// Ids of the courses attached to a program, sorted.
    pub fn course_ids(&self, program_id: i64) -> Result<Vec<String>> {
        let mut stmt = self.db.conn.prepare(SELECT_PROGRAM_COURSE_IDS)?;
        let ids = stmt
            .query_map(params![program_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(ids)
    }
}
