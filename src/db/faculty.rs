//! Faculty members and their academic rank.

use super::db::{ensure_exists, Db};
use crate::libs::error::{Error, Result};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const INSERT_FACULTY: &str = "INSERT INTO faculty (name, email, rank, department_code) VALUES (?1, ?2, ?3, ?4)";
const SELECT_FACULTY_BY_ID: &str = "SELECT id, name, email, rank, department_code FROM faculty WHERE id = ?1";
const SELECT_FACULTY_BY_EMAIL: &str = "SELECT id, name, email, rank, department_code FROM faculty WHERE email = ?1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Full,
    Associate,
    Assistant,
    Adjunct,
}

impl Rank {
    pub const ALL: [Rank; 4] = [Rank::Full, Rank::Associate, Rank::Assistant, Rank::Adjunct];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Full => "full",
            Rank::Associate => "associate",
            Rank::Assistant => "assistant",
            Rank::Adjunct => "adjunct",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Rank::ALL
            .into_iter()
            .find(|rank| rank.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidToken {
                kind: "rank",
                token: s.to_string(),
                expected: "one of full, associate, assistant, adjunct",
            })
    }
}

impl ToSql for Rank {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Rank {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
    }
}

/// A faculty row before the database assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFaculty {
    pub name: String,
    pub email: String,
    pub rank: Rank,
    pub department_code: String,
}

impl NewFaculty {
    pub fn new(name: impl Into<String>, email: impl Into<String>, rank: Rank, department_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            rank,
            department_code: department_code.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub rank: Rank,
    pub department_code: String,
}

impl Faculty {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            rank: row.get(3)?,
            department_code: row.get(4)?,
        })
    }
}

pub struct FacultyMembers<'a> {
    db: &'a mut Db,
}

impl<'a> FacultyMembers<'a> {
    pub fn new(db: &'a mut Db) -> Self {
        Self { db }
    }

    /// Adds a faculty member and returns the generated id.
    pub fn insert(&mut self, faculty: &NewFaculty) -> Result<i64> {
        self.db
            .transaction(|tx| {
                ensure_exists(tx, "departments", "code", faculty.department_code.as_str())?;
                tx.execute(
                    INSERT_FACULTY,
                    params![faculty.name, faculty.email, faculty.rank, faculty.department_code],
                )?;
                Ok(tx.last_insert_rowid())
            })
            .inspect(|id| tracing::debug!(id, email = %faculty.email, "faculty added"))
            .inspect_err(|e| tracing::warn!(email = %faculty.email, error = %e, "faculty rejected"))
    }

    pub fn get(&self, id: i64) -> Result<Option<Faculty>> {
        let faculty = self
            .db
            .conn
            .query_row(SELECT_FACULTY_BY_ID, params![id], Faculty::from_row)
            .optional()?;
        Ok(faculty)
    }

    pub fn get_by_email(&self, email: &str) -> Result<Option<Faculty>> {
        let faculty = self
            .db
            .conn
            .query_row(SELECT_FACULTY_BY_EMAIL, params![email], Faculty::from_row)
            .optional()?;
        Ok(faculty)
    }
}
