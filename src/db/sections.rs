//! Course sections offered in a given semester.

use super::db::{ensure_exists, Db};
use crate::libs::error::Result;
use crate::libs::term::{Semester, SemesterTerm};
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_SECTION: &str = "INSERT INTO sections (number, semester, year, course_id, instructor_id, enrollment_count)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_SECTION_BY_ID: &str =
    "SELECT id, number, semester, year, course_id, instructor_id, enrollment_count FROM sections WHERE id = ?1";
const SELECT_SECTIONS_BY_COURSE: &str = "
    SELECT id, number, semester, year, course_id, instructor_id, enrollment_count
    FROM sections WHERE course_id = ?1
    ORDER BY year, id
";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSection {
    pub number: u32,
    pub semester: Semester,
    pub year: i32,
    pub course_id: String,
    pub instructor_id: i64,
    pub enrollment_count: u32,
}

impl NewSection {
    pub fn new(number: u32, term: SemesterTerm, course_id: impl Into<String>, instructor_id: i64, enrollment_count: u32) -> Self {
        Self {
            number,
            semester: term.semester,
            year: term.year,
            course_id: course_id.into(),
            instructor_id,
            enrollment_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub number: u32,
    pub semester: Semester,
    pub year: i32,
    pub course_id: String,
    pub instructor_id: i64,
    pub enrollment_count: u32,
}

impl Section {
    pub fn term(&self) -> SemesterTerm {
        SemesterTerm {
            semester: self.semester,
            year: self.year,
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            number: row.get(1)?,
            semester: row.get(2)?,
            year: row.get(3)?,
            course_id: row.get(4)?,
            instructor_id: row.get(5)?,
            enrollment_count: row.get(6)?,
        })
    }
}

pub struct Sections<'a> {
    db: &'a mut Db,
}

impl<'a> Sections<'a> {
    pub fn new(db: &'a mut Db) -> Self {
        Self { db }
    }

    /// Adds a section and returns the generated id.
    pub fn insert(&mut self, section: &NewSection) -> Result<i64> {
        self.db
            .transaction(|tx| {
                ensure_exists(tx, "courses", "id", section.course_id.as_str())?;
                ensure_exists(tx, "faculty", "id", &section.instructor_id)?;
                tx.execute(
                    INSERT_SECTION,
                    params![
                        section.number,
                        section.semester,
                        section.year,
                        section.course_id,
                        section.instructor_id,
                        section.enrollment_count
                    ],
                )?;
                Ok(tx.last_insert_rowid())
            })
            .inspect(|id| tracing::debug!(id, course_id = %section.course_id, "section added"))
            .inspect_err(|e| tracing::warn!(course_id = %section.course_id, error = %e, "section rejected"))
    }

    pub fn get(&self, id: i64) -> Result<Option<Section>> {
        let section = self
            .db
            .conn
            .query_row(SELECT_SECTION_BY_ID, params![id], Section::from_row)
            .optional()?;
        Ok(section)
    }

    pub fn list_for_course(&self, course_id: &str) -> Result<Vec<Section>> {
        let mut stmt = self.db.conn.prepare(SELECT_SECTIONS_BY_COURSE)?;
        let sections = stmt
            .query_map(params![course_id], Section::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sections)
    }
}
