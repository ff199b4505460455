//! Courses and the learning objectives they cover within a program.
//!
//! A course id such as `BIZ1000` embeds its department code. Objectives are
//! mapped per program: the same course can carry different objectives in
//! two programs that both include it.

use super::db::{ensure_exists, Db};
use crate::libs::error::{Constraint, IntegrityError, Result};
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_COURSE: &str = "INSERT INTO courses (id, title, description, department_code) VALUES (?1, ?2, ?3, ?4)";
const INSERT_COURSE_OBJECTIVE: &str = "INSERT INTO course_objectives (course_id, objective_id, program_id) VALUES (?1, ?2, ?3)";
const SELECT_COURSE_BY_ID: &str = "SELECT id, title, description, department_code FROM courses WHERE id = ?1";
const SELECT_PROGRAM_COURSE: &str = "SELECT EXISTS(SELECT 1 FROM program_courses WHERE program_id = ?1 AND course_id = ?2)";
const SELECT_COURSE_OBJECTIVE_IDS: &str = "
    SELECT objective_id FROM course_objectives
    WHERE course_id = ?1 AND program_id = ?2
    ORDER BY objective_id
";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub department_code: String,
}

impl Course {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: Option<String>,
        department_code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description,
            department_code: department_code.into(),
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            department_code: row.get(3)?,
        })
    }
}

pub struct Courses<'a> {
    db: &'a mut Db,
}

impl<'a> Courses<'a> {
    pub fn new(db: &'a mut Db) -> Self {
        Self { db }
    }

    pub fn insert(&mut self, course: &Course) -> Result<()> {
        self.db
            .transaction(|tx| {
                ensure_exists(tx, "departments", "code", course.department_code.as_str())?;
                if !course.id.starts_with(course.department_code.as_str()) {
                    return Err(IntegrityError::new(
                        Constraint::Check,
                        format!(
                            "course id '{}' does not start with department code '{}'",
                            course.id, course.department_code
                        ),
                    )
                    .into());
                }
                tx.execute(
                    INSERT_COURSE,
                    params![course.id, course.title, course.description, course.department_code],
                )?;
                Ok(())
            })
            .inspect(|_| tracing::debug!(id = %course.id, "course added"))
            .inspect_err(|e| tracing::warn!(id = %course.id, error = %e, "course rejected"))
    }

    /// Maps a learning objective onto a course in the context of one program.
    ///
    /// The course must already be part of the program.
    pub fn assign_objective(&mut self, course_id: &str, objective_id: &str, program_id: i64) -> Result<()> {
        self.db
            .transaction(|tx| {
                ensure_exists(tx, "courses", "id", course_id)?;
                ensure_exists(tx, "learning_objectives", "id", objective_id)?;
                ensure_exists(tx, "programs", "id", &program_id)?;

                let in_program: bool = tx.query_row(SELECT_PROGRAM_COURSE, params![program_id, course_id], |row| row.get(0))?;
                if !in_program {
                    return Err(IntegrityError::missing_reference(
                        "program_courses",
                        "(program_id, course_id)",
                        format!("{program_id}, {course_id}"),
                    )
                    .into());
                }

                tx.execute(INSERT_COURSE_OBJECTIVE, params![course_id, objective_id, program_id])?;
                Ok(())
            })
            .inspect(|_| tracing::debug!(course_id, objective_id, program_id, "objective assigned to course"))
            .inspect_err(|e| tracing::warn!(course_id, objective_id, program_id, error = %e, "objective assignment rejected"))
    }

    pub fn get(&self, id: &str) -> Result<Option<Course>> {
        let course = self
            .db
            .conn
            .query_row(SELECT_COURSE_BY_ID, params![id], Course::from_row)
            .optional()?;
        Ok(course)
    }

    /// Objective ids mapped onto a course within a program, sorted.
    pub fn objective_ids(&self, course_id: &str, program_id: i64) -> Result<Vec<String>> {
        let mut stmt = self.db.conn.prepare(SELECT_COURSE_OBJECTIVE_IDS)?;
        let ids = stmt
            .query_map(params![course_id, program_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(ids)
    }
}
