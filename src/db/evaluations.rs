//! Section evaluation results.
//!
//! One row records how many students of a section met one objective under
//! one evaluation method (exam, project, ...). The count can never exceed
//! the section's enrollment.

use super::db::{ensure_exists, Db};
use crate::libs::error::{Constraint, IntegrityError, Result};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

const INSERT_EVALUATION: &str =
    "INSERT INTO section_evaluations (section_id, objective_id, evaluation_method, students_met) VALUES (?1, ?2, ?3, ?4)";
const SELECT_ENROLLMENT: &str = "SELECT enrollment_count FROM sections WHERE id = ?1";
const SELECT_EVALUATIONS_BY_SECTION: &str = "
    SELECT section_id, objective_id, evaluation_method, students_met
    FROM section_evaluations WHERE section_id = ?1
    ORDER BY objective_id, evaluation_method
";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEvaluation {
    pub section_id: i64,
    pub objective_id: String,
    pub evaluation_method: String,
    pub students_met: u32,
}

impl SectionEvaluation {
    pub fn new(section_id: i64, objective_id: impl Into<String>, evaluation_method: impl Into<String>, students_met: u32) -> Self {
        Self {
            section_id,
            objective_id: objective_id.into(),
            evaluation_method: evaluation_method.into(),
            students_met,
        }
    }
}

pub struct Evaluations<'a> {
    db: &'a mut Db,
}

impl<'a> Evaluations<'a> {
    pub fn new(db: &'a mut Db) -> Self {
        Self { db }
    }

    /// Records one section x objective x method measurement.
    pub fn insert(&mut self, evaluation: &SectionEvaluation) -> Result<()> {
        self.db
            .transaction(|tx| {
                let enrollment: Option<u32> = tx
                    .query_row(SELECT_ENROLLMENT, params![evaluation.section_id], |row| row.get(0))
                    .optional()?;
                let Some(enrollment) = enrollment else {
                    return Err(IntegrityError::missing_reference("sections", "id", evaluation.section_id).into());
                };
                ensure_exists(tx, "learning_objectives", "id", evaluation.objective_id.as_str())?;

                if evaluation.students_met > enrollment {
                    return Err(IntegrityError::new(
                        Constraint::StudentsMetExceedsEnrollment,
                        format!(
                            "{} students met but section {} enrolls {}",
                            evaluation.students_met, evaluation.section_id, enrollment
                        ),
                    )
                    .into());
                }

                tx.execute(
                    INSERT_EVALUATION,
                    params![
                        evaluation.section_id,
                        evaluation.objective_id,
                        evaluation.evaluation_method,
                        evaluation.students_met
                    ],
                )?;
                Ok(())
            })
            .inspect(|_| {
                tracing::debug!(
                    section_id = evaluation.section_id,
                    objective_id = %evaluation.objective_id,
                    method = %evaluation.evaluation_method,
                    "evaluation recorded"
                )
            })
            .inspect_err(|e| tracing::warn!(section_id = evaluation.section_id, error = %e, "evaluation rejected"))
    }

    pub fn list_for_section(&self, section_id: i64) -> Result<Vec<SectionEvaluation>> {
        let mut stmt = self.db.conn.prepare(SELECT_EVALUATIONS_BY_SECTION)?;
        let evaluations = stmt
            .query_map(params![section_id], |row| {
                Ok(SectionEvaluation {
                    section_id: row.get(0)?,
                    objective_id: row.get(1)?,
                    evaluation_method: row.get(2)?,
                    students_met: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(evaluations)
    }
}
