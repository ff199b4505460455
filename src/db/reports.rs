//! The canned accreditation reports.
//!
//! Each report is one fixed, parameterized join over the schema. Wherever a
//! parent row (faculty member, course, section) must stay visible even when
//! its child data is missing, the query uses an outer join and the missing
//! columns come back as `None`. A report whose filter matches nothing returns
//! an empty `Vec`, never an error.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use curricula::db::{db::Db, reports::Reports};
//!
//! let db = Db::open("curricula.db")?;
//! let reports = Reports::new(&db);
//! for row in reports.evaluation_results_for_semester("Fall 23", "Computer Science")? {
//!     println!("{} {} {:?}", row.course_title, row.section_number, row.students_met);
//! }
//! # Ok::<(), curricula::libs::error::Error>(())
//! ```

use super::db::Db;
use crate::libs::error::Result;
use crate::libs::term::{AcademicYear, Semester, SemesterTerm};
use rusqlite::{params, Connection, Params, Row};
use serde::Serialize;

const SELECT_PROGRAMS_OF_DEPARTMENT: &str = "
    SELECT p.name
    FROM departments AS d
    JOIN programs AS p ON d.code = p.department_code
    WHERE d.name = ?1
    ORDER BY p.name
";

const SELECT_FACULTY_OF_DEPARTMENT: &str = "
    SELECT f.name, p.name
    FROM departments AS d
    JOIN faculty AS f ON d.code = f.department_code
    LEFT JOIN programs AS p ON p.in_charge_id = f.id
    WHERE d.name = ?1
    ORDER BY f.name, f.id, p.name
";

const SELECT_COURSE_OBJECTIVES_OF_PROGRAM: &str = "
    SELECT c.title, lo.description
    FROM programs AS p
    JOIN program_courses AS pc ON pc.program_id = p.id
    JOIN courses AS c ON c.id = pc.course_id
    LEFT JOIN course_objectives AS co ON co.course_id = c.id AND co.program_id = p.id
    LEFT JOIN learning_objectives AS lo ON lo.id = co.objective_id
    WHERE p.name = ?1
    ORDER BY c.id, lo.id
";

const SELECT_DISTINCT_OBJECTIVES_OF_PROGRAM: &str = "
    SELECT DISTINCT lo.description
    FROM programs AS p
    JOIN program_courses AS pc ON pc.program_id = p.id
    JOIN courses AS c ON c.id = pc.course_id
    JOIN course_objectives AS co ON co.course_id = c.id AND co.program_id = p.id
    JOIN learning_objectives AS lo ON lo.id = co.objective_id
    WHERE p.name = ?1
    ORDER BY lo.description
";

const SELECT_RESULTS_FOR_SEMESTER: &str = "
    SELECT c.title, s.number, se.evaluation_method, se.students_met
    FROM courses AS c
    JOIN sections AS s ON s.course_id = c.id
    JOIN program_courses AS pc ON pc.course_id = c.id
    JOIN programs AS p ON p.id = pc.program_id
    LEFT JOIN section_evaluations AS se ON se.section_id = s.id
    WHERE s.semester = ?1 AND s.year = ?2 AND p.name = ?3
    ORDER BY c.id, s.id, se.objective_id, se.evaluation_method
";

const SELECT_RESULTS_FOR_ACADEMIC_YEAR: &str = "
    SELECT lo.description, c.title, s.number, se.evaluation_method, se.students_met, s.enrollment_count
    FROM courses AS c
    JOIN sections AS s ON s.course_id = c.id
    JOIN course_objectives AS co ON co.course_id = c.id
    JOIN learning_objectives AS lo ON lo.id = co.objective_id
    JOIN section_evaluations AS se ON se.section_id = s.id AND se.objective_id = lo.id
    WHERE (s.year = ?1 AND s.semester IN (?3, ?4))
       OR (s.year = ?2 AND s.semester = ?5)
    GROUP BY lo.id, c.id, s.id, se.evaluation_method
    ORDER BY c.id, s.id, lo.id, se.evaluation_method
";

/// A faculty member and the program they are in charge of, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacultyProgramRow {
    pub faculty_name: String,
    pub program_name: Option<String>,
}

/// A course of a program and one of its objectives, if any are mapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseObjectiveRow {
    pub course_title: String,
    pub objective_description: Option<String>,
}

/// A section of the semester; evaluation columns are `None` when nothing was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemesterResultRow {
    pub course_title: String,
    pub section_number: u32,
    pub evaluation_method: Option<String>,
    pub students_met: Option<u32>,
}

impl SemesterResultRow {
    pub fn is_recorded(&self) -> bool {
        self.evaluation_method.is_some()
    }
}

/// One evaluation of the academic year with its success rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearResultRow {
    pub objective_description: String,
    pub course_title: String,
    pub section_number: u32,
    pub evaluation_method: String,
    pub students_met: u32,
    pub enrollment_count: u32,
    /// `None` when the section has no enrollment.
    pub percent_met: Option<i64>,
}

/// Academic-year totals for one objective across all its evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectiveSummary {
    pub objective_description: String,
    pub evaluations: usize,
    pub students_met: u64,
    pub students_evaluated: u64,
    pub percent_met: Option<i64>,
}

/// `students_met` as a whole percentage of `enrollment_count`, rounded half away from zero.
///
/// Returns `None` for an empty section instead of dividing by zero.
pub fn percent_met(students_met: u32, enrollment_count: u32) -> Option<i64> {
    percent_of(u64::from(students_met), u64::from(enrollment_count))
}

fn percent_of(part: u64, whole: u64) -> Option<i64> {
    if whole == 0 {
        return None;
    }
    Some((part as f64 * 100.0 / whole as f64).round() as i64)
}

pub struct Reports<'a> {
    conn: &'a Connection,
}

impl<'a> Reports<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { conn: &db.conn }
    }

    /// Names of the programs run by the named department.
    pub fn programs_of_department(&self, department_name: &str) -> Result<Vec<String>> {
        self.query(SELECT_PROGRAMS_OF_DEPARTMENT, params![department_name], |row| row.get(0))
    }

    /// Faculty of the named department, each with the program they lead.
    ///
    /// Faculty in charge of nothing appear once with `program_name: None`.
    pub fn faculty_of_department(&self, department_name: &str) -> Result<Vec<FacultyProgramRow>> {
        self.query(SELECT_FACULTY_OF_DEPARTMENT, params![department_name], |row| {
            Ok(FacultyProgramRow {
                faculty_name: row.get(0)?,
                program_name: row.get(1)?,
            })
        })
    }

    /// Courses of the named program with their objectives in that program.
    ///
    /// A course without objectives appears once with `objective_description: None`.
    pub fn course_objectives_of_program(&self, program_name: &str) -> Result<Vec<CourseObjectiveRow>> {
        self.query(SELECT_COURSE_OBJECTIVES_OF_PROGRAM, params![program_name], |row| {
            Ok(CourseObjectiveRow {
                course_title: row.get(0)?,
                objective_description: row.get(1)?,
            })
        })
    }

    /// Objective descriptions covered by the named program, de-duplicated by text.
    pub fn distinct_objectives_of_program(&self, program_name: &str) -> Result<Vec<String>> {
        self.query(SELECT_DISTINCT_OBJECTIVES_OF_PROGRAM, params![program_name], |row| row.get(0))
    }

    /// Evaluation results of the program's sections in one semester, e.g. `"Fall 23"`.
    pub fn evaluation_results_for_semester(&self, semester_token: &str, program_name: &str) -> Result<Vec<SemesterResultRow>> {
        let term: SemesterTerm = semester_token.parse()?;
        self.evaluation_results_for_term(term, program_name)
    }

    pub fn evaluation_results_for_term(&self, term: SemesterTerm, program_name: &str) -> Result<Vec<SemesterResultRow>> {
        self.query(
            SELECT_RESULTS_FOR_SEMESTER,
            params![term.semester, term.year, program_name],
            |row| {
                Ok(SemesterResultRow {
                    course_title: row.get(0)?,
                    section_number: row.get(1)?,
                    evaluation_method: row.get(2)?,
                    students_met: row.get(3)?,
                })
            },
        )
    }

    /// Evaluation results of an academic year, e.g. `"23-24"`, with percentages.
    pub fn evaluation_results_for_academic_year(&self, year_token: &str) -> Result<Vec<YearResultRow>> {
        let year: AcademicYear = year_token.parse()?;
        self.evaluation_results_for_year(year)
    }

    pub fn evaluation_results_for_year(&self, year: AcademicYear) -> Result<Vec<YearResultRow>> {
        self.query(
            SELECT_RESULTS_FOR_ACADEMIC_YEAR,
            params![
                year.first_year,
                year.second_year,
                Semester::Summer,
                Semester::Fall,
                Semester::Spring
            ],
            |row| {
                let students_met: u32 = row.get(4)?;
                let enrollment_count: u32 = row.get(5)?;
                Ok(YearResultRow {
                    objective_description: row.get(0)?,
                    course_title: row.get(1)?,
                    section_number: row.get(2)?,
                    evaluation_method: row.get(3)?,
                    students_met,
                    enrollment_count,
                    percent_met: percent_met(students_met, enrollment_count),
                })
            },
        )
    }

    fn query<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, f)?.collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(rows)
    }
}

/// Rolls academic-year rows up per objective, in order of first appearance.
pub fn summarize_by_objective(rows: &[YearResultRow]) -> Vec<ObjectiveSummary> {
    let mut summaries: Vec<ObjectiveSummary> = Vec::new();

    for row in rows {
        let position = summaries
            .iter()
            .position(|s| s.objective_description == row.objective_description);
        let summary = match position {
            Some(i) => &mut summaries[i],
            None => {
                summaries.push(ObjectiveSummary {
                    objective_description: row.objective_description.clone(),
                    evaluations: 0,
                    students_met: 0,
                    students_evaluated: 0,
                    percent_met: None,
                });
                let last = summaries.len() - 1;
                &mut summaries[last]
            }
        };
        summary.evaluations += 1;
        summary.students_met += u64::from(row.students_met);
        summary.students_evaluated += u64::from(row.enrollment_count);
    }

    for summary in &mut summaries {
        summary.percent_met = percent_of(summary.students_met, summary.students_evaluated);
    }
    summaries
}
