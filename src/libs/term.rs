//! Semester and academic-year tokens used by the evaluation reports.
//!
//! - A semester token is `"<Semester> <YY>"`, e.g. `"Fall 23"`.
//! - An academic-year token is `"<YY>-<YY>"`, e.g. `"23-24"`. It covers
//!   Summer and Fall of the first year and Spring of the second.
//!
//! Years are the two-digit values stored on sections.

use crate::libs::error::Error;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Semester {
    Fall,
    Spring,
    Summer,
}

impl Semester {
    pub const ALL: [Semester; 3] = [Semester::Fall, Semester::Spring, Semester::Summer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Semester::Fall => "Fall",
            Semester::Spring => "Spring",
            Semester::Summer => "Summer",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semester {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Semester::ALL
            .into_iter()
            .find(|semester| semester.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidToken {
                kind: "semester",
                token: s.to_string(),
                expected: "one of Fall, Spring, Summer",
            })
    }
}

impl ToSql for Semester {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Semester {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
    }
}

/// A semester of one year, parsed from `"Fall 23"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemesterTerm {
    pub semester: Semester,
    pub year: i32,
}

impl FromStr for SemesterTerm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidToken {
            kind: "semester",
            token: s.to_string(),
            expected: "'<Fall|Spring|Summer> <YY>', e.g. 'Fall 23'",
        };

        let mut parts = s.split_whitespace();
        let (Some(name), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let semester = name.parse().map_err(|_| invalid())?;
        let year = parse_two_digit_year(year).ok_or_else(invalid)?;

        Ok(Self { semester, year })
    }
}

impl fmt::Display for SemesterTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}", self.semester, self.year)
    }
}

/// Summer and Fall of `first_year` plus Spring of `second_year`, parsed from `"23-24"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcademicYear {
    pub first_year: i32,
    pub second_year: i32,
}

impl AcademicYear {
    /// The three semesters the academic year spans, in calendar order.
    pub fn terms(&self) -> [SemesterTerm; 3] {
        [
            SemesterTerm { semester: Semester::Summer, year: self.first_year },
            SemesterTerm { semester: Semester::Fall, year: self.first_year },
            SemesterTerm { semester: Semester::Spring, year: self.second_year },
        ]
    }

    pub fn contains(&self, term: &SemesterTerm) -> bool {
        self.terms().contains(term)
    }
}

impl FromStr for AcademicYear {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidToken {
            kind: "academic year",
            token: s.to_string(),
            expected: "'<YY>-<YY>', e.g. '23-24'",
        };

        let (first, second) = s.trim().split_once('-').ok_or_else(invalid)?;
        let first_year = parse_two_digit_year(first).ok_or_else(invalid)?;
        let second_year = parse_two_digit_year(second).ok_or_else(invalid)?;

        Ok(Self { first_year, second_year })
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.first_year, self.second_year)
    }
}

fn parse_two_digit_year(s: &str) -> Option<i32> {
    let s = s.trim();
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
