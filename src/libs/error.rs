//! Error taxonomy for the curricula data layer.
//!
//! Every fallible library operation returns [`Result`]. The variants mirror
//! the way callers are expected to react:
//!
//! - **Integrity**: the write was rejected by a key, uniqueness, check or
//!   objective-hierarchy rule. The transaction was rolled back and nothing
//!   was stored.
//! - **Storage**: the engine itself failed (file unreadable, disk full,
//!   connection lost). The operation is considered not applied.
//! - **Schema**: defining or resetting the schema failed.
//! - **InvalidToken**: a report parameter such as `"Fall 23"` or `"23-24"`
//!   could not be parsed. No query was run.
//!
//! A report that matches nothing is not an error: it yields an empty
//! sequence or rows with `None` columns.

use rusqlite::ffi;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the schema and reporting layers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("schema error: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("storage error: {0}")]
    Storage(#[source] rusqlite::Error),

    #[error("invalid {kind} token '{token}': expected {expected}")]
    InvalidToken {
        kind: &'static str,
        token: String,
        expected: &'static str,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the integrity violation if this error is one.
    pub fn as_integrity(&self) -> Option<&IntegrityError> {
        match self {
            Error::Integrity(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_integrity(&self) -> bool {
        self.as_integrity().is_some()
    }

    /// Wraps an engine error raised while defining or resetting the schema.
    ///
    /// Constraint failures are not classified: they stay `Schema`.
    pub(crate) fn schema(err: rusqlite::Error) -> Self {
        Error::Schema(err)
    }
}

/// The kind of rule a rejected write broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    ForeignKey,
    Unique,
    NotNull,
    Check,
    SelfParent,
    Cycle,
    StudentsMetExceedsEnrollment,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Constraint::ForeignKey => "foreign key",
            Constraint::Unique => "unique",
            Constraint::NotNull => "not null",
            Constraint::Check => "check",
            Constraint::SelfParent => "self parent",
            Constraint::Cycle => "objective cycle",
            Constraint::StudentsMetExceedsEnrollment => "students met within enrollment",
        };
        f.write_str(name)
    }
}

/// A rejected write, naming the violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{constraint} constraint violated: {detail}")]
pub struct IntegrityError {
    pub constraint: Constraint,
    pub detail: String,
}

impl IntegrityError {
    pub fn new(constraint: Constraint, detail: impl Into<String>) -> Self {
        Self {
            constraint,
            detail: detail.into(),
        }
    }

    /// A reference to `table.column = value` that does not exist.
    pub fn missing_reference(table: &str, column: &str, value: impl fmt::Display) -> Self {
        Self::new(Constraint::ForeignKey, format!("no {table} row with {column} = '{value}'"))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        match classify_constraint(&err) {
            Some(constraint) => {
                let detail = match &err {
                    rusqlite::Error::SqliteFailure(_, Some(msg)) => msg.clone(),
                    other => other.to_string(),
                };
                Error::Integrity(IntegrityError::new(constraint, detail))
            }
            None => Error::Storage(err),
        }
    }
}

/// Maps SQLite extended result codes onto [`Constraint`] kinds.
fn classify_constraint(err: &rusqlite::Error) -> Option<Constraint> {
    let rusqlite::Error::SqliteFailure(failure, _) = err else {
        return None;
    };
    if failure.code != rusqlite::ErrorCode::ConstraintViolation {
        return None;
    }

    let constraint = match failure.extended_code {
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Constraint::ForeignKey,
        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Constraint::Unique,
        ffi::SQLITE_CONSTRAINT_NOTNULL => Constraint::NotNull,
        _ => Constraint::Check,
    };
    Some(constraint)
}
