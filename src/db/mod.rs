//! Database layer for curricula.
//!
//! Persists the accreditation hierarchy in SQLite and answers the canned
//! reports over it.
//!
//! ## Features
//!
//! - **Session**: [`db::Db`] owns one connection with foreign keys enforced
//! - **Schema**: versioned table definitions, idempotent define and atomic reset
//! - **Writes**: one append-only repository per entity family, each insert in
//!   its own transaction
//! - **Reports**: the six fixed join queries with explicit `None` for missing data
//!
//! ## Usage
//!
//! ```rust,no_run
//! use curricula::db::{db::Db, departments::{Department, Departments}, reports::Reports};
//!
//! let mut db = Db::open("curricula.db")?;
//! Departments::new(&mut db).insert(&Department::new("Lyle School of Engineering", "ENG"))?;
//! let programs = Reports::new(&db).programs_of_department("Lyle School of Engineering")?;
//! assert!(programs.is_empty());
//! # Ok::<(), curricula::libs::error::Error>(())
//! ```
//!
//! There are no update or delete operations. Entities accumulate; the only
//! way to remove data is a full schema reset.

/// Connection management and the transaction helper.
pub mod db;

/// Schema versioning, definition and reset.
pub mod migrations;

/// Table and index DDL.
pub mod schema;

/// Departments, the root of the hierarchy.
pub mod departments;

/// Faculty members and ranks.
pub mod faculty;

/// Programs and their course lists.
pub mod programs;

/// Courses and their per-program objective mapping.
pub mod courses;

/// Course sections per semester.
pub mod sections;

/// Learning objectives and the sub-objective tree.
pub mod objectives;

/// Section evaluation results.
pub mod evaluations;

/// The canned reports.
pub mod reports;
