//! # Curricula - Program Accreditation Records
//!
//! A relational store for curriculum accreditation data: departments,
//! faculty, degree programs, courses and their sections, hierarchical
//! learning objectives and per-section evaluation results, plus the canned
//! reports built on top of them.
//!
//! ## Features
//!
//! - **Schema Management**: versioned, idempotent schema definition and an atomic reset
//! - **Validated Writes**: every insert is one transaction that enforces referential integrity
//! - **Reports**: department, program, semester and academic-year views with outer-join gaps kept
//! - **Data Export**: any report to CSV or JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use curricula::db::{db::Db, departments::{Department, Departments}, reports::Reports};
//!
//! let mut db = Db::open("curricula.db")?;
//! Departments::new(&mut db).insert(&Department::new("Computer Science", "CS"))?;
//! let programs = Reports::new(&db).programs_of_department("Computer Science")?;
//! # Ok::<(), curricula::libs::error::Error>(())
//! ```

pub mod commands;
pub mod db;
pub mod libs;
