//! Supporting modules for curricula.
//!
//! ## Features
//!
//! - **Core Infrastructure**: configuration, data storage, error taxonomy, messaging
//! - **Report Inputs**: semester and academic-year tokens
//! - **Presentation**: console tables and CSV/JSON export

pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod messages;
pub mod term;
pub mod view;
