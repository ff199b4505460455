//! Human-readable text for every [`Message`].
//!
//! All console text lives here so commands only ever name a variant.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SCHEMA MESSAGES ===
            Message::SchemaUpToDate => "Database schema is up to date".to_string(),
            Message::SchemaDefined(path) => format!("Database schema ready at {}", path),
            Message::SchemaReset => "All tables were dropped and recreated".to_string(),
            Message::SchemaVersion(version) => format!("Schema version: {}", version),
            Message::RunningMigration(version, name) => format!("Applying schema version {}: {}", version, name),
            Message::DroppingTable(table) => format!("Dropping table {}", table),
            Message::ConfirmReset(path) => format!("This deletes ALL data in {}. Continue?", path),
            Message::ResetCancelled => "Reset cancelled, nothing was changed.".to_string(),
            Message::TableCountsHeader => "Rows per table".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::PromptDatabasePath => "Database file".to_string(),
            Message::DatabaseLocation(path) => format!("Database: {}", path),

            // === DATA ENTRY MESSAGES ===
            Message::DepartmentAdded(code) => format!("Department '{}' added", code),
            Message::FacultyAdded(id, name) => format!("Faculty member '{}' added with id {}", name, id),
            Message::ProgramAdded(id, name) => format!("Program '{}' added with id {}", name, id),
            Message::CourseAdded(id) => format!("Course '{}' added", id),
            Message::SectionAdded(id, course_id) => format!("Section {} of course '{}' added", id, course_id),
            Message::ObjectiveAdded(id) => format!("Learning objective '{}' added", id),
            Message::CourseAssigned(course_id, program_id) => format!("Course '{}' assigned to program {}", course_id, program_id),
            Message::ObjectiveAssigned(objective_id, course_id, program_id) => {
                format!("Objective '{}' assigned to course '{}' in program {}", objective_id, course_id, program_id)
            }
            Message::EvaluationRecorded(section_id, method) => format!("Evaluation '{}' recorded for section {}", method, section_id),
            Message::WriteRejected(error) => format!("Nothing was saved: {}", error),

            // === REPORT MESSAGES ===
            Message::ReportHeader(title) => title.clone(),
            Message::NoRowsFound => "No matching records found.".to_string(),
            Message::InformationNotFound => "information not found".to_string(),
            Message::ObjectiveSummaryHeader => "Totals per objective".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportSuccess(path) => format!("Report exported successfully to: {}", path),
        };
        write!(f, "{}", text)
    }
}
