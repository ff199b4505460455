#[derive(Debug, Clone)]
pub enum Message {
    // === SCHEMA MESSAGES ===
    SchemaUpToDate,
    SchemaDefined(String), // database path
    SchemaReset,
    SchemaVersion(u32),
    RunningMigration(u32, String), // version, name
    DroppingTable(String),
    ConfirmReset(String), // database path
    ResetCancelled,
    TableCountsHeader,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    PromptDatabasePath,
    DatabaseLocation(String),

    // === DATA ENTRY MESSAGES ===
    DepartmentAdded(String),          // code
    FacultyAdded(i64, String),        // id, name
    ProgramAdded(i64, String),        // id, name
    CourseAdded(String),              // course id
    SectionAdded(i64, String),        // id, course id
    ObjectiveAdded(String),           // objective id
    CourseAssigned(String, i64),      // course id, program id
    ObjectiveAssigned(String, String, i64), // objective id, course id, program id
    EvaluationRecorded(i64, String),  // section id, method
    WriteRejected(String),            // error

    // === REPORT MESSAGES ===
    ReportHeader(String),
    NoRowsFound,
    InformationNotFound,
    ObjectiveSummaryHeader,

    // === EXPORT MESSAGES ===
    ExportSuccess(String), // path
}
