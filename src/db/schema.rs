//! Table and index definitions for the accreditation data model.
//!
//! Tables are listed parent-first in [`TABLES`] so that creating them in
//! order never references a table that does not exist yet. Dropping uses
//! [`TABLES_DROP_ORDER`], which removes children before the rows they point to.

pub const CREATE_DEPARTMENTS: &str = "CREATE TABLE IF NOT EXISTS departments (
    code TEXT NOT NULL PRIMARY KEY CHECK (length(code) BETWEEN 1 AND 4),
    name TEXT NOT NULL UNIQUE
)";

pub const CREATE_FACULTY: &str = "CREATE TABLE IF NOT EXISTS faculty (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    rank TEXT NOT NULL CHECK (rank IN ('full', 'associate', 'assistant', 'adjunct')),
    department_code TEXT NOT NULL REFERENCES departments(code)
)";

/// `in_charge_id` may point at faculty of any department.
pub const CREATE_PROGRAMS: &str = "CREATE TABLE IF NOT EXISTS programs (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    department_code TEXT NOT NULL REFERENCES departments(code),
    in_charge_id INTEGER REFERENCES faculty(id)
)";

pub const CREATE_COURSES: &str = "CREATE TABLE IF NOT EXISTS courses (
    id TEXT NOT NULL PRIMARY KEY CHECK (length(id) BETWEEN 1 AND 10),
    title TEXT NOT NULL,
    description TEXT,
    department_code TEXT NOT NULL REFERENCES departments(code)
)";

pub const CREATE_PROGRAM_COURSES: &str = "CREATE TABLE IF NOT EXISTS program_courses (
    program_id INTEGER NOT NULL REFERENCES programs(id),
    course_id TEXT NOT NULL REFERENCES courses(id),
    PRIMARY KEY (program_id, course_id)
)";

pub const CREATE_SECTIONS: &str = "CREATE TABLE IF NOT EXISTS sections (
    id INTEGER PRIMARY KEY,
    number INTEGER NOT NULL,
    semester TEXT NOT NULL CHECK (semester IN ('Fall', 'Spring', 'Summer')),
    year INTEGER NOT NULL,
    course_id TEXT NOT NULL REFERENCES courses(id),
    instructor_id INTEGER NOT NULL REFERENCES faculty(id),
    enrollment_count INTEGER NOT NULL CHECK (enrollment_count >= 0)
)";

pub const CREATE_LEARNING_OBJECTIVES: &str = "CREATE TABLE IF NOT EXISTS learning_objectives (
    id TEXT NOT NULL PRIMARY KEY,
    description TEXT NOT NULL,
    parent_id TEXT REFERENCES learning_objectives(id),
    CHECK (parent_id IS NULL OR parent_id <> id)
)";

/// The same course may carry different objectives in different programs.
pub const CREATE_COURSE_OBJECTIVES: &str = "CREATE TABLE IF NOT EXISTS course_objectives (
    course_id TEXT NOT NULL REFERENCES courses(id),
    objective_id TEXT NOT NULL REFERENCES learning_objectives(id),
    program_id INTEGER NOT NULL REFERENCES programs(id),
    PRIMARY KEY (course_id, objective_id, program_id)
)";

pub const CREATE_SECTION_EVALUATIONS: &str = "CREATE TABLE IF NOT EXISTS section_evaluations (
    section_id INTEGER NOT NULL REFERENCES sections(id),
    objective_id TEXT NOT NULL REFERENCES learning_objectives(id),
    evaluation_method TEXT NOT NULL,
    students_met INTEGER NOT NULL CHECK (students_met >= 0),
    PRIMARY KEY (section_id, objective_id, evaluation_method)
)";

/// Every entity table, parent-first.
pub const TABLES: &[(&str, &str)] = &[
    ("departments", CREATE_DEPARTMENTS),
    ("faculty", CREATE_FACULTY),
    ("programs", CREATE_PROGRAMS),
    ("courses", CREATE_COURSES),
    ("program_courses", CREATE_PROGRAM_COURSES),
    ("sections", CREATE_SECTIONS),
    ("learning_objectives", CREATE_LEARNING_OBJECTIVES),
    ("course_objectives", CREATE_COURSE_OBJECTIVES),
    ("section_evaluations", CREATE_SECTION_EVALUATIONS),
];

/// Child-first, so no drop orphans a row that is still referenced.
pub const TABLES_DROP_ORDER: &[&str] = &[
    "section_evaluations",
    "course_objectives",
    "program_courses",
    "sections",
    "programs",
    "courses",
    "faculty",
    "learning_objectives",
    "departments",
];

/// Indexes on the foreign-key columns the reports join through.
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_faculty_department ON faculty(department_code)",
    "CREATE INDEX IF NOT EXISTS idx_programs_department ON programs(department_code)",
    "CREATE INDEX IF NOT EXISTS idx_programs_in_charge ON programs(in_charge_id)",
    "CREATE INDEX IF NOT EXISTS idx_courses_department ON courses(department_code)",
    "CREATE INDEX IF NOT EXISTS idx_program_courses_course ON program_courses(course_id)",
    "CREATE INDEX IF NOT EXISTS idx_sections_course ON sections(course_id)",
    "CREATE INDEX IF NOT EXISTS idx_sections_term ON sections(semester, year)",
    "CREATE INDEX IF NOT EXISTS idx_objectives_parent ON learning_objectives(parent_id)",
    "CREATE INDEX IF NOT EXISTS idx_course_objectives_program ON course_objectives(program_id)",
    "CREATE INDEX IF NOT EXISTS idx_section_evaluations_objective ON section_evaluations(objective_id)",
];

/// Names of every entity table, parent-first.
pub fn table_names() -> impl Iterator<Item = &'static str> {
    TABLES.iter().map(|(name, _)| *name)
}
