use crate::db::reports::{CourseObjectiveRow, FacultyProgramRow, ObjectiveSummary, SemesterResultRow, YearResultRow};
use crate::libs::messages::Message;
use prettytable::{row, Table};

/// Terminal tables for the reports. Missing outer-join data is spelled out
/// instead of left blank.
pub struct View {}

impl View {
    pub fn names(header: &str, names: &[String]) {
        let mut table = Table::new();

        table.add_row(row![header]);
        for name in names {
            table.add_row(row![name]);
        }
        table.printstd();
    }

    pub fn faculty_programs(rows: &[FacultyProgramRow]) {
        let mut table = Table::new();

        table.add_row(row!["FACULTY", "PROGRAM IN CHARGE"]);
        for r in rows {
            table.add_row(row![r.faculty_name, or_not_found(r.program_name.as_deref())]);
        }
        table.printstd();
    }

    pub fn course_objectives(rows: &[CourseObjectiveRow]) {
        let mut table = Table::new();

        table.add_row(row!["COURSE", "OBJECTIVE"]);
        for r in rows {
            table.add_row(row![r.course_title, or_not_found(r.objective_description.as_deref())]);
        }
        table.printstd();
    }

    pub fn semester_results(rows: &[SemesterResultRow]) {
        let mut table = Table::new();

        table.add_row(row!["COURSE", "SECTION", "METHOD", "STUDENTS MET"]);
        for r in rows {
            table.add_row(row![
                r.course_title,
                r.section_number,
                or_not_found(r.evaluation_method.as_deref()),
                r.students_met.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
            ]);
        }
        table.printstd();
    }

    pub fn year_results(rows: &[YearResultRow]) {
        let mut table = Table::new();

        table.add_row(row!["OBJECTIVE", "COURSE", "SECTION", "METHOD", "STUDENTS MET", "PERCENT"]);
        for r in rows {
            table.add_row(row![
                r.objective_description,
                r.course_title,
                r.section_number,
                r.evaluation_method,
                format!("{}/{}", r.students_met, r.enrollment_count),
                format_percent(r.percent_met)
            ]);
        }
        table.printstd();
    }

    pub fn objective_summaries(summaries: &[ObjectiveSummary]) {
        let mut table = Table::new();

        table.add_row(row!["OBJECTIVE", "EVALUATIONS", "STUDENTS MET", "PERCENT"]);
        for s in summaries {
            table.add_row(row![
                s.objective_description,
                s.evaluations,
                format!("{}/{}", s.students_met, s.students_evaluated),
                format_percent(s.percent_met)
            ]);
        }
        table.printstd();
    }

    pub fn table_counts(counts: &[(&str, i64)]) {
        let mut table = Table::new();

        table.add_row(row!["TABLE", "ROWS"]);
        for (name, count) in counts {
            table.add_row(row![name, count]);
        }
        table.printstd();
    }
}

fn or_not_found(value: Option<&str>) -> String {
    value.map(str::to_string).unwrap_or_else(|| Message::InformationNotFound.to_string())
}

pub fn format_percent(percent: Option<i64>) -> String {
    percent.map(|p| format!("{}%", p)).unwrap_or_else(|| "n/a".to_string())
}
