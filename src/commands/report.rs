use crate::{
    db::{
        db::Db,
        reports::{summarize_by_objective, Reports},
    },
    libs::{
        export::{ExportFormat, Exporter},
        messages::Message,
        term::{AcademicYear, SemesterTerm},
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    report: Report,

    /// Print a table or write the rows to a file
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Output file for csv/json; a timestamped name is used when omitted
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Report {
    /// Programs offered by a department
    Programs { department: String },
    /// Faculty of a department and the program each is in charge of
    Faculty { department: String },
    /// Courses of a program with their mapped objectives
    CourseObjectives { program: String },
    /// Distinct objective descriptions of a program
    Objectives { program: String },
    /// Evaluation results of a program's sections for one semester, e.g. "Fall 23"
    Semester { term: SemesterTerm, program: String },
    /// Evaluation results and success rates for an academic year, e.g. "23-24"
    Year {
        year: AcademicYear,
        /// Also print totals per objective
        #[arg(long)]
        summary: bool,
    },
}

impl Report {
    fn name(&self) -> &'static str {
        match self {
            Report::Programs { .. } => "programs",
            Report::Faculty { .. } => "faculty",
            Report::CourseObjectives { .. } => "course_objectives",
            Report::Objectives { .. } => "objectives",
            Report::Semester { .. } => "semester",
            Report::Year { .. } => "year",
        }
    }
}

pub fn cmd(db: &Db, args: ReportArgs) -> Result<()> {
    let reports = Reports::new(db);
    let name = args.report.name();
    let out = Output {
        format: args.format,
        output: args.output,
        name,
    };

    match args.report {
        Report::Programs { department } => {
            let names = reports.programs_of_department(&department)?;
            out.emit(&format!("Programs of {}", department), &names, |rows| View::names("PROGRAM", rows))
        }
        Report::Faculty { department } => {
            let rows = reports.faculty_of_department(&department)?;
            out.emit(&format!("Faculty of {}", department), &rows, View::faculty_programs)
        }
        Report::CourseObjectives { program } => {
            let rows = reports.course_objectives_of_program(&program)?;
            out.emit(&format!("Course objectives of {}", program), &rows, View::course_objectives)
        }
        Report::Objectives { program } => {
            let names = reports.distinct_objectives_of_program(&program)?;
            out.emit(&format!("Objectives of {}", program), &names, |rows| View::names("OBJECTIVE", rows))
        }
        Report::Semester { term, program } => {
            let rows = reports.evaluation_results_for_term(term, &program)?;
            out.emit(&format!("{} results for {}", term, program), &rows, View::semester_results)
        }
        Report::Year { year, summary } => {
            let rows = reports.evaluation_results_for_year(year)?;
            let title = format!("Results for {:02}-{:02}", year.first_year, year.second_year);
            out.emit(&title, &rows, View::year_results)?;

            if summary && !rows.is_empty() {
                let summaries = summarize_by_objective(&rows);
                match out.format {
                    OutputFormat::Table => {
                        msg_print!(Message::ObjectiveSummaryHeader, true);
                        View::objective_summaries(&summaries);
                    }
                    _ => Output {
                        format: out.format,
                        output: None,
                        name: "year_summary",
                    }
                    .export(&summaries)?,
                }
            }
            Ok(())
        }
    }
}

struct Output {
    format: OutputFormat,
    output: Option<PathBuf>,
    name: &'static str,
}

impl Output {
    fn emit<T: Serialize>(&self, title: &str, rows: &[T], show: impl FnOnce(&[T])) -> Result<()> {
        if self.format != OutputFormat::Table {
            return self.export(rows);
        }

        msg_print!(Message::ReportHeader(title.to_string()), true);
        if rows.is_empty() {
            msg_info!(Message::NoRowsFound);
        } else {
            show(rows);
        }
        Ok(())
    }

    fn export<T: Serialize>(&self, rows: &[T]) -> Result<()> {
        let format = match self.format {
            OutputFormat::Csv => ExportFormat::Csv,
            OutputFormat::Json => ExportFormat::Json,
            OutputFormat::Table => return Ok(()),
        };
        let exporter = Exporter::new(format, self.name, self.output.clone());
        exporter.export(rows)?;
        msg_success!(Message::ExportSuccess(exporter.output_path().display().to_string()));
        Ok(())
    }
}
