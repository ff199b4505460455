//! Data entry. One subcommand per write operation; every write is a single
//! transaction and a rejected write leaves the database unchanged.

use crate::{
    db::{
        courses::{Course, Courses},
        db::Db,
        departments::{Department, Departments},
        evaluations::{Evaluations, SectionEvaluation},
        faculty::{FacultyMembers, NewFaculty, Rank},
        objectives::{LearningObjective, Objectives},
        programs::{NewProgram, Programs},
        sections::{NewSection, Sections},
    },
    libs::{error, messages::Message, term::SemesterTerm},
    msg_error_anyhow, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct AddArgs {
    #[command(subcommand)]
    entity: Entity,
}

#[derive(Debug, Subcommand)]
enum Entity {
    /// Add a department
    Department {
        /// Up to four characters, e.g. "CS"
        code: String,
        name: String,
    },
    /// Add a faculty member
    Faculty {
        name: String,
        email: String,
        /// full, associate, assistant or adjunct
        rank: Rank,
        department: String,
    },
    /// Add a degree program
    Program {
        name: String,
        department: String,
        /// Faculty id of the person in charge
        #[arg(long)]
        in_charge: Option<i64>,
    },
    /// Add a course
    Course {
        /// Up to ten characters, e.g. "CS101"
        id: String,
        title: String,
        department: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Add a section of a course
    Section {
        course: String,
        number: u32,
        /// e.g. "Fall 23"
        term: SemesterTerm,
        /// Faculty id of the instructor
        instructor: i64,
        enrollment: u32,
    },
    /// Add a learning objective
    Objective {
        id: String,
        description: String,
        /// Id of the objective this one refines
        #[arg(long)]
        parent: Option<String>,
    },
    /// Make a course part of a program
    ProgramCourse { program: i64, course: String },
    /// Map an objective onto a course within a program
    CourseObjective {
        course: String,
        objective: String,
        program: i64,
    },
    /// Record how many students of a section met an objective
    Evaluation {
        section: i64,
        objective: String,
        method: String,
        students_met: u32,
    },
}

pub fn cmd(db: &mut Db, args: AddArgs) -> Result<()> {
    let message = write(db, args.entity).map_err(|e| msg_error_anyhow!(Message::WriteRejected(e.to_string())))?;
    msg_success!(message);
    Ok(())
}

fn write(db: &mut Db, entity: Entity) -> error::Result<Message> {
    let message = match entity {
        Entity::Department { code, name } => {
            Departments::new(db).insert(&Department::new(name, code.as_str()))?;
            Message::DepartmentAdded(code)
        }
        Entity::Faculty {
            name,
            email,
            rank,
            department,
        } => {
            let id = FacultyMembers::new(db).insert(&NewFaculty::new(name.as_str(), email, rank, department))?;
            Message::FacultyAdded(id, name)
        }
        Entity::Program {
            name,
            department,
            in_charge,
        } => {
            let id = Programs::new(db).insert(&NewProgram::new(name.as_str(), department, in_charge))?;
            Message::ProgramAdded(id, name)
        }
        Entity::Course {
            id,
            title,
            department,
            description,
        } => {
            Courses::new(db).insert(&Course::new(id.as_str(), title, description, department))?;
            Message::CourseAdded(id)
        }
        Entity::Section {
            course,
            number,
            term,
            instructor,
            enrollment,
        } => {
            let id = Sections::new(db).insert(&NewSection::new(number, term, course.as_str(), instructor, enrollment))?;
            Message::SectionAdded(id, course)
        }
        Entity::Objective { id, description, parent } => {
            Objectives::new(db).insert(&LearningObjective::new(id.as_str(), description, parent))?;
            Message::ObjectiveAdded(id)
        }
        Entity::ProgramCourse { program, course } => {
            Programs::new(db).assign_course(program, &course)?;
            Message::CourseAssigned(course, program)
        }
        Entity::CourseObjective {
            course,
            objective,
            program,
        } => {
            Courses::new(db).assign_objective(&course, &objective, program)?;
            Message::ObjectiveAssigned(objective, course, program)
        }
        Entity::Evaluation {
            section,
            objective,
            method,
            students_met,
        } => {
            Evaluations::new(db).insert(&SectionEvaluation::new(section, objective, method.as_str(), students_met))?;
            Message::EvaluationRecorded(section, method)
        }
    };
    Ok(message)
}
