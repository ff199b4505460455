#[cfg(test)]
mod tests {
    use curricula::db::courses::{Course, Courses};
    use curricula::db::db::Db;
    use curricula::db::departments::{Department, Departments};
    use curricula::db::evaluations::{Evaluations, SectionEvaluation};
    use curricula::db::faculty::{FacultyMembers, NewFaculty, Rank};
    use curricula::db::objectives::{LearningObjective, Objectives};
    use curricula::db::sections::{NewSection, Sections};
    use curricula::libs::error::Constraint;
    use curricula::libs::term::{Semester, SemesterTerm};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct EvaluationTestContext {
        _temp_dir: TempDir,
        db: Db,
        instructor_id: i64,
        section_id: i64,
    }

    impl TestContext for EvaluationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let mut db = Db::open(temp_dir.path().join("test.db")).unwrap();

            Departments::new(&mut db)
                .insert(&Department::new("Lyle School of Engineering", "ENG"))
                .unwrap();
            let instructor_id = FacultyMembers::new(&mut db)
                .insert(&NewFaculty::new("Ada Lovelace", "ada@example.edu", Rank::Full, "ENG"))
                .unwrap();
            Courses::new(&mut db)
                .insert(&Course::new("ENG1000", "Intro to CS", None, "ENG"))
                .unwrap();
            Objectives::new(&mut db)
                .insert(&LearningObjective::new("L1", "Writing", None))
                .unwrap();
            let term = SemesterTerm {
                semester: Semester::Fall,
                year: 23,
            };
            let section_id = Sections::new(&mut db)
                .insert(&NewSection::new(1, term, "ENG1000", instructor_id, 20))
                .unwrap();

            EvaluationTestContext {
                _temp_dir: temp_dir,
                db,
                instructor_id,
                section_id,
            }
        }
    }

    #[test_context(EvaluationTestContext)]
    #[test]
    fn test_section_round_trip(ctx: &mut EvaluationTestContext) {
        let sections = Sections::new(&mut ctx.db);
        let section = sections.get(ctx.section_id).unwrap().unwrap();

        assert_eq!(section.number, 1);
        assert_eq!(section.term().to_string(), "Fall 23");
        assert_eq!(section.instructor_id, ctx.instructor_id);
        assert_eq!(section.enrollment_count, 20);
        assert_eq!(sections.list_for_course("ENG1000").unwrap(), vec![section]);
    }

    #[test_context(EvaluationTestContext)]
    #[test]
    fn test_section_with_unknown_references_rejected(ctx: &mut EvaluationTestContext) {
        let term: SemesterTerm = "Spring 24".parse().unwrap();
        let mut sections = Sections::new(&mut ctx.db);

        let err = sections
            .insert(&NewSection::new(2, term, "ENG9999", ctx.instructor_id, 10))
            .unwrap_err();
        assert_eq!(err.as_integrity().map(|e| e.constraint), Some(Constraint::ForeignKey));

        let err = sections.insert(&NewSection::new(2, term, "ENG1000", 999, 10)).unwrap_err();
        assert_eq!(err.as_integrity().map(|e| e.constraint), Some(Constraint::ForeignKey));

        assert_eq!(sections.list_for_course("ENG1000").unwrap().len(), 1);
    }

    #[test_context(EvaluationTestContext)]
    #[test]
    fn test_evaluation_recorded(ctx: &mut EvaluationTestContext) {
        let section_id = ctx.section_id;
        let mut evaluations = Evaluations::new(&mut ctx.db);
        evaluations
            .insert(&SectionEvaluation::new(section_id, "L1", "Exam", 18))
            .unwrap();
        evaluations
            .insert(&SectionEvaluation::new(section_id, "L1", "Essay", 20))
            .unwrap();

        let recorded = evaluations.list_for_section(section_id).unwrap();
        assert_eq!(recorded.len(), 2);
        assert!(recorded.contains(&SectionEvaluation::new(section_id, "L1", "Exam", 18)));
    }

    #[test_context(EvaluationTestContext)]
    #[test]
    fn test_students_met_above_enrollment_rejected(ctx: &mut EvaluationTestContext) {
        let section_id = ctx.section_id;
        let mut evaluations = Evaluations::new(&mut ctx.db);
        let err = evaluations
            .insert(&SectionEvaluation::new(section_id, "L1", "Exam", 21))
            .unwrap_err();

        assert_eq!(
            err.as_integrity().map(|e| e.constraint),
            Some(Constraint::StudentsMetExceedsEnrollment)
        );
        assert!(evaluations.list_for_section(section_id).unwrap().is_empty());
    }

    #[test_context(EvaluationTestContext)]
    #[test]
    fn test_duplicate_measurement_rejected(ctx: &mut EvaluationTestContext) {
        let section_id = ctx.section_id;
        let mut evaluations = Evaluations::new(&mut ctx.db);
        evaluations
            .insert(&SectionEvaluation::new(section_id, "L1", "Exam", 18))
            .unwrap();
        let err = evaluations
            .insert(&SectionEvaluation::new(section_id, "L1", "Exam", 10))
            .unwrap_err();

        assert_eq!(err.as_integrity().map(|e| e.constraint), Some(Constraint::Unique));
        assert_eq!(evaluations.list_for_section(section_id).unwrap()[0].students_met, 18);
    }

    #[test_context(EvaluationTestContext)]
    #[test]
    fn test_evaluation_with_unknown_references_rejected(ctx: &mut EvaluationTestContext) {
        let section_id = ctx.section_id;
        let mut evaluations = Evaluations::new(&mut ctx.db);

        let err = evaluations
            .insert(&SectionEvaluation::new(section_id + 1, "L1", "Exam", 1))
            .unwrap_err();
        assert_eq!(err.as_integrity().map(|e| e.constraint), Some(Constraint::ForeignKey));

        let err = evaluations
            .insert(&SectionEvaluation::new(section_id, "L9", "Exam", 1))
            .unwrap_err();
        assert_eq!(err.as_integrity().map(|e| e.constraint), Some(Constraint::ForeignKey));
    }
}
