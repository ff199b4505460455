#[cfg(test)]
mod tests {
    use curricula::db::db::Db;
    use curricula::db::departments::{Department, Departments};
    use curricula::db::faculty::{FacultyMembers, NewFaculty, Rank};
    use curricula::db::reports::Reports;
    use curricula::libs::error::Constraint;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct DepartmentTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for DepartmentTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let mut db = Db::open(temp_dir.path().join("test.db")).unwrap();
            Departments::new(&mut db)
                .insert(&Department::new("Lyle School of Engineering", "ENG"))
                .unwrap();
            DepartmentTestContext { _temp_dir: temp_dir, db }
        }
    }

    #[test_context(DepartmentTestContext)]
    #[test]
    fn test_new_department_has_no_programs(ctx: &mut DepartmentTestContext) {
        let programs = Reports::new(&ctx.db)
            .programs_of_department("Lyle School of Engineering")
            .unwrap();
        assert!(programs.is_empty());
    }

    #[test_context(DepartmentTestContext)]
    #[test]
    fn test_department_lookup(ctx: &mut DepartmentTestContext) {
        let mut departments = Departments::new(&mut ctx.db);

        let by_code = departments.get_by_code("ENG").unwrap().unwrap();
        assert_eq!(by_code.name, "Lyle School of Engineering");

        let by_name = departments.get_by_name("Lyle School of Engineering").unwrap();
        assert_eq!(by_name, Some(by_code));

        departments.insert(&Department::new("Business", "BIZ")).unwrap();
        let codes: Vec<String> = departments.list().unwrap().into_iter().map(|d| d.code).collect();
        assert_eq!(codes.len(), 2);
        assert!(codes.contains(&"BIZ".to_string()));
    }

    #[test_context(DepartmentTestContext)]
    #[test]
    fn test_duplicate_department_code_rejected(ctx: &mut DepartmentTestContext) {
        let err = Departments::new(&mut ctx.db)
            .insert(&Department::new("Engineering Annex", "ENG"))
            .unwrap_err();
        assert_eq!(err.as_integrity().map(|e| e.constraint), Some(Constraint::Unique));
    }

    #[test_context(DepartmentTestContext)]
    #[test]
    fn test_duplicate_department_name_rejected(ctx: &mut DepartmentTestContext) {
        let err = Departments::new(&mut ctx.db)
            .insert(&Department::new("Lyle School of Engineering", "LYLE"))
            .unwrap_err();
        assert!(err.is_integrity());
        assert!(Departments::new(&mut ctx.db).get_by_code("LYLE").unwrap().is_none());
    }

    #[test_context(DepartmentTestContext)]
    #[test]
    fn test_department_code_length_checked(ctx: &mut DepartmentTestContext) {
        let err = Departments::new(&mut ctx.db)
            .insert(&Department::new("Mathematics", "MATHS"))
            .unwrap_err();
        assert_eq!(err.as_integrity().map(|e| e.constraint), Some(Constraint::Check));
    }

    #[test_context(DepartmentTestContext)]
    #[test]
    fn test_faculty_round_trip(ctx: &mut DepartmentTestContext) {
        let mut faculty = FacultyMembers::new(&mut ctx.db);
        let id = faculty
            .insert(&NewFaculty::new("Grace Hopper", "grace@example.edu", Rank::Adjunct, "ENG"))
            .unwrap();

        let member = faculty.get(id).unwrap().unwrap();
        assert_eq!(member.name, "Grace Hopper");
        assert_eq!(member.rank, Rank::Adjunct);
        assert_eq!(member.department_code, "ENG");
        assert_eq!(faculty.get_by_email("grace@example.edu").unwrap(), Some(member));
    }

    #[test_context(DepartmentTestContext)]
    #[test]
    fn test_faculty_with_unknown_department_rejected(ctx: &mut DepartmentTestContext) {
        let mut faculty = FacultyMembers::new(&mut ctx.db);
        let err = faculty
            .insert(&NewFaculty::new("Alan Turing", "alan@example.edu", Rank::Full, "XYZ"))
            .unwrap_err();

        assert_eq!(err.as_integrity().map(|e| e.constraint), Some(Constraint::ForeignKey));
        assert!(faculty.get_by_email("alan@example.edu").unwrap().is_none());
    }

    #[test_context(DepartmentTestContext)]
    #[test]
    fn test_duplicate_faculty_email_rejected(ctx: &mut DepartmentTestContext) {
        let mut faculty = FacultyMembers::new(&mut ctx.db);
        faculty
            .insert(&NewFaculty::new("Grace Hopper", "grace@example.edu", Rank::Full, "ENG"))
            .unwrap();
        let err = faculty
            .insert(&NewFaculty::new("G. Hopper", "grace@example.edu", Rank::Associate, "ENG"))
            .unwrap_err();
        assert_eq!(err.as_integrity().map(|e| e.constraint), Some(Constraint::Unique));
    }

    #[test]
    fn test_rank_parsing() {
        assert_eq!("Associate".parse::<Rank>().unwrap(), Rank::Associate);
        assert_eq!(" adjunct ".parse::<Rank>().unwrap(), Rank::Adjunct);
        assert!("emeritus".parse::<Rank>().is_err());
    }
}
