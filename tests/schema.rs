#[cfg(test)]
mod tests {
    use curricula::db::db::{Db, IN_MEMORY};
    use curricula::db::departments::{Department, Departments};
    use curricula::db::faculty::{FacultyMembers, NewFaculty, Rank};
    use curricula::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use curricula::db::schema::TABLES_DROP_ORDER;
    use curricula::libs::error::Error;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct SchemaTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for SchemaTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            SchemaTestContext { temp_dir }
        }
    }

    impl SchemaTestContext {
        fn open(&self) -> Db {
            Db::open(self.temp_dir.path().join("test.db")).unwrap()
        }
    }

    fn seed(db: &mut Db) {
        Departments::new(db)
            .insert(&Department::new("Lyle School of Engineering", "ENG"))
            .unwrap();
        FacultyMembers::new(db)
            .insert(&NewFaculty::new("Ada Lovelace", "ada@example.edu", Rank::Full, "ENG"))
            .unwrap();
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_open_defines_schema(ctx: &mut SchemaTestContext) {
        let db = ctx.open();

        let version = get_db_version(&db.conn).unwrap();
        assert_eq!(version, MigrationManager::new().latest_version());
        assert!(!needs_migration(&db.conn).unwrap());

        let counts = db.table_row_counts().unwrap();
        assert_eq!(counts.len(), 9);
        assert!(counts.iter().all(|(_, count)| *count == 0));
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_define_schema_twice_keeps_data(ctx: &mut SchemaTestContext) {
        let mut db = ctx.open();
        seed(&mut db);

        db.define_schema().unwrap();
        db.define_schema().unwrap();

        assert!(Departments::new(&mut db).get_by_code("ENG").unwrap().is_some());
        assert_eq!(db.migration_history().unwrap().len(), MigrationManager::new().latest_version() as usize);
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_reopen_keeps_data(ctx: &mut SchemaTestContext) {
        {
            let mut db = ctx.open();
            seed(&mut db);
        }

        let mut db = ctx.open();
        let faculty = FacultyMembers::new(&mut db).get_by_email("ada@example.edu").unwrap();
        assert_eq!(faculty.map(|f| f.rank), Some(Rank::Full));
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_reset_schema_empties_every_table(ctx: &mut SchemaTestContext) {
        let mut db = ctx.open();
        seed(&mut db);

        db.reset_schema().unwrap();

        let counts = db.table_row_counts().unwrap();
        assert_eq!(counts.len(), TABLES_DROP_ORDER.len());
        for (table, count) in counts {
            assert_eq!(count, 0, "table {} not empty after reset", table);
        }
        assert_eq!(db.schema_version().unwrap(), MigrationManager::new().latest_version());

        // The recreated tables accept new rows.
        seed(&mut db);
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_reset_failure_keeps_previous_schema(ctx: &mut SchemaTestContext) {
        let mut db = ctx.open();
        seed(&mut db);
        db.conn
            .execute_batch(
                "CREATE TABLE extra (code TEXT REFERENCES departments(code));
                 INSERT INTO extra (code) VALUES ('ENG');",
            )
            .unwrap();
        let counts_before = db.table_row_counts().unwrap();
        let version_before = db.schema_version().unwrap();

        let err = db.reset_schema().unwrap_err();
        assert!(matches!(err, Error::Schema(_)), "unexpected error: {}", err);
        assert!(!err.is_integrity());

        assert_eq!(db.table_row_counts().unwrap(), counts_before);
        assert_eq!(db.schema_version().unwrap(), version_before);
        assert!(Departments::new(&mut db).get_by_code("ENG").unwrap().is_some());
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_reset_twice(ctx: &mut SchemaTestContext) {
        let mut db = ctx.open();
        db.reset_schema().unwrap();
        db.reset_schema().unwrap();
        assert!(db.table_row_counts().unwrap().iter().all(|(_, count)| *count == 0));
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_migrations_on_bare_connection(ctx: &mut SchemaTestContext) {
        let mut conn = Db::new_without_migrations(ctx.temp_dir.path().join("bare.db")).unwrap();
        let manager = MigrationManager::new();

        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());

        let applied = manager.run_migrations(&mut conn).unwrap();
        assert_eq!(applied as u32, manager.latest_version());
        assert!(manager.is_migration_applied(&conn, manager.latest_version()).unwrap());
        assert!(!manager.is_migration_applied(&conn, manager.latest_version() + 1).unwrap());
        assert_eq!(manager.run_migrations(&mut conn).unwrap(), 0);

        let history = manager.get_migration_history(&conn).unwrap();
        for (i, (version, _, _)) in history.iter().enumerate() {
            assert_eq!(*version as usize, i + 1);
        }
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_location(ctx: &mut SchemaTestContext) {
        let db = ctx.open();
        assert!(db.location().ends_with("test.db"));
        assert_eq!(Db::open_in_memory().unwrap().location(), IN_MEMORY);
    }

    #[test]
    fn test_in_memory_session() {
        let mut db = Db::open_in_memory().unwrap();
        seed(&mut db);
        assert!(db.table_row_counts().unwrap().contains(&("faculty", 1)));
    }
}
