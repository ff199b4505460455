#[cfg(test)]
mod tests {
    use curricula::db::db::{Db, DB_FILE_NAME};
    use curricula::libs::config::{Config, CONFIG_FILE_NAME};
    use curricula::libs::data_storage::DataStorage;
    use curricula::libs::error::Error;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            ConfigTestContext { temp_dir }
        }
    }

    impl ConfigTestContext {
        fn config_path(&self) -> PathBuf {
            self.temp_dir.path().join(CONFIG_FILE_NAME)
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_config_is_default(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.database.path.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_config_save_and_read(ctx: &mut ConfigTestContext) {
        let db_path = ctx.temp_dir.path().join("accreditation.db");
        let config = Config::with_database_path(&db_path);
        config.save_to(&ctx.config_path()).unwrap();

        let loaded = Config::read_from(&ctx.config_path()).unwrap();
        assert_eq!(loaded.database.path, Some(db_path));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_empty_object_uses_defaults(ctx: &mut ConfigTestContext) {
        fs::write(ctx.config_path(), "{}").unwrap();
        assert_eq!(Config::read_from(&ctx.config_path()).unwrap(), Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_config_rejected(ctx: &mut ConfigTestContext) {
        fs::write(ctx.config_path(), "{ not json").unwrap();
        let err = Config::read_from(&ctx.config_path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_database_path_resolution(ctx: &mut ConfigTestContext) {
        let storage = DataStorage::at(ctx.temp_dir.path().join("data"));

        let default = Config::default().resolve_database_path(None, &storage).unwrap();
        assert_eq!(default, ctx.temp_dir.path().join("data").join(DB_FILE_NAME));
        assert!(ctx.temp_dir.path().join("data").is_dir());

        let configured = Config::with_database_path("/srv/curricula.db");
        assert_eq!(
            configured.resolve_database_path(None, &storage).unwrap(),
            PathBuf::from("/srv/curricula.db")
        );
        assert_eq!(
            configured.resolve_database_path(Some("  "), &storage).unwrap(),
            PathBuf::from("/srv/curricula.db")
        );
        assert_eq!(
            configured.resolve_database_path(Some("override.db"), &storage).unwrap(),
            PathBuf::from("override.db")
        );
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_open_from_config(ctx: &mut ConfigTestContext) {
        let db_path = ctx.temp_dir.path().join("configured.db");
        let storage = DataStorage::at(ctx.temp_dir.path());
        let config = Config::with_database_path(&db_path);

        let path = config.resolve_database_path(None, &storage).unwrap();
        let db = Db::open(&path).unwrap();
        assert!(db_path.exists());
        assert!(db.schema_version().unwrap() > 0);
    }
}
