#[cfg(test)]
mod tests {
    use curricula::db::db::Db;
    use curricula::db::objectives::{LearningObjective, Objectives};
    use curricula::libs::error::Constraint;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ObjectiveTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for ObjectiveTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let mut db = Db::open(temp_dir.path().join("test.db")).unwrap();

            let mut objectives = Objectives::new(&mut db);
            objectives.insert(&LearningObjective::new("L1", "Writing", None)).unwrap();
            objectives
                .insert(&LearningObjective::new("L2", "Grammar", Some("L1".to_string())))
                .unwrap();

            ObjectiveTestContext { _temp_dir: temp_dir, db }
        }
    }

    #[test_context(ObjectiveTestContext)]
    #[test]
    fn test_sub_objective_keeps_parent(ctx: &mut ObjectiveTestContext) {
        let objectives = Objectives::new(&mut ctx.db);

        let l2 = objectives.get("L2").unwrap().unwrap();
        assert_eq!(l2.description, "Grammar");
        assert_eq!(l2.parent_id.as_deref(), Some("L1"));

        let l1 = objectives.get("L1").unwrap().unwrap();
        assert_eq!(l1.parent_id, None);
    }

    #[test_context(ObjectiveTestContext)]
    #[test]
    fn test_self_parent_rejected(ctx: &mut ObjectiveTestContext) {
        let mut objectives = Objectives::new(&mut ctx.db);
        let err = objectives
            .insert(&LearningObjective::new("L3", "X", Some("L3".to_string())))
            .unwrap_err();

        assert_eq!(err.as_integrity().map(|e| e.constraint), Some(Constraint::SelfParent));
        assert!(objectives.get("L3").unwrap().is_none());
    }

    #[test_context(ObjectiveTestContext)]
    #[test]
    fn test_existing_id_as_own_parent_rejected(ctx: &mut ObjectiveTestContext) {
        let mut objectives = Objectives::new(&mut ctx.db);
        let err = objectives
            .insert(&LearningObjective::new("L1", "X", Some("L1".to_string())))
            .unwrap_err();

        assert!(err.is_integrity());
        assert_eq!(objectives.get("L1").unwrap().unwrap().description, "Writing");
    }

    #[test_context(ObjectiveTestContext)]
    #[test]
    fn test_cycle_rejected(ctx: &mut ObjectiveTestContext) {
        let mut objectives = Objectives::new(&mut ctx.db);
        let err = objectives
            .insert(&LearningObjective::new("L1", "Writing again", Some("L2".to_string())))
            .unwrap_err();
        assert_eq!(err.as_integrity().map(|e| e.constraint), Some(Constraint::Cycle));
    }

    #[test_context(ObjectiveTestContext)]
    #[test]
    fn test_missing_parent_rejected(ctx: &mut ObjectiveTestContext) {
        let mut objectives = Objectives::new(&mut ctx.db);
        let err = objectives
            .insert(&LearningObjective::new("L3", "Spelling", Some("L9".to_string())))
            .unwrap_err();

        assert_eq!(err.as_integrity().map(|e| e.constraint), Some(Constraint::ForeignKey));
        assert!(objectives.get("L3").unwrap().is_none());
    }

    #[test_context(ObjectiveTestContext)]
    #[test]
    fn test_duplicate_id_rejected(ctx: &mut ObjectiveTestContext) {
        let err = Objectives::new(&mut ctx.db)
            .insert(&LearningObjective::new("L2", "Punctuation", None))
            .unwrap_err();
        assert_eq!(err.as_integrity().map(|e| e.constraint), Some(Constraint::Unique));
    }

    #[test_context(ObjectiveTestContext)]
    #[test]
    fn test_hierarchy_navigation(ctx: &mut ObjectiveTestContext) {
        let mut objectives = Objectives::new(&mut ctx.db);
        objectives
            .insert(&LearningObjective::new("L3", "Commas", Some("L2".to_string())))
            .unwrap();
        objectives
            .insert(&LearningObjective::new("L4", "Style", Some("L1".to_string())))
            .unwrap();
        objectives.insert(&LearningObjective::new("M1", "Algebra", None)).unwrap();

        let ancestors: Vec<String> = objectives.ancestors("L3").unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(ancestors, vec!["L2", "L1"]);
        assert!(objectives.ancestors("L1").unwrap().is_empty());

        let children: Vec<String> = objectives.children("L1").unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(children, vec!["L2", "L4"]);

        let roots: Vec<String> = objectives.roots().unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(roots, vec!["L1", "M1"]);
    }
}
