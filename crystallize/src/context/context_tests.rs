//! Comprehensive tests for the context module.

#[cfg(test)]
mod tests {
    use crate::context::FrozenContext;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_then_get() {
        let mut ctx = FrozenContext::new();
        ctx.add("embed_dim", 512).unwrap();

        assert_eq!(ctx.get("embed_dim").unwrap(), &serde_json::json!(512));
        assert!(ctx.contains_key("embed_dim"));
        assert!(!ctx.contains_key("other"));
    }

    #[test]
    fn test_add_existing_key_fails_and_preserves_value() {
        let mut ctx = FrozenContext::new();
        ctx.add("lr", 1e-4).unwrap();

        let err = ctx.add("lr", 5e-5).unwrap_err();
        assert_eq!(err.key, "lr");
        assert_eq!(ctx.get("lr").unwrap(), &serde_json::json!(1e-4));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_override_replaces_present_key() {
        let mut ctx = FrozenContext::new();
        ctx.add("step", "train").unwrap();

        ctx.override_entry("step", "hpo");
        assert_eq!(ctx.get("step").unwrap(), &serde_json::json!("hpo"));
    }

    #[test]
    fn test_override_absent_key_behaves_like_add() {
        let mut ctx = FrozenContext::new();
        ctx.override_entry("step", "hpo");

        assert_eq!(ctx.get("step").unwrap(), &serde_json::json!("hpo"));
        assert_eq!(ctx.keys(), vec!["step".to_string()]);
    }

    #[test]
    fn test_override_entries_bulk() {
        let mut ctx = FrozenContext::new();
        ctx.add("step", "train").unwrap();

        ctx.override_entries([
            ("step", serde_json::json!("hpo")),
            ("param_space", serde_json::json!({"lr": [1e-4, 5e-5]})),
        ]);

        assert_eq!(ctx.get("step").unwrap(), &serde_json::json!("hpo"));
        assert_eq!(
            ctx.get("param_space").unwrap(),
            &serde_json::json!({"lr": [1e-4, 5e-5]})
        );
    }

    #[test]
    fn test_get_missing_key() {
        let ctx = FrozenContext::new();
        let err = ctx.get("absent").unwrap_err();
        assert_eq!(err.key, "absent");
    }

    #[test]
    fn test_get_as_typed() {
        let mut ctx = FrozenContext::new();
        ctx.add("replicates", 10).unwrap();
        ctx.add("dataset", "cifar10").unwrap();

        assert_eq!(ctx.get_as::<u32>("replicates").unwrap(), 10);
        assert_eq!(ctx.get_as::<String>("dataset").unwrap(), "cifar10");
    }

    #[test]
    fn test_get_as_wrong_type_fails() {
        let mut ctx = FrozenContext::new();
        ctx.add("dataset", "cifar10").unwrap();

        assert!(ctx.get_as::<u32>("dataset").is_err());
    }

    #[test]
    fn test_from_entries() {
        let ctx = FrozenContext::from_entries([
            ("a", serde_json::json!(1)),
            ("b", serde_json::json!(2)),
        ])
        .unwrap();

        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.keys(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_from_entries_duplicate_key_fails() {
        let result = FrozenContext::from_entries([
            ("a", serde_json::json!(1)),
            ("a", serde_json::json!(2)),
        ]);

        let err = result.unwrap_err();
        assert_eq!(err.key, "a");
    }

    #[test]
    fn test_keys_preserve_insertion_order() {
        let mut ctx = FrozenContext::new();
        ctx.add("c", 1).unwrap();
        ctx.add("a", 2).unwrap();
        ctx.add("b", 3).unwrap();

        assert_eq!(
            ctx.keys(),
            vec!["c".to_string(), "a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_override_keeps_original_key_position() {
        let mut ctx = FrozenContext::new();
        ctx.add("a", 1).unwrap();
        ctx.add("b", 2).unwrap();

        ctx.override_entry("a", 3);
        assert_eq!(ctx.keys(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_to_dict() {
        let mut ctx = FrozenContext::new();
        ctx.add("a", 1).unwrap();
        ctx.add("b", 2).unwrap();

        let dict = ctx.to_dict();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("a"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn test_empty_context() {
        let ctx = FrozenContext::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.len(), 0);
        assert!(ctx.keys().is_empty());
    }
}
