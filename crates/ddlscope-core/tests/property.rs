use ddlscope_core::{parse_ddl, Mode, NameCase};
use proptest::prelude::*;

const TYPES: &[&str] = &["int", "varchar(10)", "numeric(12, 2)", "date", "bool", "text"];

fn column_name() -> impl Strategy<Value = String> {
    "[cC]_[A-Za-z0-9_]{0,10}"
}

proptest! {
    #[test]
    fn column_lookup_ignores_case(name in column_name(), type_index in 0..TYPES.len()) {
        let ddl = format!("CREATE TABLE t ({name} {})", TYPES[type_index]);
        let table = parse_ddl(&ddl, None).unwrap();

        prop_assert!(table.columns().contains(&name.to_lowercase()));
        prop_assert!(table.columns().contains(&name.to_uppercase()));
        prop_assert_eq!(table.columns()[name.as_str()].name(), name.as_str());
    }

    #[test]
    fn name_case_is_idempotent(name in column_name()) {
        for case in [NameCase::Lower, NameCase::Upper] {
            let once = case.apply(&name);
            prop_assert_eq!(case.apply(&once), once.clone());
        }
        prop_assert_eq!(NameCase::Original.apply(&name), name);
    }

    #[test]
    fn primary_key_columns_are_required(
        names in proptest::collection::btree_set("k_[a-z0-9_]{0,6}", 1..6),
        pk_count in 1usize..6,
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let keys = &names[..pk_count.min(names.len())];
        let ddl = format!(
            "CREATE TABLE t ({}, PRIMARY KEY ({}))",
            names.iter().map(|n| format!("{n} int")).collect::<Vec<_>>().join(", "),
            keys.join(", "),
        );
        let table = parse_ddl(&ddl, None).unwrap();

        for column in table.columns() {
            prop_assert!(!column.primary_key() || column.not_null());
            let is_key = keys.contains(&column.name().to_string());
            prop_assert_eq!(column.primary_key(), is_key);
            let expected = if is_key { Mode::Required } else { Mode::Nullable };
            prop_assert_eq!(column.bigquery_mode(), expected);
        }
    }

    #[test]
    fn arrays_are_always_repeated(dimensions in 1usize..5, not_null in any::<bool>()) {
        let ddl = format!(
            "CREATE TABLE t (a integer{}{})",
            "[]".repeat(dimensions),
            if not_null { " NOT NULL" } else { "" },
        );
        let table = parse_ddl(&ddl, None).unwrap();
        let column = &table.columns()["a"];

        prop_assert_eq!(column.array_dimensional(), dimensions);
        prop_assert_eq!(column.bigquery_mode(), Mode::Repeated);

        let field = column.bigquery_field(NameCase::Original).unwrap();
        let mut depth = 1;
        let mut current = &field;
        while let Some(inner) = current.fields.first() {
            prop_assert_eq!(inner.mode, Mode::Repeated);
            depth += 1;
            current = inner;
        }
        prop_assert_eq!(depth, dimensions);
    }

    #[test]
    fn arbitrary_input_never_panics(input in "\\PC{0,80}") {
        let _ = parse_ddl(&input, None);
    }
}
