use crate::error::DdlError;
use crate::model::{Column, Table};
use crate::types::NameCase;

/// Placeholder project id; the dataset defaults to `dataset` for tables
/// declared without a schema.
const PROJECT: &str = "project";
const DEFAULT_DATASET: &str = "dataset";

/// Renders `table` as a BigQuery standard SQL `CREATE TABLE` statement.
pub(crate) fn table_ddl(table: &Table, case: NameCase) -> Result<String, DdlError> {
    let dataset = table
        .get_schema(case)
        .unwrap_or_else(|| DEFAULT_DATASET.to_string());

    let definitions = table
        .columns()
        .iter()
        .map(|column| column_definition(column, case))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!(
        "#standardSQL\nCREATE TABLE `{PROJECT}.{dataset}.{table}`\n(\n  {columns}\n)",
        table = table.get_name(case),
        columns = definitions.join(",\n  "),
    ))
}

fn column_definition(column: &Column, case: NameCase) -> Result<String, DdlError> {
    let standard_type = column.bigquery_standard_data_type()?;
    let dimensions = column.array_dimensional();

    let mut definition = column.get_name(case);
    definition.push(' ');
    if dimensions == 0 {
        definition.push_str(standard_type);
        if column.not_null() {
            definition.push_str(" NOT NULL");
        }
    } else {
        definition.push_str("ARRAY<");
        for index in 1..dimensions {
            definition.push_str(&format!("STRUCT<dimension_{index} ARRAY<"));
        }
        definition.push_str(standard_type);
        definition.push('>');
        definition.push_str(&">>".repeat(dimensions - 1));
    }

    if let Some(description) = column.description() {
        definition.push_str(&format!(
            " OPTIONS (description = \"{}\")",
            description.replace('"', "\\\"")
        ));
    }
    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_definitions() {
        let mut column = Column::new("Col_01", "bigint");
        column.set_not_null(true);
        assert_eq!(
            column_definition(&column, NameCase::Lower).unwrap(),
            "col_01 INT64 NOT NULL"
        );
    }

    #[test]
    fn array_definitions_never_not_null() {
        let mut column = Column::new("grid", "real").with_array_dimensional(2);
        column.set_not_null(true);
        assert_eq!(
            column_definition(&column, NameCase::Original).unwrap(),
            "grid ARRAY<STRUCT<dimension_1 ARRAY<FLOAT64>>>"
        );
    }

    #[test]
    fn description_quotes_are_escaped() {
        let mut column = Column::new("c", "bool");
        column.set_comment(Some("say \"hi\"".to_string()));
        assert_eq!(
            column_definition(&column, NameCase::Original).unwrap(),
            r#"c BOOL OPTIONS (description = "say \"hi\"")"#
        );
    }
}
