#![allow(dead_code)]

use ddlscope_core::{Column, NameCase, Table};

/// Compact JSON of a scalar BigQuery field, as the converter renders it.
pub fn field(name: &str, field_type: &str, mode: &str) -> String {
    format!(r#"{{"name":"{name}","type":"{field_type}","mode":"{mode}"}}"#)
}

pub fn field_jsons(table: &Table, case: NameCase) -> Vec<String> {
    table
        .columns()
        .iter()
        .map(|column| column.to_bigquery_field(case).unwrap())
        .collect()
}

/// `(type, length, scale)` of every column, lengths rendered with `Length`'s display.
pub fn type_summary(table: &Table) -> Vec<(String, Option<String>, Option<u32>)> {
    table
        .columns()
        .iter()
        .map(|column: &Column| {
            (
                column.data_type().to_string(),
                column.length().map(|length| length.to_string()),
                column.scale(),
            )
        })
        .collect()
}

pub fn constraints(table: &Table) -> Vec<String> {
    table.columns().iter().map(Column::constraint).collect()
}
