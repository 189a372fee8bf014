//! JSON output formatting.

use anyhow::{Context, Result};
use ddlscope_core::NameCase;
use serde::Serialize;

use super::ConvertedTable;

/// Format the parsed table models as JSON.
///
/// A single input is emitted as one object, several as an array.
pub fn format_json(tables: &[ConvertedTable], compact: bool) -> String {
    match tables {
        [single] => to_json(single, compact),
        many => to_json(many, compact),
    }
}

/// Format each table's BigQuery field list, one JSON document per table.
pub fn format_fields(tables: &[ConvertedTable], case: NameCase, compact: bool) -> Result<String> {
    let documents = tables
        .iter()
        .map(|converted| {
            let fields = converted
                .table
                .bigquery_fields(case)
                .with_context(|| format!("Failed to map {}", converted.source))?;
            Ok(to_json(&fields, compact))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(documents.join("\n"))
}

fn to_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> String {
    if compact {
        serde_json::to_string(value).expect("serialization cannot fail")
    } else {
        serde_json::to_string_pretty(value).expect("serialization cannot fail")
    }
}
