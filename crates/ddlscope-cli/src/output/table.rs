//! Human-readable table output formatting.

use ddlscope_core::{Column, NameCase, Table};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::fmt::Write;

use super::ConvertedTable;

/// Format the converted tables as a human-readable column summary with
/// optional colors.
///
/// Columns whose type has no BigQuery mapping are listed with `?` and, unless
/// `quiet`, a warning line underneath.
pub fn format_table(
    tables: &[ConvertedTable],
    case: NameCase,
    quiet: bool,
    use_colors: bool,
) -> String {
    let colored = use_colors && std::io::stdout().is_terminal();
    let mut out = String::new();

    for (index, converted) in tables.iter().enumerate() {
        if index > 0 {
            writeln!(out).unwrap();
        }
        write_header(&mut out, converted, case, colored);
        write_columns(&mut out, &converted.table, case, quiet, colored);
    }

    out
}

fn write_header(out: &mut String, converted: &ConvertedTable, case: NameCase, colored: bool) {
    let table = &converted.table;
    let mut title = match table.get_schema(case) {
        Some(schema) => format!("{schema}.{}", table.get_name(case)),
        None => table.get_name(case),
    };
    if table.is_temp() {
        title.push_str(" (temporary)");
    }
    let line = "═".repeat(50);

    if colored {
        writeln!(out, "{}", title.bold()).unwrap();
        writeln!(out, "{}", line.dimmed()).unwrap();
    } else {
        writeln!(out, "{title}").unwrap();
        writeln!(out, "{line}").unwrap();
    }

    writeln!(out, "Source: {}", converted.source).unwrap();
    if let Some(dialect) = table.source_dialect() {
        writeln!(out, "Dialect: {dialect}").unwrap();
    }
    writeln!(out).unwrap();
}

struct Row {
    name: String,
    source_type: String,
    target: Option<String>,
    constraint: String,
    description: Option<String>,
}

fn write_columns(out: &mut String, table: &Table, case: NameCase, quiet: bool, colored: bool) {
    let rows: Vec<Row> = table
        .columns()
        .iter()
        .map(|column| Row {
            name: column.get_name(case),
            source_type: source_type(column),
            target: column
                .bigquery_data_type()
                .ok()
                .map(|legacy| format!("{legacy} {}", column.bigquery_mode())),
            constraint: column.constraint(),
            description: column.description().map(str::to_string),
        })
        .collect();

    let heading = format!("Columns ({}):", rows.len());
    if colored {
        writeln!(out, "{}", heading.bold()).unwrap();
    } else {
        writeln!(out, "{heading}").unwrap();
    }

    let name_width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    let type_width = rows
        .iter()
        .map(|r| r.source_type.chars().count())
        .max()
        .unwrap_or(0);

    for row in &rows {
        let target = match &row.target {
            Some(target) if colored => target.cyan().to_string(),
            Some(target) => target.clone(),
            None if colored => "?".red().to_string(),
            None => "?".to_string(),
        };
        let mut line = format!(
            "  {:<name_width$}  {:<type_width$}  -> {target}",
            row.name, row.source_type
        );
        if !row.constraint.is_empty() {
            write!(line, "  [{}]", row.constraint).unwrap();
        }
        if let Some(description) = &row.description {
            write!(line, "  \"{description}\"").unwrap();
        }
        writeln!(out, "{}", line.trim_end()).unwrap();

        if row.target.is_none() && !quiet {
            let warning = format!("    warning: no BigQuery type for {}", row.source_type);
            if colored {
                writeln!(out, "{}", warning.yellow()).unwrap();
            } else {
                writeln!(out, "{warning}").unwrap();
            }
        }
    }

    let foreign_keys: Vec<_> = table.foreign_keys().collect();
    if !foreign_keys.is_empty() {
        writeln!(out).unwrap();
        writeln!(out, "Foreign keys:").unwrap();
        for fk in foreign_keys {
            let target = fk
                .references
                .as_ref()
                .map(|r| format!(" -> {}({})", r.table, r.columns.join(", ")))
                .unwrap_or_default();
            writeln!(out, "  ({}){target}", fk.columns.join(", ")).unwrap();
        }
    }
}

/// Source type as declared, e.g. `NUMERIC(18,2)` or `INTEGER[][]`.
fn source_type(column: &Column) -> String {
    let mut rendered = column.data_type().to_string();
    match (column.length(), column.scale()) {
        (Some(length), Some(scale)) => write!(rendered, "({length},{scale})").unwrap(),
        (Some(length), None) => write!(rendered, "({length})").unwrap(),
        _ => {}
    }
    if column.is_unsigned() {
        rendered.push_str(" UNSIGNED");
    }
    rendered.push_str(&"[]".repeat(column.array_dimensional()));
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddlscope_core::{parse_ddl, Dialect};

    fn converted(ddl: &str, dialect: Option<Dialect>) -> ConvertedTable {
        ConvertedTable {
            source: "schema.sql".to_string(),
            table: parse_ddl(ddl, dialect).unwrap(),
        }
    }

    #[test]
    fn test_format_table_basic() {
        let tables = [converted(
            "CREATE TEMP TABLE s.users (id numeric(10, 2) PRIMARY KEY COMMENT 'key', tags text[])",
            Some(Dialect::Postgresql),
        )];
        let output = format_table(&tables, NameCase::Original, false, false);

        assert!(output.contains("s.users (temporary)"));
        assert!(output.contains("Source: schema.sql"));
        assert!(output.contains("Dialect: postgresql"));
        assert!(output.contains("Columns (2):"));
        assert!(output.contains("NUMERIC(10,2)  -> FLOAT REQUIRED  [PRIMARY KEY]  \"key\""));
        assert!(output.contains("TEXT[]"));
        assert!(output.contains("-> STRING REPEATED"));
    }

    #[test]
    fn test_format_table_quiet_hides_warnings() {
        let tables = [converted("CREATE TABLE t (g geometry)", None)];

        let verbose = format_table(&tables, NameCase::Upper, false, false);
        let quiet = format_table(&tables, NameCase::Upper, true, false);

        assert!(verbose.contains("warning: no BigQuery type for GEOMETRY"));
        assert!(!quiet.contains("warning"));
        assert!(quiet.contains("G  GEOMETRY  -> ?"));
    }

    #[test]
    fn test_format_table_foreign_keys() {
        let tables = [converted(
            "CREATE TABLE o (u int, FOREIGN KEY (u) REFERENCES users (id))",
            None,
        )];
        let output = format_table(&tables, NameCase::Original, false, false);
        assert!(output.contains("Foreign keys:\n  (u) -> users(id)"));
    }
}
