//! Table-level constraints and their resolution onto columns.

use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

use super::ColumnMap;
use crate::error::DdlError;
#[cfg(feature = "tracing")]
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    NotNull,
    ForeignKey,
}

impl ConstraintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::Unique => "UNIQUE",
            Self::NotNull => "NOT NULL",
            Self::ForeignKey => "FOREIGN KEY",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferentialAction {
    Restrict,
    Cascade,
    SetNull,
    NoAction,
}

/// Target of a `FOREIGN KEY ... REFERENCES` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyReference {
    /// Referenced table, schema-qualified when written that way
    pub table: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ReferentialAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ReferentialAction>,
}

/// A constraint declared as its own item in the table body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableConstraint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub kind: ConstraintKind,
    pub columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<ForeignKeyReference>,
}

/// Applies table-level constraints onto the referenced columns, in order.
///
/// Flags are only ever set, never cleared. Foreign keys leave the columns
/// untouched but must still name existing columns.
pub(crate) fn resolve(
    columns: &mut ColumnMap,
    constraints: &[TableConstraint],
) -> Result<(), DdlError> {
    for constraint in constraints {
        for name in &constraint.columns {
            let column = columns
                .get_mut(name)
                .ok_or_else(|| DdlError::unknown_column(name, constraint.kind.as_str()))?;

            match constraint.kind {
                ConstraintKind::PrimaryKey => column.set_primary_key(true),
                ConstraintKind::Unique => column.set_unique(true),
                ConstraintKind::NotNull => column.set_not_null(true),
                ConstraintKind::ForeignKey => {}
            }

            #[cfg(feature = "tracing")]
            trace!(column = column.name(), constraint = %constraint.kind, "applied table constraint");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    fn columns() -> ColumnMap {
        let mut columns = ColumnMap::new();
        columns.insert(Column::new("Col_01", "int"));
        columns.insert(Column::new("Col_02", "int"));
        columns
    }

    fn constraint(kind: ConstraintKind, names: &[&str]) -> TableConstraint {
        TableConstraint {
            name: None,
            kind,
            columns: names.iter().map(|n| n.to_string()).collect(),
            references: None,
        }
    }

    #[test]
    fn primary_key_sets_not_null() {
        let mut cols = columns();
        resolve(&mut cols, &[constraint(ConstraintKind::PrimaryKey, &["COL_01"])]).unwrap();
        assert!(cols["col_01"].primary_key());
        assert!(cols["col_01"].not_null());
        assert!(!cols["col_02"].not_null());
    }

    #[test]
    fn flags_are_monotonic() {
        let mut cols = columns();
        resolve(
            &mut cols,
            &[
                constraint(ConstraintKind::Unique, &["col_02"]),
                constraint(ConstraintKind::NotNull, &["col_02"]),
                constraint(ConstraintKind::Unique, &["col_02"]),
            ],
        )
        .unwrap();
        assert!(cols["col_02"].unique());
        assert!(cols["col_02"].not_null());
        assert_eq!(cols["col_02"].constraint(), "NOT NULL UNIQUE");
    }

    #[test]
    fn foreign_key_leaves_flags_alone() {
        let mut cols = columns();
        resolve(&mut cols, &[constraint(ConstraintKind::ForeignKey, &["col_01"])]).unwrap();
        assert_eq!(cols["col_01"].constraint(), "");
    }

    #[test]
    fn unknown_column_is_error() {
        let mut cols = columns();
        let err = resolve(&mut cols, &[constraint(ConstraintKind::NotNull, &["col_09"])])
            .unwrap_err();
        assert_eq!(err, DdlError::unknown_column("col_09", "NOT NULL"));
    }
}
