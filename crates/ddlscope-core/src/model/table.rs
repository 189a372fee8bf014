use schemars::JsonSchema;
use serde::Serialize;

use super::constraints::{self, ConstraintKind, TableConstraint};
use super::{Column, ColumnMap};
use crate::error::DdlError;
use crate::parser::nodes::{CreateTableStatement, TableItem};
use crate::render;
use crate::types::{BigQueryField, Dialect, NameCase};

/// A parsed `CREATE TABLE` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<String>,
    name: String,
    is_temp: bool,
    #[schemars(with = "Vec<Column>")]
    columns: ColumnMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    constraints: Vec<TableConstraint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_dialect: Option<Dialect>,
}

impl Table {
    pub(crate) fn from_statement(
        statement: CreateTableStatement,
        dialect: Option<Dialect>,
    ) -> Result<Self, DdlError> {
        let mut columns = ColumnMap::new();
        let mut table_constraints = Vec::new();
        for item in statement.items {
            match item {
                TableItem::Column(definition) => {
                    columns.insert(Column::from_definition(definition, dialect));
                }
                TableItem::Constraint(constraint) => table_constraints.push(constraint),
            }
        }
        constraints::resolve(&mut columns, &table_constraints)?;

        Ok(Self {
            schema: statement.schema,
            name: statement.name,
            is_temp: statement.temp,
            columns,
            constraints: table_constraints,
            source_dialect: dialect,
        })
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_name(&self, case: NameCase) -> String {
        case.apply(&self.name)
    }

    pub fn get_schema(&self, case: NameCase) -> Option<String> {
        self.schema.as_deref().map(|schema| case.apply(schema))
    }

    pub fn is_temp(&self) -> bool {
        self.is_temp
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut ColumnMap {
        &mut self.columns
    }

    /// Table-level constraint items in declaration order.
    pub fn constraints(&self) -> &[TableConstraint] {
        &self.constraints
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = &TableConstraint> {
        self.constraints
            .iter()
            .filter(|constraint| constraint.kind == ConstraintKind::ForeignKey)
    }

    pub fn source_dialect(&self) -> Option<Dialect> {
        self.source_dialect
    }

    /// Changes the dialect used for type mapping, on the table and every column.
    pub fn set_source_dialect(&mut self, dialect: Option<Dialect>) {
        self.source_dialect = dialect;
        for column in self.columns.iter_mut() {
            column.set_source_dialect(dialect);
        }
    }

    pub fn bigquery_fields(&self, case: NameCase) -> Result<Vec<BigQueryField>, DdlError> {
        self.columns.bigquery_fields(case)
    }

    /// BigQuery JSON schema for all columns.
    pub fn to_bigquery_fields(&self, case: NameCase) -> Result<String, DdlError> {
        self.columns.to_bigquery_fields(case)
    }

    /// BigQuery standard SQL `CREATE TABLE` statement.
    pub fn to_bigquery_ddl(&self, case: NameCase) -> Result<String, DdlError> {
        render::table_ddl(self, case)
    }
}
