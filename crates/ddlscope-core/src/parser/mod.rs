//! `CREATE TABLE` parsing.
//!
//! [`parse_ddl`] runs the grammar and builds the [`Table`] model, applying
//! table-level constraints onto their columns. [`DdlParser`] wraps the same
//! call for callers that configure the input and dialect separately.

mod attributes;
mod cursor;
mod grammar;
pub(crate) mod nodes;

use crate::error::DdlError;
use crate::model::Table;
use crate::types::Dialect;
#[cfg(feature = "tracing")]
use tracing::debug;

/// Parse a single `CREATE TABLE` statement.
///
/// `dialect` is recorded on the table and its columns; it only influences
/// BigQuery type mapping. Whitespace-only input is reported as
/// [`DdlError::MissingInput`].
pub fn parse_ddl(ddl: &str, dialect: Option<Dialect>) -> Result<Table, DdlError> {
    if ddl.trim().is_empty() {
        return Err(DdlError::MissingInput);
    }

    let statement = grammar::parse_create_table(ddl).map_err(|err| match dialect {
        Some(dialect) => err.with_dialect(dialect),
        None => err,
    })?;
    let table = Table::from_statement(statement, dialect)?;

    #[cfg(feature = "tracing")]
    debug!(
        table = table.name(),
        columns = table.columns().len(),
        constraints = table.constraints().len(),
        "parsed CREATE TABLE"
    );

    Ok(table)
}

/// Stateful parser holding the DDL text and source dialect.
#[derive(Debug, Clone, Default)]
pub struct DdlParser {
    ddl: Option<String>,
    source_dialect: Option<Dialect>,
}

impl DdlParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ddl(mut self, ddl: impl Into<String>) -> Self {
        self.ddl = Some(ddl.into());
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.source_dialect = Some(dialect);
        self
    }

    pub fn ddl(&self) -> Option<&str> {
        self.ddl.as_deref()
    }

    pub fn set_ddl(&mut self, ddl: impl Into<String>) {
        self.ddl = Some(ddl.into());
    }

    pub fn source_dialect(&self) -> Option<Dialect> {
        self.source_dialect
    }

    pub fn set_source_dialect(&mut self, dialect: Option<Dialect>) {
        self.source_dialect = dialect;
    }

    /// Parses the configured DDL; fails with [`DdlError::MissingInput`] if none is set.
    pub fn parse(&self) -> Result<Table, DdlError> {
        let ddl = self.ddl.as_deref().ok_or(DdlError::MissingInput)?;
        parse_ddl(ddl, self.source_dialect)
    }
}
