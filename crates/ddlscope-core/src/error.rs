//! Error types for DDL parsing and schema conversion.
//!
//! # Error Handling Strategy
//!
//! - [`ParseError`]: the DDL text does not conform to the `CREATE TABLE` grammar.
//!   Carries the furthest line/column the grammar reached so callers can point
//!   at the offending token.
//!
//! - [`DdlError`]: everything a public entry point can fail with. Wraps
//!   [`ParseError`] and adds the model-level failures (missing input, a table
//!   constraint naming an unknown column, an unmappable data type).
//!
//! Unknown data types are reported lazily: parsing accepts any type name and
//! only the BigQuery mapping raises [`DdlError::UnknownType`].

use crate::types::Dialect;
use std::fmt;
use thiserror::Error;

/// Error encountered while parsing DDL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message.
    pub message: String,
    /// Line/column where the grammar gave up, if known.
    pub position: Option<Position>,
    /// The source dialect being parsed when the error occurred.
    pub dialect: Option<Dialect>,
    /// The specific category of parse error.
    pub kind: ParseErrorKind,
}

/// Position information for a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, counted in characters).
    pub column: usize,
}

impl Position {
    /// Converts a byte offset into `text` to a 1-indexed line/column pair.
    ///
    /// Offsets past the end clamp to the end of input; offsets inside a
    /// multi-byte character clamp to that character's start.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &text[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

/// Category of parse error for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorKind {
    /// Unexpected token or character in input.
    #[default]
    SyntaxError,
    /// Missing required clause or keyword.
    MissingClause,
    /// Input ended before the statement was complete.
    UnexpectedEof,
    /// More than one `CREATE TABLE` statement in a single input.
    MultipleStatements,
}

impl ParseError {
    /// Creates a new parse error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
            dialect: None,
            kind: ParseErrorKind::SyntaxError,
        }
    }

    /// Creates a parse error with position information.
    pub fn with_position(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            position: Some(Position { line, column }),
            dialect: None,
            kind: ParseErrorKind::SyntaxError,
        }
    }

    /// Creates a parse error located at a byte offset of `text`.
    pub fn at_offset(message: impl Into<String>, text: &str, offset: usize) -> Self {
        let Position { line, column } = Position::from_offset(text, offset);
        Self::with_position(message, line, column)
    }

    /// Adds dialect context to the error.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Sets the error kind.
    pub fn with_kind(mut self, kind: ParseErrorKind) -> Self {
        self.kind = kind;
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error")?;

        if let Some(dialect) = self.dialect {
            write!(f, " ({dialect})")?;
        }

        if let Some(pos) = self.position {
            write!(f, " at line {}, column {}", pos.line, pos.column)?;
        }

        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Errors returned by the public parsing and conversion API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DdlError {
    /// No DDL text was supplied.
    #[error("DDL is not specified")]
    MissingInput,

    /// The DDL text does not conform to the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A table-level constraint references a column the table does not define.
    #[error("{constraint} constraint references unknown column '{column}'")]
    UnknownColumn { column: String, constraint: String },

    /// A column's data type has no BigQuery equivalent.
    #[error("unknown data type: '{data_type}'")]
    UnknownType { data_type: String },
}

impl DdlError {
    pub(crate) fn unknown_column(column: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
            constraint: constraint.into(),
        }
    }

    pub(crate) fn unknown_type(data_type: impl Into<String>) -> Self {
        Self::UnknownType {
            data_type: data_type.into(),
        }
    }
}
