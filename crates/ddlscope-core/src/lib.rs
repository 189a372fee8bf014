pub mod convert;
pub mod error;
pub mod mapping;
pub mod model;
pub mod parser;
mod render;
pub mod types;

// Re-export main types and functions
pub use convert::convert;
pub use error::{DdlError, ParseError, ParseErrorKind, Position};
pub use model::{
    Column, ColumnMap, ConstraintKind, ForeignKeyReference, Length, ReferentialAction, Table,
    TableConstraint,
};
pub use parser::{parse_ddl, DdlParser};

// Re-export types explicitly
pub use types::{
    BigQueryField, ConvertOptions, ConvertRequest, ConvertResult, Dialect, LegacyType, Mode,
    NameCase, OutputKind,
};
