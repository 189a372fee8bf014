//! Table model built from a parsed `CREATE TABLE` statement.

mod column;
mod columns;
mod constraints;
mod table;

pub use column::{Column, Length};
pub use columns::ColumnMap;
pub use constraints::{ConstraintKind, ForeignKeyReference, ReferentialAction, TableConstraint};
pub use table::Table;
