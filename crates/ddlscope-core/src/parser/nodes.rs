//! Parse-tree nodes produced by the `CREATE TABLE` grammar.

use crate::model::{Length, TableConstraint};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    pub temp: bool,
    pub schema: Option<String>,
    pub name: String,
    pub items: Vec<TableItem>,
}

/// One entry of the parenthesized table body. Comments and index
/// declarations are dropped by the grammar and never become items.
#[derive(Debug, Clone, PartialEq)]
pub enum TableItem {
    Column(ColumnDef),
    Constraint(TableConstraint),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: TypeSpec,
    pub attributes: ColumnAttributes,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeSpec {
    /// Type name words as written, e.g. `["character", "VARYING"]`.
    pub words: Vec<String>,
    pub length: Option<Length>,
    /// Raw scale; zero is kept here and dropped by the model.
    pub scale: Option<u32>,
    pub unsigned: bool,
    pub zerofill: bool,
    pub array_dimensional: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullability {
    NotNull,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMarker {
    Primary,
    Unique,
}

/// The free-order attribute clause following a column type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnAttributes {
    pub nullability: Option<Nullability>,
    pub auto_increment: bool,
    pub key: Option<KeyMarker>,
    pub default: Option<String>,
    pub comment: Option<String>,
    pub encode: Option<String>,
    pub distkey: bool,
    pub sortkey: bool,
    pub character_set: Option<String>,
}
