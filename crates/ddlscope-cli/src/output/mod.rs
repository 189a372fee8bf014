//! Output formatting modules.

pub mod json;
pub mod table;

pub use json::{format_fields, format_json};
pub use table::format_table;

use ddlscope_core::Table;
use serde::Serialize;

/// A successfully parsed input.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedTable {
    pub source: String,
    pub table: Table,
}
