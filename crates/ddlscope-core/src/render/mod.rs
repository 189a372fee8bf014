//! BigQuery schema rendering.
//!
//! - [`fields`]: JSON field lists, with multi-dimensional arrays flattened
//!   into nested `RECORD`s.
//! - [`ddl`]: standard SQL `CREATE TABLE` statements.

mod ddl;
mod fields;

pub(crate) use ddl::table_ddl;
pub(crate) use fields::column_field;

use serde::Serialize;

/// Compact JSON with non-ASCII text left as-is.
pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).expect("serialization cannot fail")
}
