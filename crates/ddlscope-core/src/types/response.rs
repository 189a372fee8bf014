//! Response types for the DDL conversion API.

use schemars::JsonSchema;
use serde::Serialize;

use crate::model::Table;

/// Result of a successful conversion.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResult {
    /// The parsed table model
    pub table: Table,
    /// The rendered artifact (JSON field list or BigQuery DDL)
    pub output: String,
}
