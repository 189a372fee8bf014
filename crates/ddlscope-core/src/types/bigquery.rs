//! BigQuery schema vocabulary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// BigQuery legacy SQL data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum LegacyType {
    String,
    Integer,
    Float,
    Numeric,
    Datetime,
    Timestamp,
    Date,
    Time,
    Boolean,
    Bytes,
    /// Nested struct; only produced for multi-dimensional arrays.
    Record,
}

impl LegacyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::Numeric => "NUMERIC",
            Self::Datetime => "DATETIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Boolean => "BOOLEAN",
            Self::Bytes => "BYTES",
            Self::Record => "RECORD",
        }
    }

    /// Name of this type in BigQuery standard SQL.
    pub fn standard_name(&self) -> &'static str {
        match self {
            Self::Integer => "INT64",
            Self::Float => "FLOAT64",
            Self::Boolean => "BOOL",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for LegacyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// BigQuery column mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Required,
    Nullable,
    Repeated,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "REQUIRED",
            Self::Nullable => "NULLABLE",
            Self::Repeated => "REPEATED",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a BigQuery JSON schema.
///
/// Serializes with keys in `name, type, mode, description, fields` order;
/// `description` and `fields` are omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BigQueryField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: LegacyType,
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<BigQueryField>,
}
