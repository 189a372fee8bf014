use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Serialize, Serializer};

use crate::error::DdlError;
use crate::mapping;
use crate::parser::nodes::{ColumnDef, KeyMarker, Nullability};
use crate::render;
use crate::types::{BigQueryField, Dialect, LegacyType, Mode, NameCase};

/// Declared length/precision of a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Length {
    Value(u32),
    /// Oracle's `*` precision, as in `NUMBER(*, 2)`.
    Any,
}

impl Length {
    pub fn value(&self) -> Option<u32> {
        match self {
            Self::Value(value) => Some(*value),
            Self::Any => None,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::Any => f.write_str("*"),
        }
    }
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => serializer.serialize_u32(*value),
            Self::Any => serializer.serialize_str("*"),
        }
    }
}

impl JsonSchema for Length {
    fn schema_name() -> Cow<'static, str> {
        "Length".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "oneOf": [
                { "type": "integer", "format": "uint32", "minimum": 0 },
                { "type": "string", "const": "*" }
            ]
        })
    }
}

static CONSTRAINT_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\bCOMMENT\b\s+(?:'(.+)'|"(.+)")"#).expect("Invalid regex pattern")
});

/// A column of a parsed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    name: String,
    data_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<u32>,
    array_dimensional: usize,
    not_null: bool,
    primary_key: bool,
    unique: bool,
    is_unsigned: bool,
    is_zerofill: bool,
    auto_increment: bool,
    distkey: bool,
    sortkey: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    character_set: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_dialect: Option<Dialect>,
}

impl Column {
    /// Creates a nullable scalar column. `data_type` is upper-cased and its
    /// words joined by single spaces.
    pub fn new(name: impl Into<String>, data_type: &str) -> Self {
        Self {
            name: name.into(),
            data_type: normalize_type_name(data_type.split_whitespace()),
            length: None,
            scale: None,
            array_dimensional: 0,
            not_null: false,
            primary_key: false,
            unique: false,
            is_unsigned: false,
            is_zerofill: false,
            auto_increment: false,
            distkey: false,
            sortkey: false,
            character_set: None,
            encode: None,
            default: None,
            comment: None,
            source_dialect: None,
        }
    }

    /// Sets length and scale; a zero scale is stored as `None`.
    pub fn with_length(mut self, length: Length, scale: Option<u32>) -> Self {
        self.length = Some(length);
        self.scale = scale.filter(|&scale| scale != 0);
        self
    }

    pub fn with_array_dimensional(mut self, dimensions: usize) -> Self {
        self.array_dimensional = dimensions;
        self
    }

    pub fn with_source_dialect(mut self, dialect: Option<Dialect>) -> Self {
        self.source_dialect = dialect;
        self
    }

    pub(crate) fn from_definition(definition: ColumnDef, dialect: Option<Dialect>) -> Self {
        let ColumnDef {
            name,
            data_type,
            attributes,
        } = definition;

        let mut column = Self::new(name, "")
            .with_array_dimensional(data_type.array_dimensional)
            .with_source_dialect(dialect);
        column.data_type = normalize_type_name(data_type.words.iter().map(String::as_str));
        if let Some(length) = data_type.length {
            column = column.with_length(length, data_type.scale);
        }
        column.is_unsigned = data_type.unsigned;
        column.is_zerofill = data_type.zerofill;

        column.primary_key = attributes.key == Some(KeyMarker::Primary);
        column.unique = attributes.key == Some(KeyMarker::Unique);
        column.not_null =
            column.primary_key || attributes.nullability == Some(Nullability::NotNull);
        column.auto_increment = attributes.auto_increment;
        column.distkey = attributes.distkey;
        column.sortkey = attributes.sortkey;
        column.character_set = attributes.character_set;
        column.encode = attributes.encode;
        column.default = attributes.default;
        column.comment = attributes.comment;
        column
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_name(&self, case: NameCase) -> String {
        case.apply(&self.name)
    }

    /// Upper-cased source type, e.g. `"DOUBLE PRECISION"`.
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn length(&self) -> Option<Length> {
        self.length
    }

    /// Alias for [`Column::length`].
    pub fn precision(&self) -> Option<Length> {
        self.length
    }

    pub fn scale(&self) -> Option<u32> {
        self.scale
    }

    pub fn array_dimensional(&self) -> usize {
        self.array_dimensional
    }

    pub fn not_null(&self) -> bool {
        self.not_null
    }

    /// Clearing `NOT NULL` also clears the primary key flag.
    pub fn set_not_null(&mut self, not_null: bool) {
        self.not_null = not_null;
        if !not_null {
            self.primary_key = false;
        }
    }

    pub fn primary_key(&self) -> bool {
        self.primary_key
    }

    /// A primary key column is always `NOT NULL`.
    pub fn set_primary_key(&mut self, primary_key: bool) {
        self.primary_key = primary_key;
        if primary_key {
            self.not_null = true;
        }
    }

    pub fn unique(&self) -> bool {
        self.unique
    }

    pub fn set_unique(&mut self, unique: bool) {
        self.unique = unique;
    }

    pub fn is_unsigned(&self) -> bool {
        self.is_unsigned
    }

    pub fn is_zerofill(&self) -> bool {
        self.is_zerofill
    }

    pub fn auto_increment(&self) -> bool {
        self.auto_increment
    }

    pub fn distkey(&self) -> bool {
        self.distkey
    }

    pub fn sortkey(&self) -> bool {
        self.sortkey
    }

    pub fn character_set(&self) -> Option<&str> {
        self.character_set.as_deref()
    }

    pub fn encode(&self) -> Option<&str> {
        self.encode.as_deref()
    }

    /// `DEFAULT` expression as written (quotes stripped from plain strings).
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    /// Alias for [`Column::comment`]; the BigQuery field description.
    pub fn description(&self) -> Option<&str> {
        self.comment()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.set_comment(description);
    }

    pub fn source_dialect(&self) -> Option<Dialect> {
        self.source_dialect
    }

    pub fn set_source_dialect(&mut self, dialect: Option<Dialect>) {
        self.source_dialect = dialect;
    }

    /// `PRIMARY KEY` or `NOT NULL`, followed by `UNIQUE`, space separated.
    pub fn constraint(&self) -> String {
        let mut parts = Vec::new();
        if self.primary_key {
            parts.push("PRIMARY KEY");
        } else if self.not_null {
            parts.push("NOT NULL");
        }
        if self.unique {
            parts.push("UNIQUE");
        }
        parts.join(" ")
    }

    /// Re-derives the key flags and comment from free constraint text such
    /// as `"NOT NULL UNIQUE COMMENT 'x'"`. Matching is case-insensitive.
    pub fn set_constraint(&mut self, constraint: &str) {
        let upper = constraint.to_uppercase();
        self.primary_key = upper.contains("PRIMARY KEY");
        self.not_null = self.primary_key || upper.contains("NOT NULL");
        self.unique = upper.contains("UNIQUE");
        self.comment = CONSTRAINT_COMMENT.captures(constraint).and_then(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string())
        });
    }

    /// BigQuery legacy SQL type for this column.
    pub fn bigquery_data_type(&self) -> Result<LegacyType, DdlError> {
        mapping::legacy_type(&self.data_type, self.length, self.scale, self.source_dialect)
    }

    /// Same as [`Column::bigquery_data_type`].
    pub fn bigquery_legacy_data_type(&self) -> Result<LegacyType, DdlError> {
        self.bigquery_data_type()
    }

    /// BigQuery standard SQL type name (`INT64`, `FLOAT64`, `BOOL`, ...).
    pub fn bigquery_standard_data_type(&self) -> Result<&'static str, DdlError> {
        self.bigquery_data_type().map(|legacy| legacy.standard_name())
    }

    pub fn bigquery_mode(&self) -> Mode {
        mapping::mode(self.array_dimensional, self.not_null)
    }

    pub fn bigquery_field(&self, case: NameCase) -> Result<BigQueryField, DdlError> {
        render::column_field(self, case)
    }

    /// The column's BigQuery field as a compact JSON object.
    pub fn to_bigquery_field(&self, case: NameCase) -> Result<String, DdlError> {
        let field = self.bigquery_field(case)?;
        Ok(render::to_json(&field))
    }
}

fn normalize_type_name<'s>(words: impl Iterator<Item = &'s str>) -> String {
    words
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}
