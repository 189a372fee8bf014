//! Request types for the DDL conversion API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A request to convert a `CREATE TABLE` statement into a BigQuery schema.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    /// The DDL text (a single `CREATE TABLE` statement, comments allowed)
    pub ddl: String,

    /// Source dialect; omitted means generic ANSI SQL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,

    /// Rendering options
    #[serde(default)]
    pub options: ConvertOptions,
}

impl ConvertRequest {
    pub fn new(ddl: impl Into<String>) -> Self {
        Self {
            ddl: ddl.into(),
            dialect: None,
            options: ConvertOptions::default(),
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }
}

/// Options controlling how the converted schema is rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Case transform applied to schema, table and column names
    #[serde(default)]
    pub name_case: NameCase,

    /// Which BigQuery artifact to render
    #[serde(default)]
    pub output: OutputKind,
}

/// The BigQuery artifact produced by a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// JSON field list (`bq mk --schema` format)
    #[default]
    Fields,
    /// `CREATE TABLE` statement in standard SQL
    Ddl,
}

/// Source SQL dialect.
///
/// Only affects type mapping: Oracle `DATE` carries a time component and
/// Oracle/PostgreSQL treat a bare `NUMERIC` as arbitrary precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Mysql,
    #[serde(alias = "postgres")]
    Postgresql,
    Oracle,
    Redshift,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Postgresql => "postgresql",
            Self::Oracle => "oracle",
            Self::Redshift => "redshift",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::Mysql),
            "postgresql" | "postgres" => Ok(Self::Postgresql),
            "oracle" => Ok(Self::Oracle),
            "redshift" => Ok(Self::Redshift),
            other => Err(format!("unknown dialect: '{other}'")),
        }
    }
}

/// Case transform applied to identifiers when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NameCase {
    /// Keep names exactly as declared
    #[default]
    Original,
    Lower,
    Upper,
}

impl NameCase {
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::Original => name.to_string(),
            Self::Lower => name.to_lowercase(),
            Self::Upper => name.to_uppercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_round_trips_through_str() {
        for dialect in [
            Dialect::Mysql,
            Dialect::Postgresql,
            Dialect::Oracle,
            Dialect::Redshift,
        ] {
            assert_eq!(dialect.as_str().parse::<Dialect>(), Ok(dialect));
        }
        assert_eq!("Postgres".parse::<Dialect>(), Ok(Dialect::Postgresql));
        assert!("sqlite".parse::<Dialect>().is_err());
    }

    #[test]
    fn dialect_serde_accepts_postgres_alias() {
        let dialect: Dialect = serde_json::from_str("\"postgres\"").unwrap();
        assert_eq!(dialect, Dialect::Postgresql);
        assert_eq!(
            serde_json::to_string(&Dialect::Postgresql).unwrap(),
            "\"postgresql\""
        );
    }

    #[test]
    fn name_case_apply() {
        assert_eq!(NameCase::Original.apply("Col_01"), "Col_01");
        assert_eq!(NameCase::Lower.apply("Col_01"), "col_01");
        assert_eq!(NameCase::Upper.apply("Col_01"), "COL_01");
    }

    #[test]
    fn request_defaults_from_minimal_json() {
        let request: ConvertRequest =
            serde_json::from_str(r#"{"ddl": "CREATE TABLE t (a int)"}"#).unwrap();
        assert!(request.dialect.is_none());
        assert_eq!(request.options.name_case, NameCase::Original);
        assert_eq!(request.options.output, OutputKind::Fields);
    }

    #[test]
    fn request_reads_camel_case_options() {
        let request: ConvertRequest = serde_json::from_str(
            r#"{"ddl": "x", "dialect": "oracle", "options": {"nameCase": "upper", "output": "ddl"}}"#,
        )
        .unwrap();
        assert_eq!(request.dialect, Some(Dialect::Oracle));
        assert_eq!(request.options.name_case, NameCase::Upper);
        assert_eq!(request.options.output, OutputKind::Ddl);
    }
}
