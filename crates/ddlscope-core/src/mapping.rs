//! Source type → BigQuery type mapping.
//!
//! Rules are checked in order and the first match wins, so the order of
//! [`TYPE_RULES`] is significant: `TIMESTAMPTZ` must not be caught by a
//! broader rule, `DATETIME` must be claimed before `DATE`, and so on. A rule
//! tagged with a dialect only applies to tables parsed with that dialect.
//!
//! Types from the numeric family (`NUMERIC`, `DECIMAL`, ...) fall through to
//! a precision-based decision when no rule matches.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DdlError;
use crate::model::Length;
use crate::types::{Dialect, LegacyType, Mode};
#[cfg(feature = "tracing")]
use tracing::trace;

/// Largest precision that still fits an INT64.
const MAX_INTEGER_PRECISION: u32 = 18;

const NUMERIC_FAMILY: &[&str] = &["NUMERIC", "NUMBER", "DECIMAL", "DEC", "FIXED"];

enum Pattern {
    /// Matches anywhere in the type name.
    Search(Regex),
    Exact(&'static str),
}

impl Pattern {
    fn matches(&self, data_type: &str) -> bool {
        match self {
            Self::Search(regex) => regex.is_match(data_type),
            Self::Exact(name) => data_type == *name,
        }
    }
}

struct TypeRule {
    target: LegacyType,
    dialect: Option<Dialect>,
    patterns: Vec<Pattern>,
}

impl TypeRule {
    fn new(target: LegacyType, patterns: Vec<Pattern>) -> Self {
        Self {
            target,
            dialect: None,
            patterns,
        }
    }

    fn for_dialect(dialect: Dialect, target: LegacyType, patterns: Vec<Pattern>) -> Self {
        Self {
            target,
            dialect: Some(dialect),
            patterns,
        }
    }

    fn applies(&self, data_type: &str, dialect: Option<Dialect>) -> bool {
        (self.dialect.is_none() || self.dialect == dialect)
            && self.patterns.iter().any(|pattern| pattern.matches(data_type))
    }
}

fn search(pattern: &str) -> Pattern {
    Pattern::Search(Regex::new(pattern).expect("Invalid regex pattern"))
}

fn exact<'a>(names: &'a [&'static str]) -> impl Iterator<Item = Pattern> + 'a {
    names.iter().copied().map(Pattern::Exact)
}

static TYPE_RULES: LazyLock<Vec<TypeRule>> = LazyLock::new(|| {
    vec![
        TypeRule::new(
            LegacyType::String,
            std::iter::once(search("CHAR|TEXT|CLOB|JSON|UUID"))
                .chain(exact(&["STRING", "ENUM", "SET", "XML"]))
                .collect(),
        ),
        TypeRule::new(LegacyType::Integer, vec![search("INT|SERIAL|YEAR")]),
        TypeRule::new(
            LegacyType::Float,
            std::iter::once(search("FLOAT|DOUBLE"))
                .chain(exact(&["REAL", "MONEY"]))
                .collect(),
        ),
        // Oracle DATE carries a time of day
        TypeRule::for_dialect(Dialect::Oracle, LegacyType::Datetime, exact(&["DATE"]).collect()),
        TypeRule::new(
            LegacyType::Datetime,
            exact(&["DATETIME", "TIMESTAMP", "TIMESTAMP WITHOUT TIME ZONE"]).collect(),
        ),
        TypeRule::new(
            LegacyType::Timestamp,
            exact(&[
                "TIMESTAMPTZ",
                "TIMESTAMP WITH TIME ZONE",
                "TIMESTAMP WITH LOCAL TIME ZONE",
            ])
            .collect(),
        ),
        TypeRule::new(LegacyType::Date, exact(&["DATE"]).collect()),
        TypeRule::new(
            LegacyType::Time,
            exact(&[
                "TIME",
                "TIME WITHOUT TIME ZONE",
                "TIMETZ",
                "TIME WITH TIME ZONE",
            ])
            .collect(),
        ),
        TypeRule::new(LegacyType::Boolean, vec![search("BOOL")]),
        TypeRule::new(LegacyType::Bytes, vec![search("BYTE|BLOB|BINARY")]),
    ]
});

/// Maps a source type to its BigQuery legacy SQL type.
///
/// `data_type` is compared upper-cased. Unknown types yield
/// [`DdlError::UnknownType`].
pub fn legacy_type(
    data_type: &str,
    length: Option<Length>,
    scale: Option<u32>,
    dialect: Option<Dialect>,
) -> Result<LegacyType, DdlError> {
    let data_type = data_type.to_uppercase();

    if let Some(rule) = TYPE_RULES
        .iter()
        .find(|rule| rule.applies(&data_type, dialect))
    {
        return Ok(rule.target);
    }

    if NUMERIC_FAMILY.contains(&data_type.as_str()) {
        let mapped = numeric_type(length, scale, dialect);
        #[cfg(feature = "tracing")]
        trace!(data_type = data_type.as_str(), ?length, ?scale, ?dialect, mapped = %mapped, "numeric type fallback");
        return Ok(mapped);
    }

    Err(DdlError::unknown_type(data_type))
}

fn numeric_type(length: Option<Length>, scale: Option<u32>, dialect: Option<Dialect>) -> LegacyType {
    match length {
        // Unbounded precision
        None if matches!(dialect, Some(Dialect::Oracle | Dialect::Postgresql)) => {
            LegacyType::Numeric
        }
        None => LegacyType::Integer,
        Some(Length::Any) => LegacyType::Numeric,
        Some(Length::Value(precision)) if precision <= MAX_INTEGER_PRECISION => {
            if scale.is_some_and(|scale| scale > 0) {
                LegacyType::Float
            } else {
                LegacyType::Integer
            }
        }
        Some(Length::Value(_)) => LegacyType::Numeric,
    }
}

/// `REPEATED` for arrays, otherwise `REQUIRED` when `NOT NULL`.
pub fn mode(array_dimensional: usize, not_null: bool) -> Mode {
    if array_dimensional > 0 {
        Mode::Repeated
    } else if not_null {
        Mode::Required
    } else {
        Mode::Nullable
    }
}
