//! Types for the DDL conversion API.
//!
//! Requests carry the DDL text plus dialect and rendering options; responses
//! carry the parsed table model alongside the rendered BigQuery artifact.

mod bigquery;
mod request;
mod response;

pub use bigquery::{BigQueryField, LegacyType, Mode};
pub use request::{ConvertOptions, ConvertRequest, Dialect, NameCase, OutputKind};
pub use response::ConvertResult;
