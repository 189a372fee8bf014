//! One-shot conversion entry point.

use crate::error::DdlError;
use crate::parser::parse_ddl;
use crate::types::{ConvertRequest, ConvertResult, OutputKind};

/// Parses `request.ddl` and renders the requested BigQuery artifact.
pub fn convert(request: &ConvertRequest) -> Result<ConvertResult, DdlError> {
    let table = parse_ddl(&request.ddl, request.dialect)?;
    let case = request.options.name_case;
    let output = match request.options.output {
        OutputKind::Fields => table.to_bigquery_fields(case)?,
        OutputKind::Ddl => table.to_bigquery_ddl(case)?,
    };
    Ok(ConvertResult { table, output })
}
