use crate::error::DdlError;
use crate::model::Column;
use crate::types::{BigQueryField, LegacyType, Mode, NameCase};

/// Builds the BigQuery field for `column`.
///
/// BigQuery has no nested arrays, so an N-dimensional array becomes a
/// repeated `RECORD` wrapping N-1 single-field records named `dimension_1`,
/// `dimension_2`, ...; the innermost one carries the element type.
pub(crate) fn column_field(column: &Column, case: NameCase) -> Result<BigQueryField, DdlError> {
    let element_type = column.bigquery_data_type()?;
    let mode = column.bigquery_mode();
    let name = column.get_name(case);
    let description = column.description().map(str::to_string);
    let dimensions = column.array_dimensional();

    if dimensions <= 1 {
        return Ok(BigQueryField {
            name,
            field_type: element_type,
            mode,
            description,
            fields: Vec::new(),
        });
    }

    let mut nested = BigQueryField {
        name: format!("dimension_{}", dimensions - 1),
        field_type: element_type,
        mode,
        description: None,
        fields: Vec::new(),
    };
    for index in (1..dimensions - 1).rev() {
        nested = BigQueryField {
            name: format!("dimension_{index}"),
            field_type: LegacyType::Record,
            mode: Mode::Repeated,
            description: None,
            fields: vec![nested],
        };
    }

    Ok(BigQueryField {
        name,
        field_type: LegacyType::Record,
        mode,
        description,
        fields: vec![nested],
    })
}
