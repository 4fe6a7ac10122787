//! The output table schema: column names, order and types.
//!
//! Datetime columns are timezone-naive values that represent UTC.

use crate::table::error::SchemaError;
use crate::types::variable::AirQualityVariable;
use polars::prelude::{DataFrame, DataType, TimeUnit};

pub const COL_DATE: &str = "date";
pub const COL_CITY: &str = "city";
pub const COL_LOAD_TIMESTAMP: &str = "load_timestamp";
pub const COL_EVENT_DATE: &str = "event_date";

pub fn timestamp_type() -> DataType {
    DataType::Datetime(TimeUnit::Milliseconds, None)
}

/// The ordered output columns with their types.
pub fn output_schema() -> Vec<(&'static str, DataType)> {
    let mut schema = Vec::with_capacity(AirQualityVariable::ALL.len() + 4);
    schema.push((COL_DATE, timestamp_type()));
    schema.extend(
        AirQualityVariable::ALL
            .iter()
            .map(|v| (v.name(), DataType::Float64)),
    );
    schema.push((COL_CITY, DataType::String));
    schema.push((COL_LOAD_TIMESTAMP, timestamp_type()));
    schema.push((COL_EVENT_DATE, DataType::Date));
    schema
}

pub fn column_names() -> Vec<&'static str> {
    output_schema().into_iter().map(|(name, _)| name).collect()
}

/// Checks that `df` has exactly the output columns, in order, with the
/// expected types. Reports the first mismatch.
pub fn validate_schema(df: &DataFrame) -> Result<(), SchemaError> {
    let expected = output_schema();
    let columns = df.get_columns();
    if columns.len() != expected.len() {
        return Err(SchemaError::ColumnCount {
            expected: expected.len(),
            found: columns.len(),
        });
    }
    for (position, (column, (name, dtype))) in columns.iter().zip(expected).enumerate() {
        if column.name().as_str() != name {
            return Err(SchemaError::ColumnName {
                position,
                expected: name.to_string(),
                found: column.name().to_string(),
            });
        }
        if column.dtype() != &dtype {
            return Err(SchemaError::ColumnType {
                column: name.to_string(),
                expected: dtype,
                found: column.dtype().clone(),
            });
        }
    }
    Ok(())
}
