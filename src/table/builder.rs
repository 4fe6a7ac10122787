//! Expands location records into one row per (location, timestamp).

use crate::table::error::TableError;
use crate::table::schema::{
    timestamp_type, validate_schema, COL_CITY, COL_DATE, COL_EVENT_DATE, COL_LOAD_TIMESTAMP,
};
use crate::types::location_record::{HourlySeries, LocationRecord};
use crate::types::variable::AirQualityVariable;
use chrono::{DateTime, Utc};
use polars::prelude::*;

/// Builds the output table.
///
/// Rows keep location order, then timestamp order. Every row gets the same
/// `load_timestamp`, and an `event_date` derived from its own `date`. A record
/// whose sequences disagree in length is rejected.
pub fn build_table(
    records: Vec<LocationRecord>,
    load_timestamp: DateTime<Utc>,
) -> Result<DataFrame, TableError> {
    let mut blocks = records.into_iter().map(location_block);
    let mut table = match blocks.next() {
        Some(first) => first?,
        None => location_block(empty_record())?,
    };
    for block in blocks {
        table.vstack_mut(&block?)?;
    }

    let table = table
        .lazy()
        .with_columns([
            lit(load_timestamp.timestamp_millis())
                .cast(timestamp_type())
                .alias(COL_LOAD_TIMESTAMP),
            col(COL_DATE).cast(DataType::Date).alias(COL_EVENT_DATE),
        ])
        .collect()?;

    validate_schema(&table)?;
    Ok(table)
}

/// One location's rows: `date`, the variables in schema order, then `city`.
fn location_block(record: LocationRecord) -> Result<DataFrame, TableError> {
    let LocationRecord { city, hourly, .. } = record;
    let HourlySeries {
        timestamps,
        mut values,
    } = hourly;
    let height = timestamps.len();

    let millis: Vec<i64> = timestamps.iter().map(DateTime::timestamp_millis).collect();
    let mut columns: Vec<Column> = Vec::with_capacity(AirQualityVariable::ALL.len() + 2);
    columns.push(
        Int64Chunked::from_vec(COL_DATE.into(), millis)
            .into_datetime(TimeUnit::Milliseconds, None)
            .into_series()
            .into(),
    );

    for variable in AirQualityVariable::ALL {
        let position = values
            .iter()
            .position(|(v, _)| *v == variable)
            .ok_or_else(|| TableError::MissingColumn {
                city: city.clone(),
                column: variable.name().to_string(),
            })?;
        let series = std::mem::take(&mut values[position].1);
        if series.len() != height {
            return Err(TableError::LengthMismatch {
                city,
                column: variable.name().to_string(),
                expected: height,
                found: series.len(),
            });
        }
        columns.push(
            Float64Chunked::from_vec(variable.name().into(), series)
                .into_series()
                .into(),
        );
    }

    columns.push(
        StringChunked::full(COL_CITY.into(), city.as_str(), height)
            .into_series()
            .into(),
    );

    Ok(DataFrame::new(columns)?)
}

fn empty_record() -> LocationRecord {
    LocationRecord {
        city: String::new(),
        elevation: 0.0,
        timezone: String::new(),
        utc_offset_seconds: 0,
        hourly: HourlySeries {
            timestamps: Vec::new(),
            values: AirQualityVariable::ALL
                .iter()
                .map(|v| (*v, Vec::new()))
                .collect(),
        },
    }
}
