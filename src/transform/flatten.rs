//! Turns raw per-location API responses into [`LocationRecord`]s.

use crate::geocoding::CityResolver;
use crate::transform::error::FlattenError;
use crate::types::location_record::{HourlySeries, LocationRecord};
use crate::types::raw_response::{HourlyBlock, RawLocationResponse};
use crate::types::variable::{AirQualityVariable, VariableIndex};
use chrono::{DateTime, Utc};
use log::debug;

/// Flattens every response, in order, resolving one city name per response.
///
/// Variables are looked up by name through `index`, so the request order does
/// not matter. Takes ownership of the responses and moves their value arrays
/// into the records.
pub async fn flatten<R: CityResolver>(
    responses: Vec<RawLocationResponse>,
    index: &VariableIndex,
    resolver: &R,
) -> Result<Vec<LocationRecord>, FlattenError> {
    if let Some(variable) = index.missing().first() {
        return Err(FlattenError::VariableNotRequested(*variable));
    }

    let mut records = Vec::with_capacity(responses.len());
    for response in responses {
        records.push(flatten_one(response, index, resolver).await?);
    }
    Ok(records)
}

async fn flatten_one<R: CityResolver>(
    response: RawLocationResponse,
    index: &VariableIndex,
    resolver: &R,
) -> Result<LocationRecord, FlattenError> {
    let city = resolver.resolve(response.latitude, response.longitude).await;
    debug!(
        "Resolved ({}, {}) to '{}'",
        response.latitude, response.longitude, city
    );

    let timestamps = hourly_timestamps(&response.hourly)?;

    let mut slots: Vec<Option<Vec<f64>>> =
        response.hourly.variables.into_iter().map(Some).collect();
    let available = slots.len();

    let mut values = Vec::with_capacity(AirQualityVariable::ALL.len());
    for variable in AirQualityVariable::ALL {
        let slot = index
            .position(variable)
            .ok_or(FlattenError::VariableNotRequested(variable))?;
        let series = slots
            .get_mut(slot)
            .and_then(Option::take)
            .ok_or_else(|| FlattenError::MissingVariable {
                city: city.clone(),
                variable,
                slot,
                available,
            })?;
        if series.len() != timestamps.len() {
            return Err(FlattenError::LengthMismatch {
                city,
                variable,
                expected: timestamps.len(),
                found: series.len(),
            });
        }
        values.push((variable, series));
    }

    Ok(LocationRecord {
        city,
        elevation: response.elevation,
        timezone: format!(
            "{} {}",
            response.timezone, response.timezone_abbreviation
        ),
        utc_offset_seconds: response.utc_offset_seconds,
        hourly: HourlySeries { timestamps, values },
    })
}

/// Timestamps from `time` (inclusive) to `time_end` (exclusive), one per
/// interval.
pub fn hourly_timestamps(block: &HourlyBlock) -> Result<Vec<DateTime<Utc>>, FlattenError> {
    if block.interval <= 0 || block.time_end < block.time {
        return Err(FlattenError::InvalidTimeAxis {
            start: block.time,
            end: block.time_end,
            interval: block.interval,
        });
    }
    let steps = (block.time_end - block.time) / block.interval;
    (0..steps)
        .map(|step| {
            let secs = block.time + step * block.interval;
            DateTime::from_timestamp(secs, 0).ok_or(FlattenError::TimestampOutOfRange(secs))
        })
        .collect()
}
