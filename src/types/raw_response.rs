//! The decoded, still location-shaped answer of the air-quality API.

use crate::air_quality::error::DecodeError;
use serde::Deserialize;
use std::collections::HashMap;

/// Sampling interval assumed when the time axis has fewer than two entries.
const DEFAULT_INTERVAL_SECS: i64 = 3600;

/// Raw API response for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLocationResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub utc_offset_seconds: i32,
    pub hourly: HourlyBlock,
}

/// The hourly part of a response: an evenly spaced time axis and one value
/// array per requested variable, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyBlock {
    /// First timestamp, unix seconds, inclusive.
    pub time: i64,
    /// Unix seconds, exclusive.
    pub time_end: i64,
    /// Seconds between samples.
    pub interval: i64,
    pub variables: Vec<Vec<f64>>,
}

impl HourlyBlock {
    /// Number of samples on the time axis.
    pub fn step_count(&self) -> usize {
        if self.interval <= 0 || self.time_end <= self.time {
            return 0;
        }
        ((self.time_end - self.time) / self.interval) as usize
    }
}

// Wire format. With `timeformat=unixtime` the `time` array holds unix seconds.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    elevation: f64,
    #[serde(default)]
    utc_offset_seconds: i32,
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    timezone_abbreviation: String,
    hourly: Option<ApiHourly>,
}

#[derive(Debug, Deserialize)]
struct ApiHourly {
    time: Vec<i64>,
    #[serde(flatten)]
    values: HashMap<String, Vec<Option<f64>>>,
}

impl RawLocationResponse {
    /// Decodes an API JSON body. `requested` is the variable list the request
    /// was made with; the value arrays are stored in that order.
    pub fn from_json(body: &[u8], requested: &[String]) -> Result<Self, DecodeError> {
        let api: ApiResponse = serde_json::from_slice(body)?;
        let mut hourly = api.hourly.ok_or(DecodeError::MissingHourly)?;

        let interval = match hourly.time.as_slice() {
            [first, second, ..] => second
                .checked_sub(*first)
                .ok_or(DecodeError::IrregularTimeAxis { position: 1 })?,
            _ => DEFAULT_INTERVAL_SECS,
        };
        if let Some(position) = hourly
            .time
            .windows(2)
            .position(|pair| pair[1].checked_sub(pair[0]) != Some(interval))
        {
            return Err(DecodeError::IrregularTimeAxis {
                position: position + 1,
            });
        }
        let time = hourly.time.first().copied().unwrap_or(0);
        let time_end = match hourly.time.last() {
            Some(last) => last
                .checked_add(interval)
                .ok_or(DecodeError::IrregularTimeAxis {
                    position: hourly.time.len() - 1,
                })?,
            None => time,
        };

        let variables = requested
            .iter()
            .map(|name| {
                hourly
                    .values
                    .remove(name)
                    .map(|values| values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
                    .ok_or_else(|| DecodeError::MissingVariable(name.clone()))
            })
            .collect::<Result<Vec<Vec<f64>>, DecodeError>>()?;

        Ok(Self {
            latitude: api.latitude,
            longitude: api.longitude,
            elevation: api.elevation,
            timezone: api.timezone,
            timezone_abbreviation: api.timezone_abbreviation,
            utc_offset_seconds: api.utc_offset_seconds,
            hourly: HourlyBlock {
                time,
                time_end,
                interval,
                variables,
            },
        })
    }
}
