use crate::types::variable::AirQualityVariable;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("Invalid hourly block: start {start}, end {end}, interval {interval}")]
    InvalidTimeAxis {
        start: i64,
        end: i64,
        interval: i64,
    },

    #[error("Timestamp {0} is out of range")]
    TimestampOutOfRange(i64),

    #[error("Variable '{0}' was not requested")]
    VariableNotRequested(AirQualityVariable),

    #[error("Variable '{variable}' expected at slot {slot}, but the response for city '{city}' only has {available} variable(s)")]
    MissingVariable {
        city: String,
        variable: AirQualityVariable,
        slot: usize,
        available: usize,
    },

    #[error("Variable '{variable}' for city '{city}' has {found} values, expected {expected}")]
    LengthMismatch {
        city: String,
        variable: AirQualityVariable,
        expected: usize,
        found: usize,
    },
}
