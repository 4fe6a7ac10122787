use crate::types::variable::AirQualityVariable;
use chrono::{DateTime, Utc};

/// One location after flattening: its display name, metadata and hourly series.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub city: String,
    pub elevation: f64,
    /// Timezone name and abbreviation, e.g. "Asia/Bangkok +07".
    pub timezone: String,
    pub utc_offset_seconds: i32,
    pub hourly: HourlySeries,
}

/// Hourly timestamps plus one value sequence per schema variable.
///
/// `values` is kept in [`AirQualityVariable::ALL`] order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HourlySeries {
    pub timestamps: Vec<DateTime<Utc>>,
    pub values: Vec<(AirQualityVariable, Vec<f64>)>,
}

impl HourlySeries {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Values of `variable`, if present.
    pub fn get(&self, variable: AirQualityVariable) -> Option<&[f64]> {
        self.values
            .iter()
            .find(|(v, _)| *v == variable)
            .map(|(_, values)| values.as_slice())
    }
}
