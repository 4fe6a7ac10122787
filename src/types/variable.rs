//! Defines the hourly air-quality variables the loader knows about, and the
//! [`VariableIndex`] used to find each variable's array in an API response.

use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One of the twelve hourly variables carried into the output table.
///
/// The declaration order is the column order of the output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AirQualityVariable {
    /// Particulate matter with diameter below 10 µm (µg/m³).
    Pm10,
    /// Particulate matter with diameter below 2.5 µm (µg/m³).
    Pm2_5,
    CarbonMonoxide,
    CarbonDioxide,
    NitrogenDioxide,
    SulphurDioxide,
    Ozone,
    /// Saharan dust particles near the surface (µg/m³).
    Dust,
    UvIndex,
    /// UV index assuming cloud-free conditions.
    UvIndexClearSky,
    Ammonia,
    Methane,
}

impl AirQualityVariable {
    /// All variables, in output column order.
    pub const ALL: [AirQualityVariable; 12] = [
        AirQualityVariable::Pm10,
        AirQualityVariable::Pm2_5,
        AirQualityVariable::CarbonMonoxide,
        AirQualityVariable::CarbonDioxide,
        AirQualityVariable::NitrogenDioxide,
        AirQualityVariable::SulphurDioxide,
        AirQualityVariable::Ozone,
        AirQualityVariable::Dust,
        AirQualityVariable::UvIndex,
        AirQualityVariable::UvIndexClearSky,
        AirQualityVariable::Ammonia,
        AirQualityVariable::Methane,
    ];

    /// The API parameter name, which is also the output column name.
    pub fn name(&self) -> &'static str {
        match self {
            AirQualityVariable::Pm10 => "pm10",
            AirQualityVariable::Pm2_5 => "pm2_5",
            AirQualityVariable::CarbonMonoxide => "carbon_monoxide",
            AirQualityVariable::CarbonDioxide => "carbon_dioxide",
            AirQualityVariable::NitrogenDioxide => "nitrogen_dioxide",
            AirQualityVariable::SulphurDioxide => "sulphur_dioxide",
            AirQualityVariable::Ozone => "ozone",
            AirQualityVariable::Dust => "dust",
            AirQualityVariable::UvIndex => "uv_index",
            AirQualityVariable::UvIndexClearSky => "uv_index_clear_sky",
            AirQualityVariable::Ammonia => "ammonia",
            AirQualityVariable::Methane => "methane",
        }
    }

    /// The names of all variables, in output column order.
    pub fn all_names() -> Vec<String> {
        Self::ALL.iter().map(|v| v.name().to_string()).collect()
    }
}

impl fmt::Display for AirQualityVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returned when a string is not one of the known variable names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariable(pub String);

impl fmt::Display for UnknownVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown air-quality variable '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariable {}

impl FromStr for AirQualityVariable {
    type Err = UnknownVariable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name() == s)
            .ok_or_else(|| UnknownVariable(s.to_string()))
    }
}

/// Maps each known variable to the position of its array in a response.
///
/// Built once from the list of requested variable names. Responses list their
/// variable arrays in request order, so the requested position is the array
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariableIndex {
    positions: HashMap<AirQualityVariable, usize>,
}

impl VariableIndex {
    /// Builds the index from requested names. Names that are not schema
    /// variables are skipped; a repeated name keeps its first position.
    pub fn from_requested<S: AsRef<str>>(requested: &[S]) -> Self {
        let mut positions = HashMap::with_capacity(requested.len());
        for (position, name) in requested.iter().enumerate() {
            let name = name.as_ref();
            match name.parse::<AirQualityVariable>() {
                Ok(variable) => {
                    positions.entry(variable).or_insert(position);
                }
                Err(_) => debug!("Requested variable '{}' is not part of the output schema", name),
            }
        }
        Self { positions }
    }

    /// Position of `variable` in the request, if it was requested.
    pub fn position(&self, variable: AirQualityVariable) -> Option<usize> {
        self.positions.get(&variable).copied()
    }

    /// Schema variables that were not requested, in column order.
    pub fn missing(&self) -> Vec<AirQualityVariable> {
        AirQualityVariable::ALL
            .iter()
            .copied()
            .filter(|v| !self.positions.contains_key(v))
            .collect()
    }
}
