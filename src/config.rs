//! Run configuration. The defaults reproduce the scheduled job: four Indian
//! cities, twelve hourly variables, Asia/Bangkok time, 2024-08-12..2024-11-15.

use crate::geocoding::nominatim::NOMINATIM_URL;
use crate::http::error::CacheError;
use crate::types::location_query::LocationQuery;
use crate::types::variable::AirQualityVariable;
use crate::utils::get_cache_dir;
use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("End date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Backoff factor must be a non-negative number, got {0}")]
    InvalidBackoffFactor(f64),
}

/// A location to load, by coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

fn default_cities() -> Vec<City> {
    vec![
        City::new(28.6519, 77.2315), // Delhi
        City::new(12.9719, 77.5937), // Bangalore
        City::new(20.2724, 85.8338), // Bhubaneswar
        City::new(19.0728, 72.8826), // Mumbai
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct PipelineConfig {
    #[builder(default = AIR_QUALITY_URL.to_string(), into)]
    pub air_quality_url: String,
    #[builder(default = NOMINATIM_URL.to_string(), into)]
    pub geocoding_url: String,
    #[builder(default = concat!("air_quality_loader/", env!("CARGO_PKG_VERSION")).to_string(), into)]
    pub user_agent: String,
    #[builder(default = default_cities())]
    pub cities: Vec<City>,
    /// Requested hourly variables, in request order.
    #[builder(default = AirQualityVariable::all_names())]
    pub hourly_variables: Vec<String>,
    #[builder(default = "Asia/Bangkok".to_string(), into)]
    pub timezone: String,
    #[builder(default = date(2024, 8, 12))]
    pub start_date: NaiveDate,
    #[builder(default = date(2024, 11, 15))]
    pub end_date: NaiveDate,
    /// Defaults to a directory inside the system cache directory.
    pub cache_dir: Option<PathBuf>,
    /// Freshness window of cached API responses.
    #[builder(default = 3600)]
    pub cache_expire_after_secs: u64,
    #[builder(default = 5)]
    pub retries: u32,
    #[builder(default = 0.2)]
    pub backoff_factor: f64,
    #[builder(default = 30)]
    pub request_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PipelineConfig {
    /// Loads a JSON config file. Missing fields take their defaults.
    pub async fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        serde_json::from_str(&text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    pub fn check(&self) -> Result<(), ConfigError> {
        if self.end_date < self.start_date {
            return Err(ConfigError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if !(self.backoff_factor >= 0.0 && self.backoff_factor.is_finite()) {
            return Err(ConfigError::InvalidBackoffFactor(self.backoff_factor));
        }
        Ok(())
    }

    /// The hourly variables to request, in order. A repeated name is sent
    /// once, at its first position.
    pub fn requested_variables(&self) -> Vec<String> {
        let mut seen = HashSet::with_capacity(self.hourly_variables.len());
        self.hourly_variables
            .iter()
            .filter(|name| seen.insert(*name))
            .cloned()
            .collect()
    }

    /// One query per configured city, in city order.
    pub fn location_queries(&self) -> Vec<LocationQuery> {
        let hourly = self.requested_variables();
        self.cities
            .iter()
            .map(|city| LocationQuery {
                latitude: city.latitude,
                longitude: city.longitude,
                hourly: hourly.clone(),
                timezone: self.timezone.clone(),
                start_date: self.start_date,
                end_date: self.end_date,
            })
            .collect()
    }

    pub fn resolve_cache_dir(&self) -> Result<PathBuf, CacheError> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => get_cache_dir(),
        }
    }

    pub fn cache_expire_after(&self) -> Duration {
        Duration::from_secs(self.cache_expire_after_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_scheduled_job() {
        let config = PipelineConfig::default();
        assert_eq!(config.cities.len(), 4);
        assert_eq!(config.hourly_variables.len(), 12);
        assert_eq!(config.timezone, "Asia/Bangkok");
        assert_eq!(config.start_date, date(2024, 8, 12));
        assert_eq!(config.end_date, date(2024, 11, 15));
        assert_eq!(config.cache_expire_after(), Duration::from_secs(3600));
        assert_eq!(config.retries, 5);
        assert_eq!(config.backoff_factor, 0.2);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_queries_follow_city_order() {
        let config = PipelineConfig::builder()
            .cities(vec![City::new(1.0, 2.0), City::new(3.0, 4.0)])
            .timezone("UTC")
            .build();
        let queries = config.location_queries();
        assert_eq!(queries.len(), 2);
        assert_eq!((queries[1].latitude, queries[1].longitude), (3.0, 4.0));
        assert_eq!(queries[0].timezone, "UTC");
        assert_eq!(queries[0].hourly, AirQualityVariable::all_names());
    }

    #[test]
    fn test_repeated_variable_is_requested_once() {
        let config = PipelineConfig::builder()
            .hourly_variables(vec![
                "ozone".to_string(),
                "pm10".to_string(),
                "ozone".to_string(),
                "dust".to_string(),
            ])
            .build();
        let expected = vec!["ozone".to_string(), "pm10".to_string(), "dust".to_string()];
        assert_eq!(config.requested_variables(), expected);
        assert_eq!(config.location_queries()[0].hourly, expected);
    }

    #[tokio::test]
    async fn test_partial_json_file_keeps_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"{{"cities": [{{"latitude": 52.52, "longitude": 13.4}}], "end_date": "2024-08-15", "retries": 2}}"#
        )?;

        let config = PipelineConfig::from_json_file(file.path()).await?;
        assert_eq!(config.cities, vec![City::new(52.52, 13.4)]);
        assert_eq!(config.end_date, date(2024, 8, 15));
        assert_eq!(config.retries, 2);
        assert_eq!(config.start_date, date(2024, 8, 12));
        assert_eq!(config.air_quality_url, AIR_QUALITY_URL);
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_json_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        write!(file, "{{ not json")?;
        assert!(matches!(
            PipelineConfig::from_json_file(file.path()).await,
            Err(ConfigError::Parse(_, _))
        ));
        Ok(())
    }

    #[test]
    fn test_check_rejects_reversed_dates() {
        let config = PipelineConfig::builder()
            .start_date(date(2024, 9, 1))
            .end_date(date(2024, 8, 1))
            .build();
        assert!(matches!(
            config.check(),
            Err(ConfigError::InvalidDateRange { .. })
        ));
    }
}
