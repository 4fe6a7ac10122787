//! The per-location request sent to the air-quality API.

use crate::air_quality::error::FetchError;
use chrono::NaiveDate;
use reqwest::Url;

/// Everything needed to request hourly air-quality data for one location.
///
/// Built once per configured city for every run and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Hourly variable names, in the order their arrays should come back.
    pub hourly: Vec<String>,
    /// IANA timezone identifier (e.g. "Asia/Bangkok").
    pub timezone: String,
    pub start_date: NaiveDate,
    /// Inclusive last day of the requested range.
    pub end_date: NaiveDate,
}

impl LocationQuery {
    /// The query string parameters for this location.
    ///
    /// Timestamps are always requested as unix seconds so the hourly time axis
    /// is unambiguous UTC.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("hourly", self.hourly.join(",")),
            ("timezone", self.timezone.clone()),
            ("start_date", self.start_date.format("%Y-%m-%d").to_string()),
            ("end_date", self.end_date.format("%Y-%m-%d").to_string()),
            ("timeformat", "unixtime".to_string()),
        ]
    }

    /// Full request URL for `endpoint`. The URL doubles as the cache key, so
    /// identical queries always render identically.
    pub fn to_url(&self, endpoint: &str) -> Result<Url, FetchError> {
        Url::parse_with_params(endpoint, self.query_pairs()).map_err(|e| {
            FetchError::InvalidEndpoint {
                url: endpoint.to_string(),
                reason: e.to_string(),
            }
        })
    }
}
