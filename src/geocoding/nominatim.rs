use crate::air_quality::error::FetchError;
use crate::geocoding::{CityResolver, UNKNOWN_CITY};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
struct Address {
    city: Option<String>,
}

/// Reverse geocoder backed by a Nominatim `/reverse` endpoint.
///
/// Sends exactly one request per call, with no caching and no retry.
pub struct NominatimResolver {
    client: Client,
    base_url: String,
}

impl NominatimResolver {
    /// `user_agent` is sent with every request; the public Nominatim instance
    /// rejects anonymous clients.
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl CityResolver for NominatimResolver {
    async fn resolve(&self, latitude: f64, longitude: f64) -> String {
        let url = format!("{}/reverse", self.base_url);
        let result = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
            ])
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    "Failed to retrieve city name for coordinates ({}, {}): {}",
                    latitude, longitude, e
                );
                return UNKNOWN_CITY.to_string();
            }
        };
        if response.status() != StatusCode::OK {
            warn!(
                "Failed to retrieve city name for coordinates ({}, {}): status {}",
                latitude,
                longitude,
                response.status()
            );
            return UNKNOWN_CITY.to_string();
        }

        match response.bytes().await {
            Ok(body) => city_from_body(&body).unwrap_or_else(|| {
                debug!("No city in geocoding result for ({}, {})", latitude, longitude);
                UNKNOWN_CITY.to_string()
            }),
            Err(e) => {
                warn!(
                    "Failed to read geocoding response for ({}, {}): {}",
                    latitude, longitude, e
                );
                UNKNOWN_CITY.to_string()
            }
        }
    }
}

fn city_from_body(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ReverseResponse>(body)
        .ok()?
        .address?
        .city
}
