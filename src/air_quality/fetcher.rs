use crate::air_quality::error::FetchError;
use crate::http::client::CachedClient;
use crate::types::location_query::LocationQuery;
use crate::types::raw_response::RawLocationResponse;
use log::info;

/// Fetches raw hourly air-quality responses, one request per location.
pub struct AirQualityFetcher {
    client: CachedClient,
}

impl AirQualityFetcher {
    pub fn new(client: CachedClient) -> Self {
        Self { client }
    }

    /// Fetches every query in order. The first location that cannot be
    /// fetched or decoded fails the whole call.
    pub async fn fetch(
        &self,
        endpoint: &str,
        queries: &[LocationQuery],
    ) -> Result<Vec<RawLocationResponse>, FetchError> {
        let mut responses = Vec::with_capacity(queries.len());
        for query in queries {
            responses.push(self.fetch_one(endpoint, query).await?);
        }
        info!("Fetched {} location(s) from {}", responses.len(), endpoint);
        Ok(responses)
    }

    async fn fetch_one(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> Result<RawLocationResponse, FetchError> {
        let url = query.to_url(endpoint)?;
        let body = self.client.get_bytes(&url).await?;
        RawLocationResponse::from_json(&body, &query.hourly).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            source: e,
        })
    }
}
