//! HTTP transport for the air-quality API: a response cache in front of a
//! retrying reqwest client.

use crate::air_quality::error::FetchError;
use crate::http::cache::ResponseCache;
use bon::bon;
use log::{debug, info, warn};
use reqwest::{Client, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: bool,
    reason: String,
}

pub struct CachedClient {
    cache: ResponseCache,
    client: ClientWithMiddleware,
}

#[bon]
impl CachedClient {
    /// Creates a client that serves fresh cached bodies and otherwise sends the
    /// request, retrying transient failures up to `retries` times.
    ///
    /// The wait before retry `n` is at most `backoff_factor * 2^(n-1)` seconds.
    #[builder]
    pub fn new(
        cache: ResponseCache,
        #[builder(default = 5)] retries: u32,
        #[builder(default = 0.2)] backoff_factor: f64,
        #[builder(default = Duration::from_secs(30))] timeout: Duration,
        user_agent: Option<String>,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder().timeout(timeout);
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }
        let inner = builder.build().map_err(FetchError::ClientBuild)?;

        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy(
                retries,
                backoff_factor,
            )))
            .build();

        Ok(Self { cache, client })
    }

    /// Returns the body for `url`, from the cache when fresh.
    pub async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let key = url.as_str();
        match self.cache.get(key).await {
            Ok(Some(body)) => {
                debug!("Cache hit for {}", key);
                return Ok(body);
            }
            Ok(None) => debug!("Cache miss for {}", key),
            Err(e) => warn!("Ignoring unreadable cache entry for {}: {}", key, e),
        }

        info!("Requesting {}", key);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(key.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("HTTP error for {}: {} {}", key, status, body);
            return Err(match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(api_error) if api_error.error => FetchError::ApiRejected {
                    url: key.to_string(),
                    status,
                    reason: api_error.reason,
                },
                _ => FetchError::HttpStatus {
                    url: key.to_string(),
                    status,
                },
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::ResponseBody(key.to_string(), e))?;
        if let Err(e) = self.cache.put(key, &body).await {
            warn!("Failed to cache response for {}: {}", key, e);
        }
        Ok(body.to_vec())
    }
}

fn retry_policy(retries: u32, backoff_factor: f64) -> ExponentialBackoff {
    let min = Duration::from_secs_f64(backoff_factor.max(0.001));
    let max = min.saturating_mul(2u32.saturating_pow(retries.saturating_sub(1)));
    ExponentialBackoff::builder()
        .retry_bounds(min, max.max(min))
        .base(2)
        .build_with_max_retries(retries)
}
