//! Entry points of the load step: [`run`] produces the table, [`validate`]
//! checks it.
//!
//! Locations are processed one at a time. Every API request and every
//! geocoding request completes before the next one starts.

use crate::air_quality::fetcher::AirQualityFetcher;
use crate::config::PipelineConfig;
use crate::error::AirQualityError;
use crate::geocoding::nominatim::NominatimResolver;
use crate::http::cache::ResponseCache;
use crate::http::client::CachedClient;
use crate::table::builder::build_table;
use crate::table::schema::validate_schema;
use crate::transform::flatten::flatten;
use crate::types::variable::VariableIndex;
use chrono::Utc;
use log::{debug, info, warn};
use polars::prelude::DataFrame;

/// The configured fetcher and geocoder for one or more runs.
pub struct AirQualityPipeline {
    config: PipelineConfig,
    fetcher: AirQualityFetcher,
    resolver: NominatimResolver,
}

impl AirQualityPipeline {
    pub async fn new(config: PipelineConfig) -> Result<Self, AirQualityError> {
        config.check()?;
        let cache_dir = config.resolve_cache_dir()?;
        let cache = ResponseCache::new(&cache_dir, config.cache_expire_after()).await?;
        let client = CachedClient::builder()
            .cache(cache)
            .retries(config.retries)
            .backoff_factor(config.backoff_factor)
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        let resolver = NominatimResolver::new(
            &config.geocoding_url,
            &config.user_agent,
            config.request_timeout(),
        )?;
        Ok(Self {
            config,
            fetcher: AirQualityFetcher::new(client),
            resolver,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetches, flattens and tabulates every configured city.
    pub async fn run(&self) -> Result<DataFrame, AirQualityError> {
        let queries = self.config.location_queries();
        let index = VariableIndex::from_requested(&self.config.requested_variables());

        let responses = self
            .fetcher
            .fetch(&self.config.air_quality_url, &queries)
            .await?;
        let records = flatten(responses, &index, &self.resolver).await?;

        let load_timestamp = Utc::now();
        let table = build_table(records, load_timestamp)?;

        info!(
            "Built air-quality table with {} rows for {} location(s), loaded at {}",
            table.height(),
            queries.len(),
            load_timestamp
        );
        for column in table.get_columns() {
            debug!("{}: {}", column.name(), column.dtype());
        }
        Ok(table)
    }
}

/// Runs the load step with `config`.
pub async fn run(config: PipelineConfig) -> Result<DataFrame, AirQualityError> {
    AirQualityPipeline::new(config).await?.run().await
}

/// [`run`] on a single-threaded runtime, for callers without one.
pub fn run_blocking(config: PipelineConfig) -> Result<DataFrame, AirQualityError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AirQualityError::Runtime)?;
    runtime.block_on(run(config))
}

/// True when `output` has rows and matches the output schema.
pub fn validate(output: &DataFrame) -> bool {
    if output.height() == 0 {
        warn!("The output is empty");
        return false;
    }
    match validate_schema(output) {
        Ok(()) => true,
        Err(e) => {
            warn!("The output does not match the schema: {}", e);
            false
        }
    }
}
