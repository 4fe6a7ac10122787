use crate::air_quality::error::FetchError;
use crate::config::ConfigError;
use crate::http::error::CacheError;
use crate::table::error::TableError;
use crate::transform::error::FlattenError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirQualityError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Flatten(#[from] FlattenError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Failed to start async runtime")]
    Runtime(#[source] std::io::Error),
}
