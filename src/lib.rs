mod air_quality;
mod config;
mod error;
mod geocoding;
mod http;
mod pipeline;
mod table;
mod transform;
mod types;
mod utils;

pub use error::AirQualityError;
pub use pipeline::*;

pub use config::{City, ConfigError, PipelineConfig, AIR_QUALITY_URL};

pub use air_quality::error::{DecodeError, FetchError};
pub use air_quality::fetcher::AirQualityFetcher;
pub use http::cache::ResponseCache;
pub use http::client::CachedClient;
pub use http::error::CacheError;

pub use geocoding::nominatim::{NominatimResolver, NOMINATIM_URL};
pub use geocoding::{CityResolver, UNKNOWN_CITY};

pub use transform::error::FlattenError;
pub use transform::flatten::{flatten, hourly_timestamps};

pub use table::builder::build_table;
pub use table::error::{SchemaError, TableError};
pub use table::schema::{
    column_names, output_schema, validate_schema, COL_CITY, COL_DATE, COL_EVENT_DATE,
    COL_LOAD_TIMESTAMP,
};
pub use table::writer::write_parquet;

pub use types::location_query::LocationQuery;
pub use types::location_record::{HourlySeries, LocationRecord};
pub use types::raw_response::{HourlyBlock, RawLocationResponse};
pub use types::variable::{AirQualityVariable, UnknownVariable, VariableIndex};
