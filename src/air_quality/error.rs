use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid API endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest_middleware::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    // Open-Meteo answers bad requests with {"error": true, "reason": "..."}
    #[error("API rejected request {url} with status {status}: {reason}")]
    ApiRejected {
        url: String,
        status: reqwest::StatusCode,
        reason: String,
    },

    #[error("Failed to read response body for {0}")]
    ResponseBody(String, #[source] reqwest::Error),

    #[error("Failed to decode response for {url}")]
    Decode {
        url: String,
        #[source]
        source: DecodeError,
    },
}

/// Raised when an API body cannot be turned into a raw location response.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid JSON in response body")]
    Json(#[from] serde_json::Error),

    #[error("Response has no hourly block")]
    MissingHourly,

    #[error("Requested variable '{0}' is missing from the hourly block")]
    MissingVariable(String),

    #[error("Hourly time axis is not evenly spaced at position {position}")]
    IrregularTimeAxis { position: usize },
}
