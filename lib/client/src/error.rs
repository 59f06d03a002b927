use std::io;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("fetching {url} returned status {status}")]
    Fetch { url: String, status: u16 },
    #[error("endpoint {endpoint} returned status {status}: {message}")]
    Endpoint {
        endpoint: String,
        status: u16,
        message: String,
    },
    #[error("could not parse SPARQL results: {0}")]
    Results(#[from] sparesults::QueryResultsParseError),
    #[error("unexpected SPARQL result shape: {0}")]
    ResultShape(String),
    #[error("cache I/O failed: {0}")]
    Cache(#[from] io::Error),
    #[error("could not decode cached entry: {0}")]
    CacheFormat(#[from] serde_json::Error),
}
