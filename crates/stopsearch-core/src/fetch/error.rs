//! Errors raised while talking to the upstream API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, DNS, etc.).
    #[error("transport failure for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// The server answered with a non-200 status.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },
    /// The body of a 200 response was not valid JSON of the expected shape.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// Valid JSON, but not a list of records.
    #[error("unexpected payload from {url}: {reason}")]
    Payload { url: String, reason: String },
    /// A configured endpoint is not a valid absolute URL.
    #[error("invalid endpoint URL {url:?}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
