//! HTTP GET against the police.uk API.
//!
//! Uses the curl crate (libcurl). Callers see only a status code and a body;
//! deciding what a status means is left to the registry and the executor.

mod endpoints;
mod error;

pub use endpoints::Endpoints;
pub use error::FetchError;

use std::time::Duration;

use crate::config::ApiConfig;

/// Status and raw body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Decode the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Something that can perform a blocking GET.
pub trait HttpFetcher {
    /// Returns any HTTP status as `Ok`; only transport failures are `Err`.
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// libcurl-backed fetcher.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlFetcher {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            connect_timeout,
            timeout,
        }
    }

    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(
            Duration::from_secs(api.connect_timeout_secs),
            Duration::from_secs(api.timeout_secs),
        )
    }
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::from_config(&ApiConfig::default())
    }
}

impl HttpFetcher for CurlFetcher {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let transport = |source: curl::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let mut body = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(transport)?;
        easy.follow_location(true).map_err(transport)?;
        easy.max_redirections(10).map_err(transport)?;
        easy.useragent(concat!("stopsearch/", env!("CARGO_PKG_VERSION")))
            .map_err(transport)?;
        easy.connect_timeout(self.connect_timeout).map_err(transport)?;
        easy.timeout(self.timeout).map_err(transport)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(transport)?;
            transfer.perform().map_err(transport)?;
        }

        let status = easy.response_code().map_err(transport)?;
        tracing::debug!(url, status, bytes = body.len(), "GET completed");
        Ok(HttpResponse { status, body })
    }
}
