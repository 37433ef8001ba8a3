//! Endpoint URLs, parsed once from config and shared by every request.

use url::Url;

use super::FetchError;
use crate::config::ApiConfig;

#[derive(Debug, Clone)]
pub struct Endpoints {
    availability: Url,
    stops_force: Url,
}

impl Endpoints {
    pub fn from_config(api: &ApiConfig) -> Result<Self, FetchError> {
        Ok(Self {
            availability: parse(&api.availability_url)?,
            stops_force: parse(&api.stops_force_url)?,
        })
    }

    /// Availability listing (no parameters).
    pub fn availability(&self) -> &str {
        self.availability.as_str()
    }

    /// Stop-and-search records for one force and month.
    pub fn stops_force(&self, force: &str, date: &str) -> String {
        let mut url = self.stops_force.clone();
        url.query_pairs_mut()
            .append_pair("force", force)
            .append_pair("date", date);
        url.into()
    }
}

fn parse(raw: &str) -> Result<Url, FetchError> {
    Url::parse(raw).map_err(|source| FetchError::Url {
        url: raw.to_string(),
        source,
    })
}
