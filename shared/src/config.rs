//! Service configuration and endpoint URLs.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::catalog::RegionCode;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
pub const DEFAULT_REGIONS_BASE_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";
pub const MAX_URL_LENGTH: usize = 2048;

const ITEMS_PATH: &str = "items";
const POINTS_PATH: &str = "points";
const STATES_PATH: &str = "estados";
const CITIES_PATH: &str = "municipios";

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Where the screen talks to. Supplied by the shell when the screen opens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub api_base_url: String,
    pub regions_base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            regions_base_url: DEFAULT_REGIONS_BASE_URL.into(),
        }
    }
}

impl ServiceConfig {
    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        Ok(Endpoints {
            api: ServiceUrl::new(&self.api_base_url)?,
            regions: ServiceUrl::new(&self.regions_base_url)?,
        })
    }
}

/// An http(s) base URL with a host and no embedded credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUrl(Url);

impl ServiceUrl {
    pub fn new(url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidUrl {
            url: truncate_url(url),
            reason: reason.to_string(),
        };

        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(invalid("URL cannot be empty"));
        }
        if trimmed.len() > MAX_URL_LENGTH {
            return Err(invalid("URL is too long"));
        }

        let parsed = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(invalid("only 'http' and 'https' are allowed"));
        }
        if parsed.host_str().is_none() {
            return Err(invalid("URL must have a host"));
        }
        if !parsed.username().is_empty() || parsed.password().is_some() {
            return Err(invalid("credentials in URL are not allowed"));
        }

        Ok(Self(parsed))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Appends percent-encoded path segments.
    pub fn join<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.0.clone();
        url.set_query(None);
        url.set_fragment(None);
        // http(s) URLs always have a path, so this cannot fail.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn truncate_url(url: &str) -> String {
    match url.char_indices().nth(100) {
        Some((idx, _)) => format!("{}...", &url[..idx]),
        None => url.to_string(),
    }
}

/// Resolved endpoints for one screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    api: ServiceUrl,
    regions: ServiceUrl,
}

impl Endpoints {
    pub fn items(&self) -> Url {
        self.api.join([ITEMS_PATH])
    }

    pub fn points(&self) -> Url {
        self.api.join([POINTS_PATH])
    }

    pub fn states(&self) -> Url {
        self.regions.join([STATES_PATH])
    }

    pub fn cities(&self, state: &RegionCode) -> Url {
        self.regions.join([STATES_PATH, state.as_str(), CITIES_PATH])
    }
}
