//! Process configuration
//!
//! Credentials and upstream locations are collected once at startup and
//! handed to each component when it is constructed. Nothing below reads the
//! environment at request time.

use std::time::Duration;

/// Companies House public data API
pub const DEFAULT_REGISTRY_BASE_URL: &str = "https://api.company-information.service.gov.uk";

/// Search proxy worker endpoint used by `ch_search`
pub const DEFAULT_WORKER_BASE_URL: &str = "https://ch-api.felixmkershaw.workers.dev/advanced";

/// Identifying header sent with every proxy search
pub const DEFAULT_USER_AGENT: &str = "northern-mcp/1.0";

pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

/// Environment variable holding the registry Basic-auth key
pub const ENV_COMPANIES_HOUSE_API_KEY: &str = "COMPANIES_HOUSE_API_KEY";
/// Environment variable holding the optional worker bearer key
pub const ENV_WORKER_KEY: &str = "CH_WORKER_KEY";
pub const ENV_REGISTRY_BASE_URL: &str = "NORTHERN_REGISTRY_BASE_URL";
pub const ENV_WORKER_BASE_URL: &str = "NORTHERN_WORKER_BASE_URL";
pub const ENV_SEARCH_TIMEOUT_SECS: &str = "NORTHERN_SEARCH_TIMEOUT_SECS";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "NORTHERN_FETCH_TIMEOUT_SECS";

/// Runtime configuration shared by the registry endpoint and the tool server
#[derive(Debug, Clone)]
pub struct Config {
    /// Basic-auth key for the registry API
    pub companies_house_api_key: Option<String>,
    /// Bearer key for the search proxy worker
    pub worker_key: Option<String>,
    pub registry_base_url: String,
    pub worker_base_url: String,
    pub search_timeout: Duration,
    pub fetch_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            companies_house_api_key: None,
            worker_key: None,
            registry_base_url: DEFAULT_REGISTRY_BASE_URL.to_string(),
            worker_base_url: DEFAULT_WORKER_BASE_URL.to_string(),
            search_timeout: Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Create config from any variable source
    ///
    /// Unset or empty credentials are treated as absent. Base URLs and
    /// timeouts fall back to the defaults above, as do unparsable timeouts.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let secs = |name: &str| {
            var(name)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
        };

        Self {
            companies_house_api_key: var(ENV_COMPANIES_HOUSE_API_KEY),
            worker_key: var(ENV_WORKER_KEY),
            registry_base_url: var(ENV_REGISTRY_BASE_URL).unwrap_or(defaults.registry_base_url),
            worker_base_url: var(ENV_WORKER_BASE_URL).unwrap_or(defaults.worker_base_url),
            search_timeout: secs(ENV_SEARCH_TIMEOUT_SECS).unwrap_or(defaults.search_timeout),
            fetch_timeout: secs(ENV_FETCH_TIMEOUT_SECS).unwrap_or(defaults.fetch_timeout),
            user_agent: defaults.user_agent,
        }
    }

    pub fn with_companies_house_api_key(mut self, key: Option<String>) -> Self {
        self.companies_house_api_key = key.filter(|k| !k.is_empty());
        self
    }

    pub fn with_worker_key(mut self, key: Option<String>) -> Self {
        self.worker_key = key.filter(|k| !k.is_empty());
        self
    }

    pub fn with_registry_base_url(mut self, url: impl Into<String>) -> Self {
        self.registry_base_url = url.into();
        self
    }

    pub fn with_worker_base_url(mut self, url: impl Into<String>) -> Self {
        self.worker_base_url = url.into();
        self
    }

    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}
