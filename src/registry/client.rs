//! Companies House registry API client

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header::AUTHORIZATION, StatusCode, Url};
use serde_json::Value;

use crate::config::{Config, ENV_COMPANIES_HOUSE_API_KEY};
use crate::error::{error_chain, NorthernError, Result};

/// `Authorization` value for a registry API key (key as user, empty password)
pub fn basic_auth_header(api_key: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:", api_key)))
}

/// Client for company profile lookups
#[derive(Clone)]
pub struct RegistryClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RegistryClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.registry_base_url.clone(),
            api_key: config.companies_house_api_key.clone(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// `<base>/company/<company_number>`, with the number encoded as one path segment
    pub fn company_url(&self, company_number: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            NorthernError::Config(format!("invalid registry base URL {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                NorthernError::Config(format!(
                    "registry base URL {} cannot be a base",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("company")
            .push(company_number);
        Ok(url)
    }

    /// Fetch a company profile, returning the upstream status and JSON body as-is
    pub async fn company_profile(&self, company_number: &str) -> Result<(StatusCode, Value)> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            NorthernError::Config(format!("{} is not set", ENV_COMPANIES_HOUSE_API_KEY))
        })?;
        let url = self.company_url(company_number)?;

        tracing::debug!(company_number, "Registry lookup");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, basic_auth_header(api_key))
            .send()
            .await
            .map_err(|e| NorthernError::Upstream(error_chain(&e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| NorthernError::Upstream(error_chain(&e)))?;
        let body = serde_json::from_str::<Value>(&text)
            .map_err(|e| NorthernError::InvalidUpstreamBody(e.to_string()))?;

        Ok((status, body))
    }
}
