//! Endpoint configuration for the console API.
//!
//! The configuration is built once per invocation from environment
//! variables and passed by reference into every operation; the derived
//! URLs never change afterwards.
//!
//! Required variables: `CONSOLE_ORGANIZATION_ID` and `CONSOLE_API_KEY`.
//! `CONSOLE_HOST` is optional and defaults to `console`.

use anyhow::{Context, Result};
use std::env;

/// Connection details for one organization on the console.
#[derive(Debug, Clone)]
pub struct Config {
    pub console_host: String,
    pub organization_id: String,
    pub api_key: String,
    /// `https://{host}.snowplowanalytics.com/api/msc/v1/organizations/{org}`
    pub base_url: String,
    /// `{base_url}/data-structures/v1`
    pub ds_url: String,
}

impl Config {
    /// Derives the endpoint URLs from the host and organization id.
    pub fn new(host: &str, organization_id: &str, api_key: &str) -> Self {
        let base_url = format!(
            "https://{host}.snowplowanalytics.com/api/msc/v1/organizations/{organization_id}"
        );
        let ds_url = format!("{base_url}/data-structures/v1");
        Config {
            console_host: host.to_string(),
            organization_id: organization_id.to_string(),
            api_key: api_key.to_string(),
            base_url,
            ds_url,
        }
    }

    /// Builds the configuration from the `CONSOLE_*` environment variables.
    /// No network access; a missing required variable is a descriptive error.
    pub fn from_env() -> Result<Self> {
        let organization_id = env::var("CONSOLE_ORGANIZATION_ID")
            .context("environment variable CONSOLE_ORGANIZATION_ID is not set")?;
        let api_key = env::var("CONSOLE_API_KEY")
            .context("environment variable CONSOLE_API_KEY is not set")?;
        let host = env::var("CONSOLE_HOST").unwrap_or_else(|_| "console".to_string());
        Ok(Config::new(&host, &organization_id, &api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_urls_from_host_and_organization() {
        let config = Config::new("console", "CONSOLE_ID", "api-key");
        assert_eq!(
            config.base_url,
            "https://console.snowplowanalytics.com/api/msc/v1/organizations/CONSOLE_ID"
        );
        assert_eq!(
            config.ds_url,
            "https://console.snowplowanalytics.com/api/msc/v1/organizations/CONSOLE_ID/data-structures/v1"
        );
    }

    #[test]
    fn honors_a_custom_host() {
        let config = Config::new("next", "CONSOLE_ID", "api-key");
        assert!(config
            .base_url
            .starts_with("https://next.snowplowanalytics.com/"));
        assert_eq!(config.console_host, "next");
    }
}
