/*
[INPUT]:  YAML configuration file and environment
[OUTPUT]: Parsed client configuration
[POS]:    Configuration layer - client setup
[UPDATE]: When adding new configuration options
*/

use std::time::Duration;

use anyhow::{Context, bail};
use bitpanda_adapter::{API_BASE, BitpandaClient, ClientConfig, Credentials};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable that overrides `api_token` from the file
pub const API_TOKEN_ENV: &str = "BITPANDA_API_TOKEN";

/// Top-level configuration for the CLI
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// REST base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Bearer token for account and trading commands
    #[serde(default)]
    pub api_token: Option<String>,
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_token: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_api_base() -> String {
    API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the file token with `token` when one is given
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.api_token = Some(token);
        }
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let api_base = Url::parse(&self.api_base)
            .with_context(|| format!("api_base is not a valid URL: {:?}", self.api_base))?;
        if api_base.cannot_be_a_base() || !matches!(api_base.scheme(), "http" | "https") {
            bail!("api_base must be an http(s) base URL, got {:?}", self.api_base);
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if self.connect_timeout_secs == 0 {
            bail!("connect_timeout_secs must be greater than zero");
        }
        if self.connect_timeout_secs > self.timeout_secs {
            bail!("connect_timeout_secs must not exceed timeout_secs");
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            ..ClientConfig::default()
        }
    }

    pub fn build_client(&self) -> anyhow::Result<BitpandaClient> {
        let mut client =
            BitpandaClient::with_config(self.client_config()).context("build HTTP client")?;
        if let Some(token) = &self.api_token {
            client.set_credentials(Credentials::new(token.clone()));
        }
        Ok(client)
    }
}
