/*
[INPUT]:  HTTP configuration (base URL, timeouts, API token)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::http::{ApiError, BitpandaError, Result};

/// Base URL of the public Bitpanda Global Exchange REST API
pub const API_BASE: &str = "https://api.exchange.bitpanda.com/public/v1";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Credentials for account and trading endpoints
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
}

impl Credentials {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Main HTTP client for the Bitpanda exchange API
///
/// `reqwest::Client` is internally reference counted and safe to share, so
/// requests are issued without any client-level lock; wrap the client in an
/// `Arc` to use it from several tasks.
#[derive(Debug, Clone)]
pub struct BitpandaClient {
    http_client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl BitpandaClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http_client,
            base_url: parse_base_url(&config.base_url)?,
            credentials: None,
        })
    }

    /// Create a new client with custom configuration against another host
    pub fn with_config_and_base_url(mut config: ClientConfig, base_url: &str) -> Result<Self> {
        config.base_url = base_url.to_string();
        Self::with_config(config)
    }

    /// Create a default client that authenticates with `api_token`
    pub fn with_token(api_token: impl Into<String>) -> Result<Self> {
        let mut client = Self::new()?;
        client.set_credentials(Credentials::new(api_token));
        Ok(client)
    }

    /// Set credentials for authenticated requests
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL for `path` below the base URL
    ///
    /// Each element is one path segment and is percent-encoded, so ids cannot
    /// add segments or a query string.
    fn endpoint_url(&self, path: &[&str]) -> Result<Url> {
        if let Some(segment) = path
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(BitpandaError::InvalidRequest(format!(
                "invalid path segment {segment:?} in /{}",
                path.join("/")
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                BitpandaError::Config(format!("base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    /// Build request builder for public endpoints
    pub(crate) fn public_request(&self, method: Method, path: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint_url(path)?;
        Ok(self.http_client.request(method, url))
    }

    /// Build request builder for endpoints that need the bearer token
    pub(crate) fn private_request(&self, method: Method, path: &[&str]) -> Result<RequestBuilder> {
        let credentials =
            self.credentials
                .as_ref()
                .ok_or_else(|| BitpandaError::Authentication {
                    message: format!("API token required for {method} /{}", path.join("/")),
                })?;
        let builder = self.public_request(method, path)?;
        Ok(builder.bearer_auth(&credentials.api_token))
    }

    /// Send a request and decode the JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let body = self.send(builder).await?;
        serde_json::from_str(&body).map_err(|source| BitpandaError::Decode { source, body })
    }

    /// Send a request whose success response carries no body
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await.map(|_| ())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<String> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        debug!(%method, %url, status = status.as_u16(), bytes = body.len(), "response received");

        if status.is_success() {
            return Ok(body);
        }

        let error = ApiError::from_parts(status, headers, body);
        warn!(%method, %url, status = status.as_u16(), message = %error.message, "API request failed");
        Err(BitpandaError::Api(Box::new(error)))
    }
}

/// Parse the base URL so that relative endpoints are appended to its path.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(BitpandaError::Config(format!("base URL cannot be a base: {raw}")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
