use crate::client::core::ChatClient;
use crate::config::ClientConfig;
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builder for creating clients with custom configuration.
///
/// Starts from [`ClientConfig::from_env`]; explicit setters win.
pub struct ChatClientBuilder {
    config: ClientConfig,
    /// Injected transport (primarily for tests); bypasses the HTTP transport entirely.
    transport: Option<Arc<dyn Transport>>,
}

impl ChatClientBuilder {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::from_env())
    }

    /// Start from an explicit configuration instead of the environment.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    /// Base URL the endpoint path is appended to, e.g. `https://api.openai.com/v1`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.config.organization = Some(organization.into());
        self
    }

    /// Whole-request timeout enforced by the HTTP transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(proxy_url.into());
        self
    }

    /// Use a custom transport instead of the reqwest-backed one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ChatClient> {
        let base_url = normalize_base_url(&self.config.base_url)?;

        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };

        Ok(ChatClient {
            transport,
            base_url,
        })
    }
}

impl Default for ChatClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let invalid = |details: String| {
        Error::configuration_with_context(
            "invalid base URL",
            ErrorContext::new()
                .with_field_path("config.base_url")
                .with_details(details)
                .with_source("client_builder"),
        )
    };

    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| invalid(format!("{}: {}", trimmed, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
