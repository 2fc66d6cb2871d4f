use crate::config::ClientConfig;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use keyring::Entry;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Proxy;
use tracing::{debug, warn};

use super::{HttpRequest, HttpResponse, Transport, TransportError};

const DEFAULT_USER_AGENT: &str = concat!("openai-chat/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed [`Transport`]. Owns the connection pool and injects auth headers.
pub struct HttpTransport {
    client: reqwest::Client,
    api_key: Option<String>,
    organization: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api_key = config.api_key.clone().or_else(Self::get_api_key);
        if api_key.is_none() {
            warn!("no API key configured; requests are sent without Authorization header");
        }

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(config.pool_idle_timeout))
            // One call, one request: a 3xx is reported, not replayed.
            .redirect(reqwest::redirect::Policy::none())
            // Conservative HTTP/2 keepalive defaults for long-lived connections.
            .http2_adaptive_window(true)
            .http2_keep_alive_interval(Some(std::time::Duration::from_secs(30)))
            .http2_keep_alive_timeout(std::time::Duration::from_secs(10));

        if let Some(proxy_url) = config.proxy_url.as_deref() {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid proxy URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("config.proxy_url")
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            Error::configuration_with_context(
                format!("failed to create HTTP client: {}", e),
                ErrorContext::new().with_source("http_transport"),
            )
        })?;

        debug!(
            timeout_secs = config.timeout.as_secs(),
            pool_max_idle_per_host = config.pool_max_idle_per_host,
            proxy = config.proxy_url.is_some(),
            "http transport configured"
        );

        Ok(Self {
            client,
            api_key,
            organization: config.organization.clone(),
        })
    }

    /// Fallback lookup in the OS keyring (service `openai`, user `api_key`).
    fn get_api_key() -> Option<String> {
        let entry = Entry::new("openai", "api_key").ok()?;
        entry.get_password().ok()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let mut req = self
            .client
            .request(request.method, &request.url)
            .header(CONTENT_TYPE, request.encoding.content_type())
            .header(USER_AGENT, DEFAULT_USER_AGENT)
            // Our own correlation id. Providers may ignore it.
            .header("x-request-id", &request.request_id)
            .body(request.body);

        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        if let Some(org) = &self.organization {
            req = req.header("OpenAI-Organization", org);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
