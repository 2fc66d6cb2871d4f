//! 聊天补全调用：校验、默认值、序列化、发送、反序列化，单次尝试。
//!
//! Chat completion invocation (single attempt).

use crate::client::builder::ChatClientBuilder;
use crate::client::types::CallContext;
use crate::codec;
use crate::transport::{Encoding, Transport};
use crate::types::{ChatCompletionOptions, ChatCompletionResponse};
use crate::{Error, Result};
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Token limit sent when the caller leaves `max_tokens` unset.
pub const DEFAULT_MAX_TOKENS: u32 = 512;

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Client for the chat completion endpoint.
///
/// Cheap to clone; clones share the transport (and its connection pool).
#[derive(Clone)]
pub struct ChatClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) base_url: String,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    pub fn builder() -> ChatClientBuilder {
        ChatClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Given a conversation, ask the model for one or more completions.
    ///
    /// Exactly one HTTP request is made, or none when the options fail
    /// validation. Errors identify the failing stage; nothing is retried.
    pub async fn chat_completion(
        &self,
        ctx: &CallContext,
        opts: &ChatCompletionOptions,
    ) -> Result<ChatCompletionResponse> {
        let invalid = opts.validate();
        if !invalid.is_empty() {
            return Err(Error::validation(invalid));
        }

        let request = opts.with_default_max_tokens(DEFAULT_MAX_TOKENS);
        let body = codec::marshal_json(&request)?;

        let url = format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH);
        let http_request = self
            .transport
            .new_request(Method::POST, &url, Encoding::Json, body);
        let request_id = http_request.request_id.clone();

        debug!(
            model = request.model.as_str(),
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            request_id = request_id.as_str(),
            url = url.as_str(),
            "sending chat completion request"
        );

        let start = std::time::Instant::now();
        let resp = ctx.run(self.transport.execute(http_request)).await?;
        let status = resp.status;
        let upstream_request_id =
            resp.header_first(&["x-request-id", "request-id", "openai-request-id"]);

        let resp = resp.error_for_status().map_err(|e| {
            warn!(
                http_status = status,
                request_id = request_id.as_str(),
                upstream_request_id = upstream_request_id.as_deref(),
                duration_ms = start.elapsed().as_millis() as u64,
                "chat completion request failed"
            );
            e
        })?;

        let result: ChatCompletionResponse = codec::unmarshal(&resp.body)?;

        info!(
            http_status = status,
            request_id = request_id.as_str(),
            upstream_request_id = upstream_request_id.as_deref(),
            choices = result.choices.len(),
            total_tokens = result.usage.total_tokens,
            duration_ms = start.elapsed().as_millis() as u64,
            "chat completion finished"
        );

        Ok(result)
    }

    /// [`ChatClient::chat_completion`] with a context that is never cancelled.
    pub async fn chat_completion_default(
        &self,
        opts: &ChatCompletionOptions,
    ) -> Result<ChatCompletionResponse> {
        self.chat_completion(&CallContext::background(), opts).await
    }
}
