//! # openai-chat
//!
//! 面向 OpenAI 兼容聊天补全接口的类型化客户端绑定。
//!
//! Typed client binding for the OpenAI-compatible chat completion endpoint.
//!
//! ## Overview
//!
//! A call builds a JSON request from [`ChatCompletionOptions`], issues one
//! `POST {base_url}/chat/completions`, and decodes the reply into a
//! [`ChatCompletionResponse`]. The pipeline is linear and the first failing
//! stage short-circuits the rest:
//!
//! 1. validate the options (no network call on failure)
//! 2. fill in [`DEFAULT_MAX_TOKENS`] when `max_tokens` is unset
//! 3. serialize
//! 4. send through the [`transport::Transport`], honouring the [`CallContext`]
//! 5. deserialize
//!
//! There is no retry, rate limiting or streaming; callers layer their own
//! policy on top using [`Error::stage`] and [`Error::is_retryable`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use openai_chat::{ChatClient, ChatCompletionOptions, ChatMessage, Model};
//!
//! #[tokio::main]
//! async fn main() -> openai_chat::Result<()> {
//!     let client = ChatClient::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let opts = ChatCompletionOptions::new(
//!         Model::GPT_3_5_TURBO,
//!         vec![ChatMessage::user("Hello, how are you?")],
//!     );
//!
//!     let resp = client.chat_completion_default(&opts).await?;
//!     println!("{}", resp.first_content().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder and call context |
//! | [`types`] | Request/response data types |
//! | [`transport`] | HTTP transport trait and reqwest implementation |
//! | [`codec`] | JSON encode/decode helpers |
//! | [`config`] | Environment-driven configuration |

pub mod client;
pub mod codec;
pub mod config;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{
    CallContext, CancellationToken, ChatClient, ChatClientBuilder, DEFAULT_MAX_TOKENS,
};
pub use config::ClientConfig;
pub use transport::{HttpTransport, Transport, TransportError};
pub use types::{
    ChatCompletionChoice, ChatCompletionOptions, ChatCompletionResponse, ChatMessage,
    FinishReason, MessageRole, Model, Usage,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, Stage};
