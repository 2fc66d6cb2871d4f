//! 类型系统模块：聊天补全请求与响应的数据类型。
//!
//! # Types Module
//!
//! Strongly-typed representations of the chat completion wire format.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ChatCompletionOptions`] | Outbound request payload |
//! | [`ChatMessage`] | One role-tagged turn in a conversation |
//! | [`Model`] | Backend model identifier |
//! | [`ChatCompletionResponse`] | Decoded reply with choices and usage |
//!
//! ## Example
//!
//! ```rust
//! use openai_chat::types::{ChatCompletionOptions, ChatMessage, Model};
//!
//! let opts = ChatCompletionOptions::new(
//!     Model::GPT_3_5_TURBO,
//!     vec![
//!         ChatMessage::system("You are a helpful assistant"),
//!         ChatMessage::user("What's the weather?"),
//!     ],
//! )
//! .temperature(0.2)
//! .stop(["\n\n"]);
//!
//! assert!(opts.validate().is_empty());
//! ```

pub mod message;
pub mod model;
pub mod options;
pub mod response;

pub use message::{ChatMessage, MessageRole};
pub use model::Model;
pub use options::ChatCompletionOptions;
pub use response::{ChatCompletionChoice, ChatCompletionResponse, FinishReason, Usage};
