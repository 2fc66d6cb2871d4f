//! Chat completion client.
//!
//! Developer-friendly goal: keep the public surface small and predictable.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod types;

pub use builder::ChatClientBuilder;
pub use core::{ChatClient, DEFAULT_MAX_TOKENS};
pub use types::CallContext;
pub use tokio_util::sync::CancellationToken;
