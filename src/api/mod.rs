//! Collaborator boundary for the assistant widget.
//!
//! The assistant's reasoning and its storage format are opaque remote
//! concerns; the widget only needs three operations plus error
//! propagation:
//!
//! - `client` - the `AssistantApi` trait and boundary error type
//! - `http` - the `reqwest`-backed implementation, configured from the
//!   environment
//!
//! # Usage
//!
//! ```rust,no_run
//! use coursemate::api::{AssistantApi, HttpAssistantApi};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let api = HttpAssistantApi::from_env()?;
//! let reply = api.send_message(None, "Hello!").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod http;

pub use client::{AssistantApi, ChatError, ChatResult, HistoryEntry, SendReply};
pub use http::HttpAssistantApi;
