use async_trait::async_trait;
use serde::Deserialize;

use crate::types::Role;

// ============================================
// Error Types
// ============================================

/// Errors crossing the collaborator boundary.
///
/// Callers collapse all of these into "the operation failed"; the variants
/// exist for logging, not for branching.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("assistant endpoint error {status}: {body}")]
    Endpoint { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

pub type ChatResult<T> = Result<T, ChatError>;

// ============================================
// Wire Shapes
// ============================================

/// One raw transcript row as delivered by the history endpoint.
///
/// Every field is optional: the transcript may contain partial rows, and
/// those are dropped during validation in the paginator rather than
/// failing the whole page.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct HistoryEntry {
    pub role: Option<Role>,
    pub body: Option<String>,
    pub timestamp: Option<String>,
}

/// Response of the send endpoint. Both fields are optional; an empty
/// object is a successful send with nothing to show.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReply {
    pub reply_body: Option<String>,
    pub detected_language: Option<String>,
}

// ============================================
// Collaborator Operations
// ============================================

/// The three assistant operations the widget consumes.
///
/// `identity` is the durable user identity; it is absent for guest sends
/// and required for history access.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Retrieve one page of persisted history. Page 1 is the most recent
    /// slice; higher pages are strictly older.
    async fn fetch_history(
        &self,
        identity: &str,
        page: u64,
        page_size: usize,
    ) -> ChatResult<Vec<HistoryEntry>>;

    /// Submit a message and wait for the assistant's reply.
    async fn send_message(&self, identity: Option<&str>, body: &str) -> ChatResult<SendReply>;

    /// Delete all persisted history for `identity`. Idempotent.
    async fn clear_history(&self, identity: &str) -> ChatResult<()>;
}
