use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, warn};

use crate::api::{AssistantApi, HistoryEntry};
use crate::chat::conversation::PersistedState;
use crate::chat::guard::FetchGuard;
use crate::chat::notice::{Notice, Notifier};
use crate::types::Message;

/// Fixed page size for backward history retrieval.
pub const PAGE_SIZE: usize = 20;

/// Result of a [`HistoryPaginator::load_page`] attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was fetched; `merged` rows survived validation and dedup.
    Loaded { merged: usize },
    /// Rejected at the call site: a fetch was already in flight, the
    /// cursor is exhausted, or the page number is zero.
    Skipped,
    /// The fetch failed; the cursor is now exhausted and the user was
    /// notified.
    Failed,
}

/// Backward pagination of persisted history.
///
/// Page 1 is the most recent slice; each following page is strictly
/// older. Exactly one fetch may be in flight per conversation, enforced
/// by the embedded guard.
#[derive(Debug, Default)]
pub struct HistoryPaginator {
    guard: FetchGuard,
}

impl HistoryPaginator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guard(&self) -> &FetchGuard {
        &self.guard
    }

    /// Load one page of history into the conversation.
    ///
    /// No-op (not queued, not an error) when a history fetch is already in
    /// flight, when pagination is exhausted, or when `page` is zero. On
    /// failure the cursor is exhausted; page 1 additionally clears the
    /// store, since there is no usable history to show.
    pub async fn load_page(
        &self,
        api: &dyn AssistantApi,
        notifier: &dyn Notifier,
        state: &mut PersistedState,
        identity: &str,
        page: u64,
    ) -> LoadOutcome {
        if page == 0 || state.cursor.exhausted {
            return LoadOutcome::Skipped;
        }
        let Some(_permit) = self.guard.try_acquire() else {
            debug!(page, "history fetch already in flight, skipping");
            return LoadOutcome::Skipped;
        };

        match api.fetch_history(identity, page, PAGE_SIZE).await {
            Ok(items) => {
                // The backend signals exhaustion with a short page, counted
                // before validation drops malformed rows.
                let received = items.len();
                let batch: Vec<Message> = items.into_iter().filter_map(validate_entry).collect();
                let merged = state.store.merge_page(batch);
                state.cursor.page_loaded = page;
                state.cursor.exhausted = received < PAGE_SIZE;
                debug!(
                    page,
                    received,
                    merged,
                    exhausted = state.cursor.exhausted,
                    "history page loaded"
                );
                LoadOutcome::Loaded { merged }
            }
            Err(err) => {
                warn!(page, error = %err, "history fetch failed");
                if page == 1 {
                    state.store.clear();
                }
                state.cursor.exhausted = true;
                notifier.notify(Notice::error("Failed to load conversation history."));
                LoadOutcome::Failed
            }
        }
    }
}

/// Drop transcript rows with a missing role, body or timestamp, or a
/// timestamp that does not parse as an RFC 3339 instant.
fn validate_entry(entry: HistoryEntry) -> Option<Message> {
    let role = entry.role?;
    let body = entry.body?;
    let timestamp = OffsetDateTime::parse(entry.timestamp.as_deref()?, &Rfc3339).ok()?;
    Some(Message::confirmed(role, body, timestamp))
}
