use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::AssistantApi;
use crate::chat::conversation::{Conversation, Cursor};
use crate::chat::history::{HistoryPaginator, LoadOutcome};
use crate::chat::notice::{Notice, Notifier};
use crate::chat::send::{SendCoordinator, SendOutcome};
use crate::chat::session::{SessionMode, resolve_mode};
use crate::types::Message;

/// The embedded assistant widget.
///
/// Exactly one conversation is live at a time; an identity change
/// discards it and starts a fresh one in the resolved mode, along with a
/// fresh paginator (the fetch guard is per-conversation).
pub struct ChatWidget {
    api: Arc<dyn AssistantApi>,
    notifier: Arc<dyn Notifier>,
    identity: Option<String>,
    conversation: Conversation,
    paginator: HistoryPaginator,
    sender: SendCoordinator,
    open: bool,
    history_loaded: bool,
    sending: bool,
}

impl ChatWidget {
    pub fn new(api: Arc<dyn AssistantApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            identity: None,
            conversation: Conversation::ephemeral(),
            paginator: HistoryPaginator::new(),
            sender: SendCoordinator::new(),
            open: false,
            history_loaded: false,
            sending: false,
        }
    }

    /// Establish or clear the signed-in identity. Any change discards the
    /// current conversation and starts a fresh one; messages are never
    /// migrated between storage domains.
    pub fn set_identity(&mut self, identity: Option<String>) {
        if self.identity == identity {
            return;
        }
        let mode = resolve_mode(identity.as_deref());
        debug!(?mode, "identity changed, replacing conversation");
        self.identity = identity;
        self.conversation = Conversation::for_mode(mode);
        self.paginator = HistoryPaginator::new();
        self.history_loaded = false;
        self.sending = false;
    }

    pub fn mode(&self) -> SessionMode {
        self.conversation.mode()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Messages in storage order.
    pub fn messages(&self) -> &[Message] {
        self.conversation.store().messages()
    }

    /// Messages in presentation order (see `Conversation::display_messages`).
    pub fn display_messages(&self) -> Vec<&Message> {
        self.conversation.display_messages()
    }

    pub fn detected_language(&self) -> Option<&str> {
        self.conversation.detected_language()
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.conversation.cursor()
    }

    /// Open the widget. The first open of each conversation triggers the
    /// initial history load; the flag flips on the attempt, not the
    /// outcome, so a failed load is not retried on the next toggle.
    pub async fn open(&mut self) {
        self.open = true;
        if self.history_loaded {
            return;
        }
        self.history_loaded = true;
        if let Some(identity) = self.identity.clone() {
            if let Some(state) = self.conversation.persisted_state_mut() {
                self.paginator
                    .load_page(self.api.as_ref(), self.notifier.as_ref(), state, &identity, 1)
                    .await;
            }
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Send the composer contents. Re-entry while a send is outstanding is
    /// rejected here, mirroring the disabled composer in the web client.
    pub async fn send(&mut self, body: &str) -> SendOutcome {
        if self.sending {
            return SendOutcome::Rejected;
        }
        self.sending = true;
        let identity = self.identity.clone();
        let outcome = self
            .sender
            .send(
                self.api.as_ref(),
                self.notifier.as_ref(),
                &mut self.conversation,
                identity.as_deref(),
                body,
            )
            .await;
        self.sending = false;
        outcome
    }

    /// Request the next older history page. No-op for guests.
    pub async fn load_more(&mut self) -> LoadOutcome {
        let Some(identity) = self.identity.clone() else {
            return LoadOutcome::Skipped;
        };
        let Some(state) = self.conversation.persisted_state_mut() else {
            return LoadOutcome::Skipped;
        };
        let page = state.cursor.page_loaded + 1;
        self.paginator
            .load_page(self.api.as_ref(), self.notifier.as_ref(), state, &identity, page)
            .await
    }

    /// Delete all persisted history for the signed-in identity. Guests get
    /// a warning; there is nothing durable to clear for them.
    pub async fn clear_history(&mut self) {
        let identity = match (&self.identity, self.mode()) {
            (Some(identity), SessionMode::Persisted) => identity.clone(),
            _ => {
                self.notifier.notify(Notice::warning(
                    "Sign in to manage your conversation history.",
                ));
                return;
            }
        };
        match self.api.clear_history(&identity).await {
            Ok(()) => {
                self.conversation.store_mut().clear();
                if let Some(state) = self.conversation.persisted_state_mut() {
                    // Server history is gone; nothing further to paginate.
                    state.cursor = Cursor {
                        page_loaded: 0,
                        exhausted: true,
                    };
                }
                self.notifier.notify(Notice::success("Conversation deleted."));
            }
            Err(err) => {
                warn!(error = %err, "clear history failed");
                self.notifier
                    .notify(Notice::error("Could not delete the conversation."));
            }
        }
    }
}
