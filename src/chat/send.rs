use tracing::{debug, warn};

use crate::api::AssistantApi;
use crate::chat::conversation::Conversation;
use crate::chat::notice::{Notice, Notifier};
use crate::chat::session::SessionMode;
use crate::chat::store::MessageStore;
use crate::types::{LocalId, Message};

/// Result of a [`SendCoordinator::send`] attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, or a send was already outstanding; nothing happened.
    Rejected,
    /// The send settled; `replied` is true when an assistant reply was
    /// appended.
    Sent { replied: bool },
    /// The send failed and the optimistic message was rolled back.
    Failed,
}

/// Reified in-flight send: the optimistic message's local id, enough to
/// confirm or undo the insertion in one step.
#[derive(Clone, Copy, Debug)]
struct PendingSend {
    local_id: LocalId,
}

impl PendingSend {
    fn begin(store: &mut MessageStore, body: &str) -> Self {
        let message = Message::optimistic_user(body);
        let local_id = message.id;
        store.append(message);
        Self { local_id }
    }

    fn commit(self, store: &mut MessageStore) {
        store.confirm(self.local_id);
    }

    fn abort(self, store: &mut MessageStore) {
        store.remove(self.local_id);
    }
}

/// Optimistic send protocol: insert locally, call the assistant, then
/// either confirm (and append the reply) or roll back.
#[derive(Debug, Default)]
pub struct SendCoordinator;

impl SendCoordinator {
    pub fn new() -> Self {
        Self
    }

    /// Send `body` on the given conversation. The optimistic user message
    /// is appended before the network call starts, so it is visible
    /// immediately; store mutation on the way out happens synchronously in
    /// the resuming continuation.
    pub async fn send(
        &self,
        api: &dyn AssistantApi,
        notifier: &dyn Notifier,
        conversation: &mut Conversation,
        identity: Option<&str>,
        body: &str,
    ) -> SendOutcome {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return SendOutcome::Rejected;
        }

        let pending = PendingSend::begin(conversation.store_mut(), trimmed);

        // Identity travels only for persisted conversations.
        let identity = match conversation.mode() {
            SessionMode::Persisted => identity,
            SessionMode::Ephemeral => None,
        };

        match api.send_message(identity, trimmed).await {
            Ok(reply) => {
                pending.commit(conversation.store_mut());
                if let Some(language) = reply.detected_language {
                    conversation.set_detected_language(language);
                }
                let replied = match reply.reply_body {
                    Some(text) => {
                        conversation
                            .store_mut()
                            .append(Message::confirmed_assistant(text));
                        true
                    }
                    None => false,
                };
                debug!(replied, "send confirmed");
                SendOutcome::Sent { replied }
            }
            Err(err) => {
                warn!(error = %err, "send failed, rolling back optimistic message");
                pending.abort(conversation.store_mut());
                notifier.notify(Notice::error("Failed to send message."));
                SendOutcome::Failed
            }
        }
    }
}
