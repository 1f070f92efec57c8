use std::collections::HashSet;

use time::OffsetDateTime;

use crate::types::{LocalId, Message, Origin, Role};

/// Number of body characters participating in the dedup key.
const DEDUP_BODY_PREFIX: usize = 50;

/// Heuristic message identity used when merging paginated history.
///
/// Server-confirmed rows do not carry the local id of their optimistic
/// counterpart, so equality is keyed on timestamp, role and a body prefix.
/// Two distinct messages sharing all three collide and the later one is
/// dropped; see DESIGN.md for why this is kept as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct DedupKey {
    timestamp: OffsetDateTime,
    role: Role,
    body_prefix: String,
}

impl DedupKey {
    fn of(message: &Message) -> Self {
        Self {
            timestamp: message.timestamp,
            role: message.role,
            body_prefix: message.body.chars().take(DEDUP_BODY_PREFIX).collect(),
        }
    }
}

/// Ordered, deduplicated collection of messages for one conversation.
///
/// Mutation is limited to appends at the end, pagination merges at the
/// end, and removal/confirmation of a single message by local id. Stored
/// messages are never reordered relative to each other.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append merge: freshly created messages (a just-sent message or its
    /// reply) go to the end with no dedup check.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Pagination merge: keep everything already stored, then take only
    /// the incoming rows whose key is not present yet. Relative order of
    /// both sides is preserved. Returns how many rows were actually added.
    pub fn merge_page(&mut self, incoming: Vec<Message>) -> usize {
        let mut seen: HashSet<DedupKey> = self.messages.iter().map(DedupKey::of).collect();
        let before = self.messages.len();
        for message in incoming {
            let key = DedupKey::of(&message);
            if seen.contains(&key) {
                continue;
            }
            seen.insert(key);
            self.messages.push(message);
        }
        self.messages.len() - before
    }

    /// Flip a message to confirmed once its originating send settles.
    pub fn confirm(&mut self, id: LocalId) -> bool {
        match self.messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                message.origin = Origin::Confirmed;
                true
            }
            None => false,
        }
    }

    /// Remove an optimistic message after its send failed.
    pub fn remove(&mut self, id: LocalId) -> Option<Message> {
        let index = self.messages.iter().position(|m| m.id == id)?;
        Some(self.messages.remove(index))
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
