use crate::chat::session::SessionMode;
use crate::chat::store::MessageStore;
use crate::types::Message;

/// Pagination progress for a persisted conversation. `exhausted` is
/// terminal: once set, no further backward fetch is attempted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub page_loaded: u64,
    pub exhausted: bool,
}

/// Message store plus pagination state for an identity-bound conversation.
#[derive(Debug, Default)]
pub struct PersistedState {
    pub store: MessageStore,
    pub cursor: Cursor,
}

#[derive(Debug)]
enum ConversationState {
    Ephemeral(MessageStore),
    Persisted(PersistedState),
}

/// Container for the active conversation.
///
/// The mode is fixed at construction; switching modes always builds a new
/// `Conversation`, so ephemeral messages never leak into a persisted one
/// or vice versa. The variant split also keeps pagination unreachable for
/// guest conversations.
#[derive(Debug)]
pub struct Conversation {
    state: ConversationState,
    detected_language: Option<String>,
}

impl Conversation {
    pub fn ephemeral() -> Self {
        Self {
            state: ConversationState::Ephemeral(MessageStore::new()),
            detected_language: None,
        }
    }

    pub fn persisted() -> Self {
        Self {
            state: ConversationState::Persisted(PersistedState::default()),
            detected_language: None,
        }
    }

    pub fn for_mode(mode: SessionMode) -> Self {
        match mode {
            SessionMode::Ephemeral => Self::ephemeral(),
            SessionMode::Persisted => Self::persisted(),
        }
    }

    pub fn mode(&self) -> SessionMode {
        match &self.state {
            ConversationState::Ephemeral(_) => SessionMode::Ephemeral,
            ConversationState::Persisted(_) => SessionMode::Persisted,
        }
    }

    pub fn store(&self) -> &MessageStore {
        match &self.state {
            ConversationState::Ephemeral(store) => store,
            ConversationState::Persisted(state) => &state.store,
        }
    }

    pub fn store_mut(&mut self) -> &mut MessageStore {
        match &mut self.state {
            ConversationState::Ephemeral(store) => store,
            ConversationState::Persisted(state) => &mut state.store,
        }
    }

    /// Pagination state; `None` for ephemeral conversations, which have no
    /// retrievable history.
    pub fn persisted_state(&self) -> Option<&PersistedState> {
        match &self.state {
            ConversationState::Ephemeral(_) => None,
            ConversationState::Persisted(state) => Some(state),
        }
    }

    pub fn persisted_state_mut(&mut self) -> Option<&mut PersistedState> {
        match &mut self.state {
            ConversationState::Ephemeral(_) => None,
            ConversationState::Persisted(state) => Some(state),
        }
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.persisted_state().map(|state| state.cursor)
    }

    /// Advisory language tag from the assistant's last reply.
    pub fn detected_language(&self) -> Option<&str> {
        self.detected_language.as_deref()
    }

    pub fn set_detected_language(&mut self, language: impl Into<String>) {
        self.detected_language = Some(language.into());
    }

    /// Messages in presentation order. Persisted history is stored
    /// newest-first as the backend delivers it, so it renders reversed;
    /// ephemeral messages are already stored oldest-first.
    pub fn display_messages(&self) -> Vec<&Message> {
        let messages = self.store().messages();
        match self.mode() {
            SessionMode::Ephemeral => messages.iter().collect(),
            SessionMode::Persisted => messages.iter().rev().collect(),
        }
    }
}
