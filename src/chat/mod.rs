//! Assistant chat widget core.
//!
//! One conversation is live at a time, tagged by session mode: guest
//! conversations are ephemeral and in-memory only, signed-in conversations
//! are backed by paginated history on the collaborator backend.
//!
//! # Architecture
//!
//! - `session` - ephemeral vs. persisted mode resolution
//! - `guard` - single-flight latch for history fetches
//! - `store` - ordered, deduplicated message collection
//! - `conversation` - per-identity container, tagged by mode
//! - `history` - backward pagination of persisted history
//! - `send` - optimistic send with rollback
//! - `notice` - user-visible notifications
//! - `widget` - open/close lifecycle and identity changes

mod conversation;
mod guard;
mod history;
mod notice;
mod send;
mod session;
mod store;
mod widget;

pub use conversation::{Conversation, Cursor, PersistedState};
pub use guard::{FetchGuard, FetchPermit};
pub use history::{HistoryPaginator, LoadOutcome, PAGE_SIZE};
pub use notice::{LogNotifier, Notice, NoticeLevel, Notifier};
pub use send::{SendCoordinator, SendOutcome};
pub use session::{SessionMode, resolve_mode};
pub use store::MessageStore;
pub use widget::ChatWidget;
