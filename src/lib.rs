//! Coursemate assistant widget core.
//!
//! The embedded support-assistant chat widget for the Coursemate course
//! marketplace: dual conversation lifecycles (guest vs. signed-in),
//! backward history pagination with deduplicating merges, and optimistic
//! sends with rollback. Everything UI-shaped (layout, markdown rendering,
//! toast presentation) stays in the host application; this crate owns the
//! conversation state and the collaborator protocol.

pub mod api;
pub mod chat;
pub mod types;
