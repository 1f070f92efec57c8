use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Whether a message has been acknowledged by the backend yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Inserted locally ahead of the network call; either confirmed or
    /// rolled back once that call settles.
    Optimistic,
    Confirmed,
}

/// Locally assigned message identity, stable for the lifetime of the
/// process. The backend does not echo ids back, so this is what rollback
/// and confirmation key on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocalId(u64);

static NEXT_LOCAL_ID: AtomicU64 = AtomicU64::new(1);

impl LocalId {
    pub fn next() -> Self {
        Self(NEXT_LOCAL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub id: LocalId,
    pub role: Role,
    pub body: String,
    pub timestamp: OffsetDateTime,
    pub origin: Origin,
}

impl Message {
    /// A just-composed user message, timestamped locally.
    pub fn optimistic_user(body: impl Into<String>) -> Self {
        Self {
            id: LocalId::next(),
            role: Role::User,
            body: body.into(),
            timestamp: OffsetDateTime::now_utc(),
            origin: Origin::Optimistic,
        }
    }

    /// An assistant reply, already acknowledged by virtue of arriving.
    pub fn confirmed_assistant(body: impl Into<String>) -> Self {
        Self {
            id: LocalId::next(),
            role: Role::Assistant,
            body: body.into(),
            timestamp: OffsetDateTime::now_utc(),
            origin: Origin::Confirmed,
        }
    }

    /// A message reconstructed from persisted history, carrying the
    /// server-side timestamp.
    pub fn confirmed(role: Role, body: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self {
            id: LocalId::next(),
            role,
            body: body.into(),
            timestamp,
            origin: Origin::Confirmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ids_are_unique() {
        let a = LocalId::next();
        let b = LocalId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
    }
}
