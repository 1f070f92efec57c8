/// Conversation lifecycle implied by the current identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    /// Guest session; messages live only in memory for this client session.
    Ephemeral,
    /// Identity-bound session backed by retrievable history.
    Persisted,
}

/// Pure mode resolution from the current identity. A blank identity counts
/// as absent.
pub fn resolve_mode(identity: Option<&str>) -> SessionMode {
    match identity {
        Some(id) if !id.trim().is_empty() => SessionMode::Persisted,
        _ => SessionMode::Ephemeral,
    }
}
