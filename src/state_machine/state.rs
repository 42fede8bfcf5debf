//! Conversation state definitions

/// Per-user conversation state
///
/// Ephemeral by design: held only by the user's session worker, reset to
/// `Idle` on restart. A non-idle state means the next free-text message
/// belongs to a pending flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConvState {
    /// Nothing pending; free text is not part of any flow
    #[default]
    Idle,
    /// Waiting for a search term
    AwaitingSearchTitle,
    /// Waiting for a title to add to favorites
    AwaitingAddFavoriteTitle,
    /// Waiting for a title to remove from favorites
    AwaitingRemoveFavoriteTitle,
}

impl ConvState {
    /// True when a flow is waiting for a follow-up message
    #[allow(dead_code)] // Used in tests
    pub fn is_awaiting(self) -> bool {
        self != Self::Idle
    }
}
