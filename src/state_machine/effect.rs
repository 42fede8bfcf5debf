//! Effects produced by state transitions

/// Effects to be executed after a state transition
///
/// The transition function stays pure; the session worker runs these
/// against the store and the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Greet the sender, registering them on first contact
    Greet,
    /// Send the command overview
    ShowHelp,
    /// Send the sender's recent searches
    ShowHistory,
    /// Send the sender's saved favorites
    ShowFavorites,
    /// Ask for the title the entered flow needs
    PromptTitle,
    /// Record the term in history, then search the catalog
    RunSearch { term: String },
    /// Save a title to favorites
    AddFavorite { title: String },
    /// Remove a title from favorites
    RemoveFavorite { title: String },
    /// Tell the sender free text means nothing right now
    HintIdle,
}

impl Effect {
    pub fn run_search(term: impl Into<String>) -> Self {
        Self::RunSearch { term: term.into() }
    }

    pub fn add_favorite(title: impl Into<String>) -> Self {
        Self::AddFavorite {
            title: title.into(),
        }
    }

    pub fn remove_favorite(title: impl Into<String>) -> Self {
        Self::RemoveFavorite {
            title: title.into(),
        }
    }
}
