//! Events that drive the conversation state machine

/// Chat commands, one per menu entry point
///
/// Each command has two spellings: the slash form and the menu-button
/// label. Both parse to the same variant, so buttons and typed commands
/// cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    History,
    Favorites,
    SearchGame,
    AddFavorite,
    RemoveFavorite,
}

impl Command {
    /// Parse a command or its equivalent button label
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "/start" => Some(Self::Start),
            "/help" | "Help" => Some(Self::Help),
            "/history" | "Search history" => Some(Self::History),
            "/favorites" | "Favorites" => Some(Self::Favorites),
            "/search_game" | "Search game" => Some(Self::SearchGame),
            "/add_favorite" | "Add favorite" => Some(Self::AddFavorite),
            "/remove_favorite" | "Remove favorite" => Some(Self::RemoveFavorite),
            _ => None,
        }
    }

    /// Menu-button label; always parses back to the same command
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "/start",
            Self::Help => "Help",
            Self::History => "Search history",
            Self::Favorites => "Favorites",
            Self::SearchGame => "Search game",
            Self::AddFavorite => "Add favorite",
            Self::RemoveFavorite => "Remove favorite",
        }
    }
}

/// One inbound chat message, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A recognized command or button press
    Command(Command),
    /// Free text, meaningful only to a waiting flow
    Text(String),
}

impl Event {
    /// Classify a raw message
    ///
    /// Leading and trailing whitespace never changes the meaning of a
    /// message.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        Command::parse(trimmed).map_or_else(|| Self::Text(trimmed.to_string()), Self::Command)
    }
}
