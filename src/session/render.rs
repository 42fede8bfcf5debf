//! Reply rendering
//!
//! Every string a user sees is produced here.

use crate::catalog::SearchResult;
use crate::db::{Favorite, HistoryEntry};
use crate::state_machine::Command;
use serde::{Deserialize, Serialize};

/// At most this many search matches are shown
const MAX_RESULTS: usize = 10;

pub const NOT_REGISTERED: &str = "You are not registered.";
pub const SERVER_ERROR: &str = "Server error. Please try again later.";
pub const PROMPT_TITLE: &str = "Enter a game title";
pub const FAVORITE_ADDED: &str = "Game added to favorites!";
pub const NO_FAVORITES: &str = "You have no favorite games yet!";
pub const NO_HISTORY: &str = "You have no search history yet!";
pub const IDLE_HINT: &str = "I did not understand that. Use the menu buttons or /help.";

pub const HELP: &str = "/start - start and register\n\
/help - this overview\n\
/search_game - search the catalog for a game\n\
/history - your recent searches\n\
/favorites - your saved games\n\
/add_favorite - save a game by title\n\
/remove_favorite - remove a saved game";

const HISTORY_HEADER: &str = "Search history:";

/// One outbound message, optionally carrying the menu keyboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyboard: Option<Vec<Vec<String>>>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_menu(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(main_menu()),
        }
    }
}

/// Button rows of the main menu; labels parse back to their commands
pub fn main_menu() -> Vec<Vec<String>> {
    [
        [Command::SearchGame, Command::Help],
        [Command::History, Command::Favorites],
        [Command::AddFavorite, Command::RemoveFavorite],
    ]
    .iter()
    .map(|row| row.iter().map(|c| c.label().to_string()).collect())
    .collect()
}

pub fn greeting(username: &str) -> String {
    format!("Hi {username}")
}

pub fn registered_greeting(username: &str) -> String {
    format!("Hi {username}, you are registered now")
}

pub fn favorite_removed(title: &str) -> String {
    format!("Game {title} removed!")
}

pub fn favorite_missing(title: &str) -> String {
    format!("Game {title} is not in your favorites!")
}

pub fn no_results(term: &str) -> String {
    format!("Sorry, no games found with that title - {term}")
}

/// Search matches as delimiter-separated blocks, at most `MAX_RESULTS`
///
/// The delimiter line is as wide as the longest block.
pub fn search_results(term: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return no_results(term);
    }

    let blocks: Vec<String> = results
        .iter()
        .take(MAX_RESULTS)
        .map(|game| {
            format!(
                "Title: {}\nRelease date: {}\nPrice: {}\nID: {}",
                game.title,
                game.release_date.as_deref().unwrap_or("-"),
                game.price,
                game.app_id
            )
        })
        .collect();

    let width = blocks.iter().map(|b| b.chars().count()).max().unwrap_or(0);
    let delimiter = format!("\n*{}*\n", "-".repeat(width));
    blocks.join(&delimiter)
}

/// Numbered history lines, newest first
pub fn history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return NO_HISTORY.to_string();
    }

    let mut lines = vec![HISTORY_HEADER.to_string()];
    for (i, entry) in entries.iter().enumerate() {
        lines.push(format!(
            "{}: {}. {}",
            i + 1,
            entry.title,
            entry.timestamp.format("%d.%m.%Y %H:%M:%S")
        ));
    }
    lines.join("\n")
}

/// Numbered favorite titles, newest first
pub fn favorites(entries: &[Favorite]) -> String {
    if entries.is_empty() {
        return NO_FAVORITES.to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, favorite)| format!("{}. {}", i + 1, favorite.title))
        .collect::<Vec<_>>()
        .join("\n")
}
