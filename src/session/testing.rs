//! Mock implementations for testing
//!
//! These mocks enable full session testing without real I/O.

use super::{Reply, SessionManager};
use crate::catalog::{Catalog, GameDetail, SearchResult};
use crate::db::Database;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Catalog
// ============================================================================

/// Mock catalog that returns queued search results
pub struct MockCatalog {
    results: Mutex<VecDeque<Vec<SearchResult>>>,
    /// Record of all searches made
    pub searches: Mutex<Vec<(String, u32)>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            searches: Mutex::new(Vec::new()),
        }
    }

    /// Queue one search response; unqueued searches return no matches
    pub fn queue_results(&self, results: Vec<SearchResult>) {
        self.results.lock().unwrap().push_back(results);
    }

    /// Get recorded searches as (term, page)
    pub fn recorded_searches(&self) -> Vec<(String, u32)> {
        self.searches.lock().unwrap().clone()
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn search(&self, term: &str, page: u32) -> Vec<SearchResult> {
        self.searches.lock().unwrap().push((term.to_string(), page));
        self.results.lock().unwrap().pop_front().unwrap_or_default()
    }

    async fn get_detail(&self, _app_id: i64) -> Option<GameDetail> {
        // Session flows never fetch details
        None
    }
}

/// Build a search result with only the fields tests care about
pub fn sample_result(app_id: i64, title: &str) -> SearchResult {
    SearchResult {
        app_id,
        title: title.to_string(),
        store_url: "-".to_string(),
        image_url: None,
        release_date: Some("1998".to_string()),
        price: "9.99".to_string(),
    }
}

// ============================================================================
// Test Session
// ============================================================================

/// Full session stack over an in-memory store and a scripted catalog
pub struct TestSession {
    pub manager: SessionManager,
    pub db: Database,
    pub catalog: Arc<MockCatalog>,
}

impl TestSession {
    pub fn new() -> Self {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let catalog = Arc::new(MockCatalog::new());
        let manager = SessionManager::new(db.clone(), catalog.clone());
        Self {
            manager,
            db,
            catalog,
        }
    }

    pub async fn send(&self, username: &str, text: &str) -> Vec<Reply> {
        self.manager
            .handle_message(username, text)
            .await
            .expect("Message handling failed")
    }

    /// Send and unwrap the single expected reply
    pub async fn send_one(&self, username: &str, text: &str) -> Reply {
        let mut replies = self.send(username, text).await;
        assert_eq!(replies.len(), 1, "Expected exactly one reply");
        replies.remove(0)
    }
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_start_registers_user() {
        let session = TestSession::new();

        let reply = session.send_one("alice", "/start").await;
        assert_eq!(reply.text, "Hi alice, you are registered now");
        assert!(reply.keyboard.is_some(), "Greeting should carry the menu");

        assert!(session.db.get_user("alice").unwrap().is_some());

        // Second start greets without re-registering
        let reply = session.send_one("alice", "/start").await;
        assert_eq!(reply.text, "Hi alice");
    }

    #[tokio::test]
    async fn test_guarded_command_without_registration() {
        let session = TestSession::new();

        let reply = session.send_one("ghost", "/favorites").await;
        assert_eq!(reply.text, "You are not registered.");

        // No store mutation of any kind
        assert!(session.db.get_user("ghost").unwrap().is_none());
        assert!(session.db.list_history("ghost", 10).unwrap().is_empty());
        assert_eq!(session.db.count_favorites("ghost").unwrap(), 0);
    }

    #[tokio::test]
    async fn test_free_text_requires_registration_too() {
        let session = TestSession::new();

        let reply = session.send_one("ghost", "Portal").await;
        assert_eq!(reply.text, "You are not registered.");
        assert!(session.db.get_user("ghost").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_help_is_open_to_everyone() {
        let session = TestSession::new();

        let reply = session.send_one("ghost", "/help").await;
        assert!(reply.text.starts_with("/start"));
        assert!(reply.text.contains("/search_game"));

        // Help alone does not register anyone
        assert!(session.db.get_user("ghost").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_flow_records_history_once() {
        let session = TestSession::new();
        session.send("alice", "/start").await;
        session
            .catalog
            .queue_results(vec![sample_result(400, "Portal")]);

        let reply = session.send_one("alice", "/search_game").await;
        assert_eq!(reply.text, "Enter a game title");

        let reply = session.send_one("alice", "Portal").await;
        assert!(reply.text.contains("Title: Portal"));
        assert!(reply.text.contains("Price: 9.99"));

        assert_eq!(session.catalog.recorded_searches(), vec![("Portal".to_string(), 1)]);

        let history = session.db.list_history("alice", 10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].title, "Portal");
    }

    #[tokio::test]
    async fn test_empty_search_still_records_and_clears_state() {
        let session = TestSession::new();
        session.send("alice", "/start").await;

        session.send("alice", "/search_game").await;
        let reply = session.send_one("alice", "Dune").await;
        assert_eq!(reply.text, "Sorry, no games found with that title - Dune");

        let history = session.db.list_history("alice", 10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].title, "Dune");

        // The flow is over: the same text is now plain free text
        let reply = session.send_one("alice", "Dune").await;
        assert_eq!(reply.text, "I did not understand that. Use the menu buttons or /help.");
        assert_eq!(session.db.list_history("alice", 10).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_and_remove_favorite_flow() {
        let session = TestSession::new();
        session.send("alice", "/start").await;

        let reply = session.send_one("alice", "/add_favorite").await;
        assert_eq!(reply.text, "Enter a game title");

        let reply = session.send_one("alice", "Portal 2").await;
        assert_eq!(reply.text, "Game added to favorites!");
        assert_eq!(session.db.count_favorites("alice").unwrap(), 1);

        session.send("alice", "/remove_favorite").await;
        let reply = session.send_one("alice", "Portal 2").await;
        assert_eq!(reply.text, "Game Portal 2 removed!");
        assert_eq!(session.db.count_favorites("alice").unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_favorite_state_clears_after_reply() {
        let session = TestSession::new();
        session.send("alice", "/start").await;

        session.send("alice", "/add_favorite").await;
        session.send("alice", "Portal 2").await;

        // A second title must not silently become another favorite
        let reply = session.send_one("alice", "Dota 2").await;
        assert_eq!(reply.text, "I did not understand that. Use the menu buttons or /help.");
        assert_eq!(session.db.count_favorites("alice").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_favorite_reports_title() {
        let session = TestSession::new();
        session.send("alice", "/start").await;

        session.send("alice", "/remove_favorite").await;
        let reply = session.send_one("alice", "Dota 2").await;
        assert_eq!(reply.text, "Game Dota 2 is not in your favorites!");
    }

    #[tokio::test]
    async fn test_command_preempts_waiting_flow() {
        let session = TestSession::new();
        session.send("alice", "/start").await;

        session.send("alice", "/search_game").await;
        let reply = session.send_one("alice", "/favorites").await;
        assert_eq!(reply.text, "You have no favorite games yet!");

        // The abandoned search never consumes the next message
        let reply = session.send_one("alice", "Portal").await;
        assert_eq!(reply.text, "I did not understand that. Use the menu buttons or /help.");
        assert!(session.db.list_history("alice", 10).unwrap().is_empty());
        assert!(session.catalog.recorded_searches().is_empty());
    }

    #[tokio::test]
    async fn test_button_labels_work_like_commands() {
        let session = TestSession::new();
        session.send("alice", "/start").await;
        session.send("alice", "/add_favorite").await;
        session.send("alice", "Portal 2").await;

        let reply = session.send_one("alice", "Favorites").await;
        assert_eq!(reply.text, "1. Portal 2");
    }

    #[tokio::test]
    async fn test_history_rendering_end_to_end() {
        let session = TestSession::new();
        session.send("alice", "/start").await;

        session.send("alice", "/search_game").await;
        session.send("alice", "Half-Life").await;
        session.send("alice", "/search_game").await;
        session.send("alice", "Portal").await;

        let reply = session.send_one("alice", "/history").await;
        assert!(reply.text.starts_with("Search history:"));
        assert!(reply.text.contains("1: Portal."));
        assert!(reply.text.contains("2: Half-Life."));
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let session = TestSession::new();
        session.send("alice", "/start").await;
        session.send("bob", "/start").await;

        session.send("alice", "/add_favorite").await;
        session.send("alice", "Portal 2").await;

        let reply = session.send_one("bob", "/favorites").await;
        assert_eq!(reply.text, "You have no favorite games yet!");

        // Bob's pending flow does not leak into Alice's session
        session.send("bob", "/add_favorite").await;
        let reply = session.send_one("alice", "Dota 2").await;
        assert_eq!(reply.text, "I did not understand that. Use the menu buttons or /help.");
    }
}
