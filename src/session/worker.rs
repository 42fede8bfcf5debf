//! Per-user session worker
//!
//! Owns one user's conversation state and processes that user's messages
//! strictly in arrival order.

use super::render::{self, Reply};
use crate::catalog::Catalog;
use crate::db::Database;
use crate::state_machine::{transition, Command, ConvState, Effect, Event};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Rows requested from the store when rendering lists
const HISTORY_DISPLAY_LIMIT: u32 = 20;
const FAVORITES_DISPLAY_LIMIT: u32 = 20;

/// One inbound message with its reply channel
pub struct InboundMessage {
    pub text: String,
    pub reply_tx: oneshot::Sender<Vec<Reply>>,
}

/// Worker task for a single user's session
pub struct SessionWorker {
    username: String,
    state: ConvState,
    db: Database,
    catalog: Arc<dyn Catalog>,
    message_rx: mpsc::Receiver<InboundMessage>,
}

impl SessionWorker {
    pub fn new(
        username: String,
        db: Database,
        catalog: Arc<dyn Catalog>,
        message_rx: mpsc::Receiver<InboundMessage>,
    ) -> Self {
        Self {
            username,
            state: ConvState::Idle,
            db,
            catalog,
            message_rx,
        }
    }

    pub async fn run(mut self) {
        tracing::debug!(username = %self.username, "Session worker started");

        while let Some(message) = self.message_rx.recv().await {
            let replies = self.process_message(&message.text).await;
            if message.reply_tx.send(replies).is_err() {
                tracing::debug!(username = %self.username, "Reply receiver dropped");
            }
        }

        tracing::debug!(username = %self.username, "Session worker stopped");
    }

    async fn process_message(&mut self, text: &str) -> Vec<Reply> {
        let event = Event::parse(text);

        // Registration gate, checked before any transition runs
        if requires_registration(&event) {
            match self.db.get_user(&self.username) {
                Ok(Some(_)) => {}
                Ok(None) => return vec![Reply::text(render::NOT_REGISTERED)],
                Err(e) => {
                    tracing::error!(username = %self.username, error = %e, "User lookup failed");
                    return vec![Reply::text(render::SERVER_ERROR)];
                }
            }
        }

        let result = transition(self.state, event);
        tracing::debug!(
            username = %self.username,
            from = ?self.state,
            to = ?result.new_state,
            "State transition"
        );
        self.state = result.new_state;

        let mut replies = Vec::with_capacity(result.effects.len());
        for effect in result.effects {
            replies.push(self.execute_effect(effect).await);
        }
        replies
    }

    async fn execute_effect(&self, effect: Effect) -> Reply {
        match effect {
            Effect::Greet => self.greet(),
            Effect::ShowHelp => Reply::with_menu(render::HELP),
            Effect::ShowHistory => self.show_history(),
            Effect::ShowFavorites => self.show_favorites(),
            Effect::PromptTitle => Reply::text(render::PROMPT_TITLE),
            Effect::RunSearch { term } => self.run_search(&term).await,
            Effect::AddFavorite { title } => self.add_favorite(&title),
            Effect::RemoveFavorite { title } => self.remove_favorite(&title),
            Effect::HintIdle => Reply::text(render::IDLE_HINT),
        }
    }

    /// Greet a known user, or register the sender on first contact
    fn greet(&self) -> Reply {
        match self.db.get_user(&self.username) {
            Ok(Some(user)) => Reply::with_menu(render::greeting(&user.username)),
            Ok(None) => match self.db.create_user(&self.username) {
                Ok(Some(user)) => Reply::with_menu(render::registered_greeting(&user.username)),
                Ok(None) => Reply::text(render::SERVER_ERROR),
                Err(e) => {
                    tracing::error!(username = %self.username, error = %e, "User creation failed");
                    Reply::text(render::SERVER_ERROR)
                }
            },
            Err(e) => {
                tracing::error!(username = %self.username, error = %e, "User lookup failed");
                Reply::text(render::SERVER_ERROR)
            }
        }
    }

    /// Record the term first; the search only runs once history is written
    async fn run_search(&self, term: &str) -> Reply {
        if let Err(e) = self.db.record_search(&self.username, term) {
            tracing::error!(username = %self.username, error = %e, "Recording search failed");
            return Reply::text(render::SERVER_ERROR);
        }

        let results = self.catalog.search(term, 1).await;
        Reply::text(render::search_results(term, &results))
    }

    fn show_history(&self) -> Reply {
        match self.db.list_history(&self.username, HISTORY_DISPLAY_LIMIT) {
            Ok(entries) => Reply::text(render::history(&entries)),
            Err(e) => {
                tracing::error!(username = %self.username, error = %e, "History lookup failed");
                Reply::text(render::SERVER_ERROR)
            }
        }
    }

    fn show_favorites(&self) -> Reply {
        match self
            .db
            .list_favorites(&self.username, FAVORITES_DISPLAY_LIMIT, 0)
        {
            Ok(entries) => Reply::text(render::favorites(&entries)),
            Err(e) => {
                tracing::error!(username = %self.username, error = %e, "Favorites lookup failed");
                Reply::text(render::SERVER_ERROR)
            }
        }
    }

    fn add_favorite(&self, title: &str) -> Reply {
        match self.db.add_favorite(&self.username, title) {
            Ok(_) => Reply::text(render::FAVORITE_ADDED),
            Err(e) => {
                tracing::error!(username = %self.username, error = %e, "Adding favorite failed");
                Reply::text(render::SERVER_ERROR)
            }
        }
    }

    fn remove_favorite(&self, title: &str) -> Reply {
        match self.db.remove_favorite(&self.username, title) {
            Ok(Some(removed)) => Reply::text(render::favorite_removed(&removed.title)),
            Ok(None) => Reply::text(render::favorite_missing(title)),
            Err(e) => {
                tracing::error!(username = %self.username, error = %e, "Removing favorite failed");
                Reply::text(render::SERVER_ERROR)
            }
        }
    }
}

/// Start and help stay open so new users can register and orient
fn requires_registration(event: &Event) -> bool {
    !matches!(
        event,
        Event::Command(Command::Start) | Event::Command(Command::Help)
    )
}
