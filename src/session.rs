//! Per-user conversation sessions
//!
//! One worker task per user processes that user's messages in order;
//! different users proceed independently.

mod render;
mod worker;

#[cfg(test)]
pub mod testing;

pub use render::Reply;

use crate::catalog::Catalog;
use crate::db::Database;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, RwLock};
use worker::{InboundMessage, SessionWorker};

const SESSION_CHANNEL_CAPACITY: usize = 32;

/// Handle to a running session worker
#[derive(Clone)]
struct SessionHandle {
    message_tx: mpsc::Sender<InboundMessage>,
}

/// Manager for all user sessions
pub struct SessionManager {
    db: Database,
    catalog: Arc<dyn Catalog>,
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionManager {
    pub fn new(db: Database, catalog: Arc<dyn Catalog>) -> Self {
        Self {
            db,
            catalog,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Route one message to its user's worker and await the replies
    pub async fn handle_message(&self, username: &str, text: &str) -> Result<Vec<Reply>, String> {
        let handle = self.get_or_create(username).await;
        let (reply_tx, reply_rx) = oneshot::channel();

        handle
            .message_tx
            .send(InboundMessage {
                text: text.to_string(),
                reply_tx,
            })
            .await
            .map_err(|_| "Session worker unavailable".to_string())?;

        reply_rx
            .await
            .map_err(|_| "Session worker dropped the reply".to_string())
    }

    async fn get_or_create(&self, username: &str) -> SessionHandle {
        // Check if already running
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(username) {
                return handle.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        // Re-check: another request may have won the write lock first
        if let Some(handle) = sessions.get(username) {
            return handle.clone();
        }

        let (message_tx, message_rx) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
        let worker = SessionWorker::new(
            username.to_string(),
            self.db.clone(),
            self.catalog.clone(),
            message_rx,
        );
        tokio::spawn(worker.run());

        let handle = SessionHandle { message_tx };
        sessions.insert(username.to_string(), handle.clone());
        handle
    }
}
