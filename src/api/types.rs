//! API request and response types

use crate::db::{Favorite, HistoryEntry};
use crate::session::Reply;
use serde::{Deserialize, Serialize};

/// Inbound chat message
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub username: String,
    pub text: String,
}

/// Replies produced for one inbound message, in order
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub replies: Vec<Reply>,
}

/// Recent search history for a user, newest first
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}

/// One page of a user's favorites plus the overall count
#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Favorite>,
    pub total: i64,
}

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
