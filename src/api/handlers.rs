//! HTTP request handlers

use super::types::{
    ErrorResponse, FavoritesResponse, HealthResponse, HistoryResponse, MessageRequest,
    MessageResponse,
};
use super::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

/// Default page size for the read endpoints, matching the chat rendering
const DEFAULT_LIMIT: u32 = 20;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Chat surface
        .route("/api/messages", post(send_message))
        // Read endpoints
        .route("/api/users/:username/history", get(get_history))
        .route("/api/users/:username/favorites", get(get_favorites))
        // Health probe
        .route("/api/health", get(health))
        .with_state(state)
}

// ============================================================
// Chat Surface
// ============================================================

async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username must not be empty".to_string()));
    }

    tracing::info!(username = %req.username, "Inbound message");

    let replies = state
        .sessions
        .handle_message(&req.username, &req.text)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(MessageResponse { replies }))
}

// ============================================================
// Read Endpoints
// ============================================================

#[derive(Debug, Deserialize)]
struct PageQuery {
    limit: Option<u32>,
    offset: Option<u32>,
}

async fn get_history(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    require_user(&state, &username)?;

    let entries = state
        .db
        .list_history(&username, query.limit.unwrap_or(DEFAULT_LIMIT))
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(HistoryResponse { entries }))
}

async fn get_favorites(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<FavoritesResponse>, AppError> {
    require_user(&state, &username)?;

    let favorites = state
        .db
        .list_favorites(
            &username,
            query.limit.unwrap_or(DEFAULT_LIMIT),
            query.offset.unwrap_or(0),
        )
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let total = state
        .db
        .count_favorites(&username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(FavoritesResponse { favorites, total }))
}

/// Reject reads for usernames that never registered
fn require_user(state: &AppState, username: &str) -> Result<(), AppError> {
    match state.db.get_user(username) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(AppError::NotFound(format!("User not found: {username}"))),
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}

// ============================================================
// Health
// ============================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                // Detail goes to the log, never into the response body
                tracing::error!(error = %msg, "Handler failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
