//! HTTP API for Ludex

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::catalog::Catalog;
use crate::db::Database;
use crate::session::SessionManager;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(db: Database, catalog: Arc<dyn Catalog>) -> Self {
        let sessions = Arc::new(SessionManager::new(db.clone(), catalog));
        Self { db, sessions }
    }
}
