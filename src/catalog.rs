//! Game catalog abstraction
//!
//! Provides a common interface for querying the game catalog. Failures are
//! absorbed here: callers get empty results, never transport errors.

mod error;
mod steam;
mod types;

pub use steam::SteamCatalog;
pub use types::{GameDetail, SearchResult};

use async_trait::async_trait;

/// Common interface for catalog providers
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search the catalog for a title
    ///
    /// Returns an empty sequence on any transport failure, timeout, or
    /// non-success status.
    async fn search(&self, term: &str, page: u32) -> Vec<SearchResult>;

    /// Fetch the full record for one game
    ///
    /// Returns `None` when the game is unknown or the upstream fails.
    #[allow(dead_code)] // No chat flow fetches details yet
    async fn get_detail(&self, app_id: i64) -> Option<GameDetail>;
}
