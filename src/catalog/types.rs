//! Catalog domain types

/// One search match, normalized from the upstream payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub app_id: i64,
    pub title: String,
    /// Store page link, "-" when the upstream omits it
    pub store_url: String,
    pub image_url: Option<String>,
    pub release_date: Option<String>,
    /// Display-ready price, already placeholder-substituted
    pub price: String,
}

/// Full record for a single game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDetail {
    pub app_id: i64,
    pub title: String,
    pub description: String,
    pub price: String,
    pub release_date: String,
    pub developer: String,
    pub publisher: String,
    pub genres: Vec<String>,
}
