//! Process configuration

/// Runtime configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database path
    pub db_path: String,
    /// HTTP listen port
    pub port: u16,
    /// Game catalog API base URL
    pub catalog_base_url: String,
    /// Game catalog API key; empty degrades every search to no results
    pub catalog_api_key: String,
    /// Value for the catalog host header
    pub catalog_api_host: String,
}

impl Config {
    pub fn from_env() -> Self {
        let db_path = std::env::var("LUDEX_DB_PATH").unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            format!("{home}/.ludex/ludex.db")
        });

        let port = std::env::var("LUDEX_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        Self {
            db_path,
            port,
            catalog_base_url: std::env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| "https://steam2.p.rapidapi.com".to_string()),
            catalog_api_key: std::env::var("CATALOG_API_KEY").unwrap_or_default(),
            catalog_api_host: std::env::var("CATALOG_API_HOST")
                .unwrap_or_else(|_| "steam2.p.rapidapi.com".to_string()),
        }
    }
}
