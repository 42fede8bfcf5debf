//! Steam catalog provider backed by the hosted search gateway

use super::error::CatalogError;
use super::types::{GameDetail, SearchResult};
use super::Catalog;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const NO_INFORMATION: &str = "no information";
const NO_DESCRIPTION: &str = "no description available";
const UNKNOWN: &str = "unknown";

/// Catalog client for the Steam search API
pub struct SteamCatalog {
    client: Client,
    base_url: String,
    api_key: String,
    api_host: String,
}

impl SteamCatalog {
    pub fn new(base_url: &str, api_key: String, api_host: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            api_host,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CatalogError::timeout(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    CatalogError::network(format!("Connection failed: {e}"))
                } else {
                    CatalogError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::status(status));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::decode(format!("Failed to parse response: {e}")))
    }
}

#[async_trait]
impl Catalog for SteamCatalog {
    async fn search(&self, term: &str, page: u32) -> Vec<SearchResult> {
        let url = format!(
            "{}/search/{}/page/{page}",
            self.base_url,
            urlencoding::encode(term)
        );

        match self.fetch::<Vec<SearchItem>>(&url).await {
            Ok(items) => items.into_iter().map(SearchItem::normalize).collect(),
            Err(e) => {
                tracing::warn!(term, kind = ?e.kind, error = %e, "Catalog search failed");
                Vec::new()
            }
        }
    }

    async fn get_detail(&self, app_id: i64) -> Option<GameDetail> {
        let url = format!("{}/app/{app_id}", self.base_url);

        match self.fetch::<DetailItem>(&url).await {
            Ok(item) => Some(item.normalize()),
            Err(e) => {
                tracing::warn!(app_id, kind = ?e.kind, error = %e, "Catalog detail lookup failed");
                None
            }
        }
    }
}

/// Render the upstream price field; falsy values (null, zero, empty
/// string) collapse to the placeholder
fn price_or_placeholder(value: Option<Value>) -> String {
    match value {
        Some(value) if !is_falsy(&value) => value_text(value),
        _ => NO_INFORMATION.to_string(),
    }
}

#[allow(clippy::float_cmp, clippy::match_same_arms)] // Zero and empty both mean "no price" upstream
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

// Steam API types

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(rename = "appId")]
    app_id: i64,
    title: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    img_url: Option<String>,
    #[serde(default)]
    released: Option<String>,
    #[serde(default)]
    price: Option<Value>,
}

impl SearchItem {
    fn normalize(self) -> SearchResult {
        SearchResult {
            app_id: self.app_id,
            title: self.title,
            store_url: self.url.unwrap_or_else(|| "-".to_string()),
            image_url: self.img_url,
            release_date: self.released,
            price: price_or_placeholder(self.price),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetailItem {
    #[serde(rename = "appId")]
    app_id: i64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<Value>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    developer: Option<String>,
    #[serde(default)]
    publisher: Option<String>,
    #[serde(default)]
    genres: Vec<String>,
}

impl DetailItem {
    fn normalize(self) -> GameDetail {
        GameDetail {
            app_id: self.app_id,
            title: self.title,
            description: self
                .description
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            price: self.price.map_or_else(|| NO_INFORMATION.to_string(), value_text),
            release_date: self.release_date.unwrap_or_else(|| UNKNOWN.to_string()),
            developer: self.developer.unwrap_or_else(|| UNKNOWN.to_string()),
            publisher: self.publisher.unwrap_or_else(|| UNKNOWN.to_string()),
            genres: self.genres,
        }
    }
}
