/// Remote catalog and content transports
///
/// The search loader and reading session talk to the network only through
/// these traits, so tests can substitute call-counting mocks and the real
/// hosts stay a construction-time detail.

use async_trait::async_trait;

use crate::catalog::book::{BookId, SearchResponse};
use crate::error::Result;

/// Default public catalog host
pub const DEFAULT_CATALOG_BASE: &str = "https://gutendex.com";

/// Default host serving plain-text book bodies
pub const DEFAULT_CONTENT_BASE: &str = "https://www.gutenberg.org";

/// Paginated catalog search API
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Request one page (1-based) of search results for `query`.
    async fn search_page(&self, query: &str, page: u32) -> Result<SearchResponse>;
}

/// Source of raw book bodies
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the full plain-text body of a book (UTF-8 assumed).
    async fn fetch_text(&self, book_id: &BookId) -> Result<String>;
}

/// HTTP implementation of the catalog search API
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_CATALOG_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for HttpCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn search_page(&self, query: &str, page: u32) -> Result<SearchResponse> {
        let url = format!("{}/books/", self.base_url);
        let page = page.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("search", query), ("page", page.as_str())])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<SearchResponse>().await?)
    }
}

/// HTTP implementation of the plain-text content source
#[derive(Debug, Clone)]
pub struct GutenbergContent {
    client: reqwest::Client,
    base_url: String,
}

impl GutenbergContent {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_CONTENT_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// URL of the cached plain-text rendition for a book id
    pub fn text_url(&self, book_id: &BookId) -> String {
        format!("{}/cache/epub/{id}/pg{id}.txt", self.base_url, id = book_id)
    }
}

impl Default for GutenbergContent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentSource for GutenbergContent {
    async fn fetch_text(&self, book_id: &BookId) -> Result<String> {
        let response = self
            .client
            .get(self.text_url(book_id))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}
