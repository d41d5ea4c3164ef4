/// Remote bookmark listing
///
/// A read-only view of bookmarks kept by a separate backend, layered outside
/// the local per-book store (the two are not synced). The listing feeds an
/// "all bookmarks across books" screen, so a fetch failure degrades to an
/// empty list instead of blocking the rest of the client.

use log::warn;
use reqwest::Client;
use serde::Deserialize;

use crate::catalog::api::DEFAULT_CONTENT_BASE;
use crate::error::Result;

/// One bookmark as reported by the remote listing backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBookmark {
    pub book_id: String,
    pub page_index: usize,
}

impl RemoteBookmark {
    /// Cover image for the bookmarked book, per the content host's cache
    /// naming convention
    pub fn cover_url(&self) -> String {
        format!(
            "{}/cache/epub/{id}/pg{id}.cover.medium.jpg",
            DEFAULT_CONTENT_BASE,
            id = self.book_id
        )
    }

    /// 1-based page number as displayed to the user
    pub fn display_page(&self) -> usize {
        self.page_index + 1
    }
}

#[derive(Debug, Deserialize)]
struct BookmarkFeedResponse {
    #[serde(default)]
    payload: Vec<RemoteBookmark>,
}

/// Client for the remote bookmark listing endpoint
#[derive(Debug, Clone)]
pub struct BookmarkFeed {
    client: Client,
    base_url: String,
}

impl BookmarkFeed {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the full remote bookmark listing.
    pub async fn try_fetch_all(&self) -> Result<Vec<RemoteBookmark>> {
        let url = format!("{}/bookmark", self.base_url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let feed: BookmarkFeedResponse = response.json().await?;
        Ok(feed.payload)
    }

    /// Fetch the listing, degrading to an empty list on any failure.
    pub async fn fetch_all(&self) -> Vec<RemoteBookmark> {
        match self.try_fetch_all().await {
            Ok(bookmarks) => bookmarks,
            Err(err) => {
                warn!("remote bookmark listing unavailable: {}", err);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_payload_envelope() {
        let json = r#"{"payload": [{"bookId": "11", "pageIndex": 4}]}"#;
        let feed: BookmarkFeedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            feed.payload,
            vec![RemoteBookmark {
                book_id: "11".into(),
                page_index: 4
            }]
        );
    }

    #[test]
    fn test_missing_payload_is_empty() {
        let feed: BookmarkFeedResponse = serde_json::from_str("{}").unwrap();
        assert!(feed.payload.is_empty());
    }

    #[test]
    fn test_cover_url_and_display_page() {
        let bookmark = RemoteBookmark {
            book_id: "2701".into(),
            page_index: 0,
        };
        assert_eq!(
            bookmark.cover_url(),
            "https://www.gutenberg.org/cache/epub/2701/pg2701.cover.medium.jpg"
        );
        assert_eq!(bookmark.display_page(), 1);
    }
}
