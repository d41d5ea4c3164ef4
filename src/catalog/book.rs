/// Catalog data model
///
/// These structs mirror the catalog API's JSON wire format. A `Book` is
/// immutable once fetched; the reader references it rather than copying it.
/// The numeric book id is not a first-class field of the content URLs we
/// need — it is extracted from the companion HTML-format URL, and that
/// convention is load-bearing: the same id keys both the content fetch and
/// the persisted bookmark set.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{ReaderError, Result};

/// Stable per-book identifier, extracted from the catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookId(String);

impl BookId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One credited author of a catalog entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Author {
    pub name: String,
}

/// A single book as returned by the catalog search API
#[derive(Debug, Clone, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    /// MIME type -> URL map of available renditions
    #[serde(default)]
    pub formats: HashMap<String, String>,
}

impl Book {
    /// Extract the numeric book id from this entry's HTML-format URL.
    ///
    /// Fails with [`ReaderError::MalformedBookReference`] when the entry has
    /// no HTML rendition or its URL does not carry the `/{id}.html` suffix.
    /// That failure is fatal for opening the book: without the id there is
    /// no content URL and no bookmark key.
    pub fn book_id(&self) -> Result<BookId> {
        let html_url = self
            .formats
            .get("text/html")
            .ok_or_else(|| ReaderError::MalformedBookReference(self.title.clone()))?;
        extract_book_id(html_url)
    }

    /// Cover image URL, when the catalog entry has one
    pub fn cover_url(&self) -> Option<&str> {
        self.formats.get("image/jpeg").map(String::as_str)
    }

    /// Comma-separated author names for display
    pub fn author_line(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One page of catalog search results
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Book>,
    /// URL of the next results page; `None` means this was the last page
    pub next: Option<String>,
}

fn html_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/(\d+)\.html").expect("valid book-id pattern"))
}

/// Pull the numeric book id out of an HTML-format catalog URL.
pub fn extract_book_id(html_url: &str) -> Result<BookId> {
    html_id_pattern()
        .captures(html_url)
        .and_then(|caps| caps.get(1))
        .map(|id| BookId::new(id.as_str()))
        .ok_or_else(|| ReaderError::MalformedBookReference(html_url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_numeric_id() {
        let id = extract_book_id("https://www.gutenberg.org/ebooks/11.html").unwrap();
        assert_eq!(id.as_str(), "11");
    }

    #[test]
    fn test_rejects_url_without_id_suffix() {
        for url in [
            "https://www.gutenberg.org/files/11/11-h/11-h.htm",
            "https://www.gutenberg.org/ebooks/alice.html",
            "",
        ] {
            assert!(matches!(
                extract_book_id(url),
                Err(ReaderError::MalformedBookReference(_))
            ));
        }
    }

    #[test]
    fn test_book_id_requires_html_format() {
        let book = Book {
            id: 11,
            title: "Alice's Adventures in Wonderland".into(),
            authors: vec![],
            formats: HashMap::new(),
        };
        assert!(matches!(
            book.book_id(),
            Err(ReaderError::MalformedBookReference(_))
        ));
    }

    #[test]
    fn test_deserializes_catalog_entry() {
        let json = r#"{
            "id": 11,
            "title": "Alice's Adventures in Wonderland",
            "authors": [{"name": "Carroll, Lewis"}],
            "formats": {
                "text/html": "https://www.gutenberg.org/ebooks/11.html",
                "image/jpeg": "https://www.gutenberg.org/cache/epub/11/pg11.cover.medium.jpg"
            }
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.book_id().unwrap().as_str(), "11");
        assert_eq!(book.author_line(), "Carroll, Lewis");
        assert!(book.cover_url().unwrap().ends_with("cover.medium.jpg"));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let json = r#"{"count": 1, "next": null, "results": []}"#;
        let page: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(page.next.is_none());
        assert!(page.results.is_empty());
    }
}
