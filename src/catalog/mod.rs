/// Catalog module
///
/// Everything between the client and the public book catalog:
/// - Wire data model and book-id extraction (book.rs)
/// - Transport traits and their HTTP implementations (api.rs)
/// - Incremental paginated search state (search.rs)

pub mod api;
pub mod book;
pub mod search;

pub use api::{CatalogApi, ContentSource, GutenbergContent, HttpCatalog};
pub use book::{Author, Book, BookId, SearchResponse};
pub use search::{PageRequest, SearchLoader};
