/// Reader module
///
/// The pagination-and-bookmark engine:
/// - Pure text pagination (paginator.rs)
/// - Viewport-derived page capacity (viewport.rs)
/// - Per-book session controller tying pages, position, and bookmarks
///   together (session.rs)

pub mod paginator;
pub mod session;
pub mod viewport;

pub use paginator::paginate;
pub use session::{OpenBookRequest, ReadingSession, SessionState};
pub use viewport::Viewport;
