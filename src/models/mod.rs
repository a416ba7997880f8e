//! Data models for the catalog

pub mod author;
pub mod book;
pub mod view;

// Re-export commonly used types
pub use author::{Author, AuthorEntry, NewAuthor};
pub use book::{Book, BookSummary, NewBook};
pub use view::{AuthorView, FieldError, Outcome};
