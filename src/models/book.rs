//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub fn book_url(id: Uuid) -> String {
    format!("/catalog/book/{}", id)
}

/// Full book record from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    /// Referenced author (not owned: removing an author never removes books)
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    /// Referenced genres
    pub genre: Vec<Uuid>,
}

/// Title and summary projection used on author pages
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
        }
    }
}

/// Book summary as shown in views
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookEntry {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl From<BookSummary> for BookEntry {
    fn from(book: BookSummary) -> Self {
        Self {
            url: book_url(book.id),
            id: book.id,
            title: book.title,
            summary: book.summary,
        }
    }
}

/// Book to insert
#[derive(Debug, Clone, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<Uuid>,
}

impl NewBook {
    pub fn into_book(self, id: Uuid) -> Book {
        Book {
            id,
            title: self.title,
            author_id: self.author_id,
            summary: self.summary,
            isbn: self.isbn,
            genre: self.genre,
        }
    }
}
