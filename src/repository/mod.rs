//! Repository layer for the entity store

pub mod authors;
pub mod books;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        author::{Author, NewAuthor},
        book::{Book, BookSummary, NewBook},
    },
};

/// Result of removing an author only when no book references it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorDeletion {
    Deleted,
    /// At least this many books still reference the author; nothing removed
    Referenced(i64),
    NotFound,
}

/// Operations the author workflow needs from the entity store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Check the store is reachable
    async fn ping(&self) -> AppResult<()>;

    /// All authors ordered by family name, ties in insertion order
    async fn authors_list(&self) -> AppResult<Vec<Author>>;

    async fn authors_get_by_id(&self, id: Uuid) -> AppResult<Option<Author>>;

    async fn authors_create(&self, author: &NewAuthor) -> AppResult<Author>;

    /// Remove an author unless a book references it, as one atomic step
    async fn authors_delete_unreferenced(&self, id: Uuid) -> AppResult<AuthorDeletion>;

    /// Title and summary of every book referencing the author
    async fn books_list_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>>;

    async fn books_create(&self, book: &NewBook) -> AppResult<Book>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        self.authors_list_by_family_name().await
    }

    async fn authors_get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.authors_find(id).await
    }

    async fn authors_create(&self, author: &NewAuthor) -> AppResult<Author> {
        self.authors_insert(author).await
    }

    async fn authors_delete_unreferenced(&self, id: Uuid) -> AppResult<AuthorDeletion> {
        self.authors_delete_if_unreferenced(id).await
    }

    async fn books_list_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        self.books_summaries_by_author(author_id).await
    }

    async fn books_create(&self, book: &NewBook) -> AppResult<Book> {
        self.books_insert(book).await
    }
}
