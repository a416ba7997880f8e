//! In-process entity store
//!
//! Keeps records in insertion order behind a single lock. Used for local runs
//! without PostgreSQL and by the integration tests.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::{AuthorDeletion, CatalogStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, NewAuthor},
        book::{Book, BookSummary, NewBook},
    },
};

#[derive(Default)]
struct Records {
    authors: Vec<Author>,
    books: Vec<Book>,
}

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Records>> {
        self.records
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Records>> {
        self.records
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        self.read().map(|_| ())
    }

    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let mut authors = self.read()?.authors.clone();
        // stable: equal family names keep insertion order
        authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
        Ok(authors)
    }

    async fn authors_get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.read()?.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn authors_create(&self, author: &NewAuthor) -> AppResult<Author> {
        let author = author.clone().into_author(Uuid::now_v7());
        self.write()?.authors.push(author.clone());
        Ok(author)
    }

    async fn authors_delete_unreferenced(&self, id: Uuid) -> AppResult<AuthorDeletion> {
        let mut records = self.write()?;
        let Some(position) = records.authors.iter().position(|a| a.id == id) else {
            return Ok(AuthorDeletion::NotFound);
        };
        let references = records.books.iter().filter(|b| b.author_id == id).count() as i64;
        if references > 0 {
            return Ok(AuthorDeletion::Referenced(references));
        }
        records.authors.remove(position);
        Ok(AuthorDeletion::Deleted)
    }

    async fn books_list_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        Ok(self
            .read()?
            .books
            .iter()
            .filter(|b| b.author_id == author_id)
            .map(BookSummary::from)
            .collect())
    }

    async fn books_create(&self, book: &NewBook) -> AppResult<Book> {
        let book = book.clone().into_book(Uuid::now_v7());
        self.write()?.books.push(book.clone());
        Ok(book)
    }
}
