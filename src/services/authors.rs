//! Author workflow service
//!
//! Each operation returns an [`Outcome`]: a view context to render or a
//! location to redirect to. Malformed identifiers and missing authors are
//! errors; a rejected create form is a normal re-render.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorEntry, AuthorForm, DeleteAuthorForm, AUTHOR_LIST_URL},
        book::{BookEntry, BookSummary},
        view::{AuthorView, Outcome},
    },
    repository::{AuthorDeletion, CatalogStore},
    validation,
};

/// Parse a path or form value as a store identifier.
///
/// Only the lowercase hyphenated form is accepted, so each author has one URL.
pub fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::try_parse(raw)
        .ok()
        .filter(|id| id.hyphenated().to_string() == raw)
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid author id: {}", raw)))
}

fn book_entries(books: Vec<BookSummary>) -> Vec<BookEntry> {
    books.into_iter().map(BookEntry::from).collect()
}

fn delete_view(author: Author, books: Vec<BookSummary>) -> AuthorView {
    AuthorView::AuthorDelete {
        title: "Delete Author".to_string(),
        author: AuthorEntry::from(author),
        author_books: book_entries(books),
    }
}

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn CatalogStore>,
}

impl AuthorsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Fetch an author and the books referencing it concurrently
    async fn author_with_books(&self, id: Uuid) -> AppResult<(Option<Author>, Vec<BookSummary>)> {
        tokio::try_join!(
            self.store.authors_get_by_id(id),
            self.store.books_list_by_author(id)
        )
    }

    /// List all authors ordered by family name
    pub async fn list(&self) -> AppResult<AuthorView> {
        let authors = self.store.authors_list().await?;
        Ok(AuthorView::AuthorList {
            title: "Author List".to_string(),
            author_list: authors.into_iter().map(AuthorEntry::from).collect(),
        })
    }

    /// Author detail with the books it wrote
    pub async fn detail(&self, id: &str) -> AppResult<AuthorView> {
        let id = parse_id(id)?;
        let (author, books) = self.author_with_books(id).await?;
        let author = author.ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?;

        Ok(AuthorView::AuthorDetail {
            title: "Author Detail".to_string(),
            author: AuthorEntry::from(author),
            author_books: book_entries(books),
        })
    }

    /// Empty create form
    pub fn create_form(&self) -> AuthorView {
        AuthorView::AuthorForm {
            title: "Create Author".to_string(),
            author: None,
            errors: Vec::new(),
        }
    }

    /// Validate a submitted form and persist the author when every rule passes
    pub async fn create_submit(&self, form: &AuthorForm) -> AppResult<Outcome<AuthorView>> {
        let (candidate, errors) = validation::check_author_form(form);

        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "author form rejected");
            return Ok(Outcome::Render(AuthorView::AuthorForm {
                title: "Create Author".to_string(),
                author: Some(candidate),
                errors,
            }));
        }

        let author = self.store.authors_create(&candidate).await?;
        tracing::info!(author_id = %author.id, name = %author.name(), "author created");
        Ok(Outcome::redirect(author.url()))
    }

    /// Confirmation page before deleting an author
    pub async fn delete_form(&self, id: &str) -> AppResult<Outcome<AuthorView>> {
        let id = parse_id(id)?;
        match self.author_with_books(id).await? {
            (Some(author), books) => Ok(Outcome::Render(delete_view(author, books))),
            (None, _) => Ok(Outcome::redirect(AUTHOR_LIST_URL)),
        }
    }

    /// Delete an author once no book references it.
    ///
    /// While books remain, the confirmation page is shown again and nothing is
    /// removed.
    pub async fn delete_submit(
        &self,
        id: &str,
        form: &DeleteAuthorForm,
    ) -> AppResult<Outcome<AuthorView>> {
        let id = parse_id(id)?;
        let target = parse_id(&form.author_id)?;

        let (author, books) = self.author_with_books(id).await?;
        let Some(author) = author else {
            return Ok(Outcome::redirect(AUTHOR_LIST_URL));
        };
        if !books.is_empty() {
            tracing::info!(author_id = %id, books = books.len(), "author deletion blocked");
            return Ok(Outcome::Render(delete_view(author, books)));
        }

        match self.store.authors_delete_unreferenced(target).await? {
            AuthorDeletion::Deleted => {
                tracing::info!(author_id = %target, "author deleted");
            }
            AuthorDeletion::NotFound => {
                tracing::debug!(author_id = %target, "author already absent");
            }
            AuthorDeletion::Referenced(count) => {
                tracing::info!(author_id = %target, books = count, "author deletion blocked");
                if let (Some(author), books) = self.author_with_books(target).await? {
                    return Ok(Outcome::Render(delete_view(author, books)));
                }
            }
        }

        Ok(Outcome::redirect(AUTHOR_LIST_URL))
    }

    pub async fn update_form(&self, _id: &str) -> AppResult<Outcome<AuthorView>> {
        Err(AppError::Unimplemented("Author update GET".to_string()))
    }

    pub async fn update_submit(&self, _id: &str) -> AppResult<Outcome<AuthorView>> {
        Err(AppError::Unimplemented("Author update POST".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCatalogStore;
    use mockall::predicate::eq;

    fn author(id: Uuid, first: &str, family: &str) -> Author {
        Author {
            id,
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: None,
            date_of_death: None,
        }
    }

    fn summary(title: &str) -> BookSummary {
        BookSummary {
            id: Uuid::now_v7(),
            title: title.to_string(),
            summary: format!("{} summary", title),
        }
    }

    fn service(store: MockCatalogStore) -> AuthorsService {
        AuthorsService::new(Arc::new(store))
    }

    fn delete_form(id: Uuid) -> DeleteAuthorForm {
        DeleteAuthorForm {
            author_id: id.to_string(),
        }
    }

    #[test]
    fn test_parse_id_accepts_only_canonical_form() {
        let id = Uuid::now_v7();
        let canonical = id.to_string();
        assert_eq!(parse_id(&canonical).unwrap(), id);

        for alias in [
            format!("urn:uuid:{}", canonical),
            format!("{{{}}}", canonical),
            id.simple().to_string(),
            canonical.to_uppercase(),
            format!(" {} ", canonical),
            String::new(),
        ] {
            assert!(
                matches!(parse_id(&alias), Err(AppError::InvalidInput(_))),
                "{:?} should be rejected",
                alias
            );
        }
    }

    #[tokio::test]
    async fn test_detail_invalid_id_touches_no_store() {
        let store = MockCatalogStore::new();
        let err = service(store).detail("not-an-id").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_detail_missing_author_is_not_found() {
        let id = Uuid::now_v7();
        let mut store = MockCatalogStore::new();
        store
            .expect_authors_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_books_list_by_author()
            .returning(|_| Ok(vec![]));

        let err = service(store).detail(&id.to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_detail_returns_author_and_books() {
        let id = Uuid::now_v7();
        let mut store = MockCatalogStore::new();
        store
            .expect_authors_get_by_id()
            .returning(move |_| Ok(Some(author(id, "Jane", "Austen"))));
        store
            .expect_books_list_by_author()
            .with(eq(id))
            .returning(|_| Ok(vec![summary("Emma"), summary("Persuasion")]));

        match service(store).detail(&id.to_string()).await.unwrap() {
            AuthorView::AuthorDetail { author, author_books, .. } => {
                assert_eq!(author.name, "Austen, Jane");
                let titles: Vec<_> = author_books.iter().map(|b| b.title.as_str()).collect();
                assert_eq!(titles, vec!["Emma", "Persuasion"]);
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_detail_store_failure_propagates() {
        let mut store = MockCatalogStore::new();
        store
            .expect_authors_get_by_id()
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        store.expect_books_list_by_author().returning(|_| Ok(vec![]));

        let err = service(store)
            .detail(&Uuid::now_v7().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_list_keeps_store_order() {
        let mut store = MockCatalogStore::new();
        store.expect_authors_list().times(1).returning(|| {
            Ok(vec![
                author(Uuid::now_v7(), "Isaac", "Asimov"),
                author(Uuid::now_v7(), "Jane", "Austen"),
            ])
        });

        match service(store).list().await.unwrap() {
            AuthorView::AuthorList { title, author_list } => {
                assert_eq!(title, "Author List");
                assert_eq!(author_list[0].family_name, "Asimov");
                assert_eq!(author_list[1].family_name, "Austen");
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_missing_first_name_never_persists() {
        let mut store = MockCatalogStore::new();
        store.expect_authors_create().never();

        let form = AuthorForm {
            family_name: Some("Austen".into()),
            ..Default::default()
        };
        match service(store).create_submit(&form).await.unwrap() {
            Outcome::Render(AuthorView::AuthorForm { author, errors, .. }) => {
                assert_eq!(author.map(|a| a.family_name), Some("Austen".to_string()));
                assert!(errors.iter().any(|e| e.field == "first_name"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_valid_persists_sanitized_and_redirects() {
        let id = Uuid::now_v7();
        let mut store = MockCatalogStore::new();
        store
            .expect_authors_create()
            .withf(|a| a.first_name == "Jane" && a.family_name == "Austen")
            .times(1)
            .returning(move |a| Ok(a.clone().into_author(id)));

        let form = AuthorForm {
            first_name: Some("  Jane ".into()),
            family_name: Some("Austen".into()),
            date_of_birth: Some("1775-12-16".into()),
            date_of_death: None,
        };
        match service(store).create_submit(&form).await.unwrap() {
            Outcome::Redirect(location) => assert_eq!(location, format!("/catalog/author/{}", id)),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_create_form_is_empty() {
        let store = MockCatalogStore::new();
        match service(store).create_form() {
            AuthorView::AuthorForm { author, errors, .. } => {
                assert!(author.is_none());
                assert!(errors.is_empty());
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_form_missing_author_redirects() {
        let mut store = MockCatalogStore::new();
        store.expect_authors_get_by_id().returning(|_| Ok(None));
        store.expect_books_list_by_author().returning(|_| Ok(vec![]));

        let outcome = service(store)
            .delete_form(&Uuid::now_v7().to_string())
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Redirect(ref loc) if loc == AUTHOR_LIST_URL));
    }

    #[tokio::test]
    async fn test_delete_submit_blocked_by_books() {
        let id = Uuid::now_v7();
        let books = vec![summary("Emma")];
        let mut store = MockCatalogStore::new();
        store
            .expect_authors_get_by_id()
            .returning(move |_| Ok(Some(author(id, "Jane", "Austen"))));
        let listed = books.clone();
        store
            .expect_books_list_by_author()
            .returning(move |_| Ok(listed.clone()));
        store.expect_authors_delete_unreferenced().never();
        let service = service(store);

        let confirm = service.delete_form(&id.to_string()).await.unwrap();
        let blocked = service
            .delete_submit(&id.to_string(), &delete_form(id))
            .await
            .unwrap();

        let book_ids = |outcome: Outcome<AuthorView>| match outcome {
            Outcome::Render(AuthorView::AuthorDelete { author_books, .. }) => {
                author_books.into_iter().map(|b| b.id).collect::<Vec<_>>()
            }
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(book_ids(blocked), book_ids(confirm));
    }

    #[tokio::test]
    async fn test_delete_submit_removes_unreferenced_author() {
        let id = Uuid::now_v7();
        let mut store = MockCatalogStore::new();
        store
            .expect_authors_get_by_id()
            .returning(move |_| Ok(Some(author(id, "Jane", "Austen"))));
        store.expect_books_list_by_author().returning(|_| Ok(vec![]));
        store
            .expect_authors_delete_unreferenced()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(AuthorDeletion::Deleted));

        let outcome = service(store)
            .delete_submit(&id.to_string(), &delete_form(id))
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Redirect(ref loc) if loc == AUTHOR_LIST_URL));
    }

    #[tokio::test]
    async fn test_delete_submit_absent_author_is_noop() {
        let id = Uuid::now_v7();
        let mut store = MockCatalogStore::new();
        store.expect_authors_get_by_id().returning(|_| Ok(None));
        store.expect_books_list_by_author().returning(|_| Ok(vec![]));
        store.expect_authors_delete_unreferenced().never();

        let outcome = service(store)
            .delete_submit(&id.to_string(), &delete_form(id))
            .await
            .unwrap();
        assert!(outcome.is_redirect());
    }

    #[tokio::test]
    async fn test_delete_submit_rerenders_when_book_added_concurrently() {
        let id = Uuid::now_v7();
        let mut store = MockCatalogStore::new();
        store
            .expect_authors_get_by_id()
            .returning(move |_| Ok(Some(author(id, "Jane", "Austen"))));
        let mut calls = 0;
        store.expect_books_list_by_author().returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(vec![])
            } else {
                Ok(vec![summary("Emma")])
            }
        });
        store
            .expect_authors_delete_unreferenced()
            .times(1)
            .returning(|_| Ok(AuthorDeletion::Referenced(1)));

        let outcome = service(store)
            .delete_submit(&id.to_string(), &delete_form(id))
            .await
            .unwrap();
        match outcome {
            Outcome::Render(AuthorView::AuthorDelete { author_books, .. }) => {
                assert_eq!(author_books.len(), 1);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_submit_rejects_malformed_form_id() {
        let store = MockCatalogStore::new();
        let err = service(store)
            .delete_submit(
                &Uuid::now_v7().to_string(),
                &DeleteAuthorForm {
                    author_id: "nope".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_update_is_unimplemented() {
        let service = service(MockCatalogStore::new());
        assert!(matches!(
            service.update_form("x").await,
            Err(AppError::Unimplemented(_))
        ));
        assert!(matches!(
            service.update_submit("x").await,
            Err(AppError::Unimplemented(_))
        ));
    }
}
