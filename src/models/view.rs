//! View contexts and workflow outcomes

use serde::Serialize;
use utoipa::ToSchema;

use super::{
    author::{AuthorEntry, NewAuthor},
    book::BookEntry,
};

/// One failed validation rule on a form field
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Data handed to the renderer by the author workflow
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum AuthorView {
    AuthorList {
        title: String,
        author_list: Vec<AuthorEntry>,
    },
    AuthorDetail {
        title: String,
        author: AuthorEntry,
        author_books: Vec<BookEntry>,
    },
    AuthorForm {
        title: String,
        /// Sanitized values to re-populate the form with
        author: Option<NewAuthor>,
        errors: Vec<FieldError>,
    },
    AuthorDelete {
        title: String,
        author: AuthorEntry,
        author_books: Vec<BookEntry>,
    },
}

/// Result of a workflow step: render a view or redirect elsewhere
#[derive(Debug, Clone)]
pub enum Outcome<V> {
    Render(V),
    Redirect(String),
}

impl<V> Outcome<V> {
    pub fn redirect(location: impl Into<String>) -> Self {
        Outcome::Redirect(location.into())
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Outcome::Redirect(_))
    }
}
