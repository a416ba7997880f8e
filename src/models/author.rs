//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::ALPHANUMERIC;

/// Location of the author list page
pub const AUTHOR_LIST_URL: &str = "/catalog/authors";

/// Location of an author's detail page
pub fn author_url(id: Uuid) -> String {
    format!("/catalog/author/{}", id)
}

/// Full author record from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn url(&self) -> String {
        author_url(self.id)
    }

    /// "Family, First", or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Birth and death dates formatted for display, e.g. "Dec 16, 1775 - Jul 18, 1817"
    pub fn lifespan(&self) -> String {
        if self.date_of_birth.is_none() && self.date_of_death.is_none() {
            return String::new();
        }
        let format = |date: Option<NaiveDate>| {
            date.map(|d| d.format("%b %-d, %Y").to_string())
                .unwrap_or_default()
        };
        format!("{} - {}", format(self.date_of_birth), format(self.date_of_death))
            .trim()
            .to_string()
    }
}

/// Author as shown in views, including derived fields
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorEntry {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub name: String,
    pub lifespan: String,
    pub url: String,
}

impl From<Author> for AuthorEntry {
    fn from(author: Author) -> Self {
        Self {
            name: author.name(),
            lifespan: author.lifespan(),
            url: author.url(),
            id: author.id,
            first_name: author.first_name,
            family_name: author.family_name,
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        }
    }
}

/// Candidate author built from a sanitized create form
#[derive(Debug, Clone, PartialEq, Serialize, Validate, ToSchema)]
pub struct NewAuthor {
    #[validate(
        length(min = 1, message = "First name must be specified."),
        regex(path = *ALPHANUMERIC, message = "First name has non-alphanumeric characters.")
    )]
    pub first_name: String,
    #[validate(regex(path = *ALPHANUMERIC, message = "Family name has non-alphanumeric characters."))]
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl NewAuthor {
    pub fn into_author(self, id: Uuid) -> Author {
        Author {
            id,
            first_name: self.first_name,
            family_name: self.family_name,
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
        }
    }
}

/// Raw create-author form submission
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AuthorForm {
    pub first_name: Option<String>,
    #[serde(alias = "last_name")]
    pub family_name: Option<String>,
    /// ISO-8601 date, may be empty
    pub date_of_birth: Option<String>,
    /// ISO-8601 date, may be empty
    pub date_of_death: Option<String>,
}

/// Delete-author confirmation form
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeleteAuthorForm {
    /// Missing values reach identifier parsing as an empty string
    #[serde(rename = "authorid", alias = "author_id", default)]
    pub author_id: String,
}
