//! Book model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    /// Unique across the catalog
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub language: String,
    /// Generated at creation time, never supplied by clients
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request.
///
/// Every field is optional on the wire so that missing values are reported
/// one at a time, in a fixed order, by the book service.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i32>,
    pub language: Option<String>,
}

/// Update book request (partial)
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i32>,
    pub language: Option<String>,
}

/// Fully validated book ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub language: String,
    pub summary: String,
}

impl Book {
    /// Overwrite the fields present in `changes`, keeping the rest.
    /// The summary is never touched.
    pub fn apply(&mut self, changes: UpdateBook) {
        if let Some(isbn) = changes.isbn {
            self.isbn = isbn;
        }
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
        if let Some(year) = changes.publication_year {
            self.publication_year = year;
        }
        if let Some(language) = changes.language {
            self.language = language;
        }
    }
}
