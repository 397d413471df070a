//! Book catalog service
//!
//! Validates incoming payloads, rejects duplicate ISBNs, asks the summary
//! generator for a synopsis and persists the result. Each operation is a
//! short sequence of independent store calls; there is no cached state.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, NewBook, PaginatedResponse, UpdateBook},
    repository::BookStore,
};

use super::summary::SummaryGenerator;

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
    summaries: Arc<dyn SummaryGenerator>,
}

/// Present means non-blank
fn required(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::RequiredFieldMissing(field.to_string())),
    }
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>, summaries: Arc<dyn SummaryGenerator>) -> Self {
        Self { store, summaries }
    }

    /// List the whole catalog
    pub async fn list(&self) -> AppResult<PaginatedResponse<Book>> {
        let books = self.store.find_all().await?;
        Ok(PaginatedResponse::single_page(books))
    }

    /// Create a book.
    ///
    /// Checks run in a fixed order and the first failure wins: ISBN, ISBN
    /// uniqueness, title, author, publication year, language. The summary is
    /// generated only once every check has passed, and nothing is written if
    /// generation fails.
    pub async fn create(&self, req: CreateBook) -> AppResult<Book> {
        let isbn = required(req.isbn, "ISBN")?;

        if self.store.find_by_isbn(&isbn).await?.is_some() {
            return Err(AppError::DuplicateKey(isbn));
        }

        let title = required(req.title, "Title")?;
        let author = required(req.author, "Author")?;
        let publication_year = req
            .publication_year
            .filter(|year| *year != 0)
            .ok_or_else(|| AppError::RequiredFieldMissing("Publication Year".to_string()))?;
        let language = required(req.language, "Language")?;

        let summary = self.summaries.generate(&isbn, &title).await.map_err(|e| {
            tracing::error!("Summary generation failed for ISBN {}: {}", isbn, e);
            AppError::SummaryGenerationFailed
        })?;

        let book = self
            .store
            .insert(NewBook {
                isbn,
                title,
                author,
                publication_year,
                language,
                summary,
            })
            .await?;

        tracing::info!("Created book id={} isbn={}", book.id, book.isbn);
        Ok(book)
    }

    /// Partially update a book. The ISBN is not re-checked here and the
    /// summary is left as it was.
    pub async fn update(&self, id: &str, changes: UpdateBook) -> AppResult<Book> {
        let book_id = id
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| AppError::RequiredFieldMissing("id".to_string()))?;

        let mut book = self
            .store
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::not_found("Book", id))?;

        book.apply(changes);
        let saved = self.store.save(&book).await?;

        tracing::info!("Updated book id={}", saved.id);
        Ok(saved)
    }

    /// Distinct publication years, newest first
    pub async fn publication_years(&self) -> AppResult<PaginatedResponse<i32>> {
        let mut years = self.store.distinct_publication_years().await?;
        years.sort_unstable_by(|a, b| b.cmp(a));
        Ok(PaginatedResponse::single_page(years))
    }

    /// Distinct languages, in ascending lexical order
    pub async fn languages(&self) -> AppResult<PaginatedResponse<String>> {
        let mut languages = self.store.distinct_languages().await?;
        languages.sort();
        Ok(PaginatedResponse::single_page(languages))
    }
}
