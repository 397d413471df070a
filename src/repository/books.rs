//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{is_unique_violation, BookStore};
use crate::{
    error::{AppError, AppResult},
    models::{Book, NewBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn insert(&self, book: NewBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (isbn, title, author, publication_year, language, summary)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.publication_year)
        .bind(&book.language)
        .bind(&book.summary)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateKey(book.isbn.clone())
            } else {
                AppError::Database(e)
            }
        })
    }

    async fn save(&self, book: &Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, isbn, title, author, publication_year, language, summary)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                isbn = EXCLUDED.isbn,
                title = EXCLUDED.title,
                author = EXCLUDED.author,
                publication_year = EXCLUDED.publication_year,
                language = EXCLUDED.language,
                summary = EXCLUDED.summary,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(book.id)
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.publication_year)
        .bind(&book.language)
        .bind(&book.summary)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateKey(book.isbn.clone())
            } else {
                AppError::Database(e)
            }
        })
    }

    async fn distinct_publication_years(&self) -> AppResult<Vec<i32>> {
        let years: Vec<i32> = sqlx::query_scalar("SELECT DISTINCT publication_year FROM books")
            .fetch_all(&self.pool)
            .await?;
        Ok(years)
    }

    async fn distinct_languages(&self) -> AppResult<Vec<String>> {
        let languages: Vec<String> = sqlx::query_scalar("SELECT DISTINCT language FROM books")
            .fetch_all(&self.pool)
            .await?;
        Ok(languages)
    }
}
