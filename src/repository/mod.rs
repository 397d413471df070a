//! Repository layer for database operations
//!
//! Services talk to the store through the [`BookStore`] and [`UserStore`]
//! traits; the PostgreSQL implementations share one connection pool.

pub mod books;
pub mod users;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, NewBook, NewUser, User},
};

/// Persistence gateway for book records.
///
/// Every method is one independent round trip; nothing here spans a
/// transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Insert a new record. An ISBN collision is reported as `DuplicateKey`.
    async fn insert(&self, book: NewBook) -> AppResult<Book>;

    /// Upsert keyed by primary key
    async fn save(&self, book: &Book) -> AppResult<Book>;

    async fn distinct_publication_years(&self) -> AppResult<Vec<i32>>;

    async fn distinct_languages(&self) -> AppResult<Vec<String>>;
}

/// Persistence gateway for user accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a new account. A username collision is reported as `Conflict`.
    async fn insert(&self, user: NewUser) -> AppResult<User>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}

/// True when `err` is a unique-constraint violation reported by the database
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
