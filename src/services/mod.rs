//! Business logic services

pub mod books;
pub mod summary;
pub mod users;

use std::sync::Arc;

use crate::repository::Repository;

use summary::SummaryGenerator;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services over the shared pool and summary client
    pub fn new(repository: Repository, summaries: Arc<dyn SummaryGenerator>) -> Self {
        Self {
            books: books::BooksService::new(Arc::new(repository.books), summaries),
            users: users::UsersService::new(Arc::new(repository.users)),
        }
    }
}
