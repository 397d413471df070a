//! Data models for Bookshelf

pub mod book;
pub mod pagination;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook, NewBook, UpdateBook};
pub use pagination::PaginatedResponse;
pub use user::{CreateUser, LoginRequest, NewUser, User, UserRole};
