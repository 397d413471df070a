//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{
    extract::FromRequest,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// `Json` body extractor whose rejections use the `AppError` body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/publication-years", get(books::list_publication_years))
        .route("/books/languages", get(books::list_languages))
        .route("/books/:id", put(books::update_book))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/auth/login", post(users::login))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
