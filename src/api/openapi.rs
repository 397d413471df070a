//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "0.1.0",
        description = "Book catalog and user account REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::create_book,
        books::update_book,
        books::list_publication_years,
        books::list_languages,
        // Users
        users::list_users,
        users::create_user,
        users::login,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Users
            crate::models::user::User,
            crate::models::user::UserRole,
            crate::models::user::CreateUser,
            crate::models::user::LoginRequest,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "users", description = "User accounts")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
