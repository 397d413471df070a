//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::AppJson;
use crate::{
    error::AppResult,
    models::{Book, CreateBook, PaginatedResponse, UpdateBook},
};

/// List every book
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books as a single page { page, count, total, items }")
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<PaginatedResponse<Book>>> {
    let page = state.services.books.list().await?;
    Ok(Json(page))
}

/// Create a book; its summary is generated
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Required field missing", body = crate::error::ErrorResponse),
        (status = 409, description = "A book with this ISBN already exists", body = crate::error::ErrorResponse),
        (status = 502, description = "Summary generation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AppJson(data): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.create(data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update some fields of a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid id", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    AppJson(data): AppJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.update(&id, data).await?;
    Ok(Json(book))
}

/// Distinct publication years, newest first
#[utoipa::path(
    get,
    path = "/books/publication-years",
    tag = "books",
    responses(
        (status = 200, description = "Publication years as a single page")
    )
)]
pub async fn list_publication_years(
    State(state): State<crate::AppState>,
) -> AppResult<Json<PaginatedResponse<i32>>> {
    let page = state.services.books.publication_years().await?;
    Ok(Json(page))
}

/// Distinct languages
#[utoipa::path(
    get,
    path = "/books/languages",
    tag = "books",
    responses(
        (status = 200, description = "Languages as a single page")
    )
)]
pub async fn list_languages(State(state): State<crate::AppState>) -> AppResult<Json<PaginatedResponse<String>>> {
    let page = state.services.books.languages().await?;
    Ok(Json(page))
}
