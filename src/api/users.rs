//! User account endpoints

use axum::{extract::State, http::StatusCode, Json};

use super::AppJson;
use crate::{
    error::AppResult,
    models::{CreateUser, LoginRequest, PaginatedResponse, User},
};

/// List user accounts
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users as a single page")
    )
)]
pub async fn list_users(State(state): State<crate::AppState>) -> AppResult<Json<PaginatedResponse<User>>> {
    let page = state.services.users.list().await?;
    Ok(Json(page))
}

/// Create a user account
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Username already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    AppJson(data): AppJson<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.services.users.create(data).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Check a username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials are valid", body = User),
        (status = 401, description = "Invalid username or password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    AppJson(data): AppJson<LoginRequest>,
) -> AppResult<Json<User>> {
    let user = state.services.users.check_credentials(data).await?;
    Ok(Json(user))
}
