//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User roles, stored as SMALLINT
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Unknown = 0,
    Admin = 1,
}

impl From<i16> for UserRole {
    fn from(v: i16) -> Self {
        match v {
            1 => UserRole::Admin,
            _ => UserRole::Unknown,
        }
    }
}

impl From<UserRole> for i16 {
    fn from(role: UserRole) -> Self {
        role as i16
    }
}

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password: String,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create user request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(length(min = 3, max = 64, message = "Username must be 3 to 64 characters"))]
    pub username: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    pub user_role: Option<UserRole>,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// User ready for insertion, password already hashed
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub user_role: UserRole,
}
