//! Users repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{is_unique_violation, UserStore};
use crate::{
    error::{AppError, AppResult},
    models::{NewUser, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UsersRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, user_role)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.user_role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Username already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })
    }
}
