//! User account service

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{CreateUser, LoginRequest, NewUser, PaginatedResponse, User},
    repository::UserStore,
};

#[derive(Clone)]
pub struct UsersService {
    store: Arc<dyn UserStore>,
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

impl UsersService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<PaginatedResponse<User>> {
        let users = self.store.find_all().await?;
        Ok(PaginatedResponse::single_page(users))
    }

    /// Create a new account with a hashed password
    pub async fn create(&self, user: CreateUser) -> AppResult<User> {
        user.validate()?;

        if self.store.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let created = self
            .store
            .insert(NewUser {
                password_hash: hash_password(&user.password)?,
                user_role: user.user_role.unwrap_or_default(),
                username: user.username,
            })
            .await?;

        tracing::info!("Created user id={} username={}", created.id, created.username);
        Ok(created)
    }

    /// Check a username/password pair. Issues no token or session.
    pub async fn check_credentials(&self, login: LoginRequest) -> AppResult<User> {
        login.validate()?;

        let invalid = || AppError::Authentication("Invalid username or password".to_string());

        let user = self
            .store
            .find_by_username(&login.username)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&user.password, &login.password)? {
            tracing::warn!("Failed login attempt for {}", login.username);
            return Err(invalid());
        }

        Ok(user)
    }
}
