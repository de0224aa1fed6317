//! Account registration, login and JWT session tokens.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::task;
use tracing::{info, warn};

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// JWT payload. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Numeric user id carried in `sub`.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Service for user accounts and bearer tokens.
///
/// Passwords are stored as Argon2id hashes. Tokens are HS256 JWTs signed with
/// the configured secret.
pub struct AuthService<U: UserRepository> {
    repository: Arc<U>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(repository: Arc<U>, jwt_secret: &str, token_ttl_hours: i64) -> Self {
        Self {
            repository,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    /// Creates an account.
    ///
    /// The email is lowercased before storage and lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or username is taken.
    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        let email = normalize_email(&registration.email);
        let username = registration.username.trim().to_string();

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "Email already registered",
                json!({ "field": "email" }),
            ));
        }

        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict(
                "Username already taken",
                json!({ "field": "username" }),
            ));
        }

        let password_hash = hash(&registration.password).await?;

        let user = self
            .repository
            .create(NewUser {
                name: registration.name.trim().to_string(),
                username,
                email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Checks credentials and issues a token.
    ///
    /// Unknown email and wrong password produce the same error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let email = normalize_email(email);

        let Some(user) = self.repository.find_by_email(&email).await? else {
            return Err(invalid_credentials());
        };

        if !verify(password, &user.password_hash).await? {
            warn!(user_id = user.id, "Login with wrong password");
            return Err(invalid_credentials());
        }

        let token = self.issue_token(&user)?;
        Ok((token, user))
    }

    /// Replaces the password after checking the current one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `current_password` is wrong.
    /// Returns [`AppError::NotFound`] if the user no longer exists.
    pub async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))?;

        if !verify(current_password, &user.password_hash).await? {
            return Err(AppError::bad_request(
                "Current password is incorrect",
                json!({ "field": "current_password" }),
            ));
        }

        let password_hash = hash(new_password).await?;
        self.repository
            .update_password(user_id, &password_hash)
            .await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    /// Signs a token for `user` valid for the configured lifetime.
    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::internal("Failed to sign token", json!({ "reason": e.to_string() }))
        })
    }

    /// Validates signature and expiry of a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for malformed, forged or expired tokens.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or expired token", "kind": format!("{:?}", e.kind()) }),
                )
            })?;

        Ok(data.claims)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(INVALID_CREDENTIALS, json!({}))
}

// Argon2 is CPU-bound; keep it off the async worker threads.
async fn hash(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(blocking_failed)?
        .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e.to_string() })))
}

async fn verify(password: &str, hash: &str) -> Result<bool, AppError> {
    let (password, hash) = (password.to_owned(), hash.to_owned());
    task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(blocking_failed)?
        .map_err(|e| {
            AppError::internal(
                "Stored password hash is invalid",
                json!({ "reason": e.to_string() }),
            )
        })
}

fn blocking_failed(e: task::JoinError) -> AppError {
    AppError::internal("Password task failed", json!({ "reason": e.to_string() }))
}
