//! Account registration, login, and bearer token authentication.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{Actor, NewUser, Role, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::auth::Authenticator;
use crate::utils::password::{hash_password, verify_password};

/// Service for user accounts and the tokens that identify them.
///
/// Passwords are stored as Argon2 hashes. Tokens are issued and verified by
/// the [`Authenticator`], so checking a token never touches the database.
pub struct AuthService<U: UserRepository, A: Authenticator> {
    users: Arc<U>,
    authenticator: Arc<A>,
}

impl<U: UserRepository, A: Authenticator> AuthService<U, A> {
    pub fn new(users: Arc<U>, authenticator: Arc<A>) -> Self {
        Self {
            users,
            authenticator,
        }
    }

    /// Registers a regular user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        self.create_user(username, password, Role::User).await
    }

    /// Creates a user with an explicit role.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AppError::internal("Failed to create user", json!({}))
        })?;

        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::conflict(
                    "Username already exists",
                    json!({ "username": username }),
                ),
                other => other,
            })?;

        info!(user_id = user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    /// Checks credentials and issues a bearer token.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<(String, User), AppError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            warn!(username, "Login failed: unknown user");
            return Err(invalid_credentials());
        };

        let matches = verify_password(password, &user.password_hash).map_err(|e| {
            tracing::error!(user_id = user.id, error = %e, "Stored password hash is unusable");
            AppError::internal("Login failed", json!({}))
        })?;

        if !matches {
            warn!(username, "Login failed: wrong password");
            return Err(invalid_credentials());
        }

        let token = self.authenticator.issue(&user)?;
        info!(user_id = user.id, "User logged in");

        Ok((token, user))
    }

    /// Resolves a bearer token into the acting identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid or expired.
    pub fn authenticate(&self, token: &str) -> Result<Actor, AppError> {
        self.authenticator.verify(token)
    }

    /// Loads the account behind `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account was deleted after the
    /// token was issued.
    pub async fn get_profile(&self, actor: &Actor) -> Result<User, AppError> {
        self.users
            .find_by_id(actor.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": actor.user_id })))
    }

    /// Makes sure an admin account named `username` exists.
    ///
    /// Existing accounts are left untouched, including their password.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<User, AppError> {
        if let Some(existing) = self.users.find_by_username(username).await? {
            if !existing.is_admin() {
                warn!(username, "Seed admin name belongs to a regular user");
            }
            return Ok(existing);
        }

        info!(username, "Seeding admin account");
        self.create_user(username, password, Role::Admin).await
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(
        "Invalid username or password",
        json!({"reason": "invalid_credentials"}),
    )
}
