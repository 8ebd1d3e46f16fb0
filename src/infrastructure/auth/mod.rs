//! Bearer token issuance and verification.

pub mod jwt;

pub use jwt::JwtAuthenticator;

use crate::domain::entities::{Actor, User};
use crate::error::AppError;

/// Turns users into bearer tokens and bearer tokens back into actors.
///
/// Verification is stateless: the token alone determines the [`Actor`].
#[cfg_attr(test, mockall::automock)]
pub trait Authenticator: Send + Sync {
    /// Issues a token for `user`.
    fn issue(&self, user: &User) -> Result<String, AppError>;

    /// Verifies `token` and returns the identity it carries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for malformed, forged or expired tokens.
    fn verify(&self, token: &str) -> Result<Actor, AppError>;
}
