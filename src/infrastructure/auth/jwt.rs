//! HS256 JSON Web Token authenticator.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Authenticator;
use crate::domain::entities::{Actor, Role, User};
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub name: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtAuthenticator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtAuthenticator {
    /// Lifetimes beyond what `chrono` can represent saturate; issuing then
    /// fails with an internal error instead of wrapping to a past expiry.
    pub fn new(secret: &str, ttl_hours: u64) -> Self {
        let ttl = i64::try_from(ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .unwrap_or(Duration::MAX);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }
}

impl Authenticator for JwtAuthenticator {
    fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            tracing::error!(ttl_hours = self.ttl.num_hours(), "Token lifetime out of range");
            AppError::internal("Failed to issue token", json!({}))
        })?;

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.username.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            AppError::internal("Failed to issue token", json!({}))
        })
    }

    fn verify(&self, token: &str) -> Result<Actor, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                invalid_token()
            })?;

        let user_id = data.claims.sub.parse::<i64>().map_err(|_| invalid_token())?;

        Ok(Actor::new(user_id, data.claims.role))
    }
}

fn invalid_token() -> AppError {
    AppError::unauthorized(
        "Unauthorized",
        json!({"reason": "Invalid or expired token"}),
    )
}
