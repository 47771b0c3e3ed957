use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

/// Claims carried by bearer tokens issued by the account system.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Login of the caller
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(login: impl Into<String>, ttl: SignedDuration) -> Self {
        let now = Timestamp::now();
        Self {
            sub: login.into(),
            iat: now.as_second(),
            exp: now.as_second() + ttl.as_secs(),
        }
    }
}

/// Signs an HS256 access token for `login`.
///
/// Tokens are normally minted by the account system; this is used by the
/// test suite and for local tooling.
pub fn generate_access_token(login: &str, secret: &str, ttl: SignedDuration) -> AppResult<String> {
    let claims = Claims::new(login, ttl);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Verifies signature and expiry and returns the claims.
pub fn validate_access_token(token: &str, config: &JwtConfig) -> AppResult<Claims> {
    let mut validation = Validation::default();
    validation.leeway = config.leeway;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::unauthorized("Token has expired")
        }
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::unauthorized("Invalid token signature")
        }
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::unauthorized("Invalid token"),
        _ => AppError::unauthorized(format!("Token validation failed: {}", e)),
    })?;

    if claims.sub.trim().is_empty() {
        return Err(AppError::unauthorized("Token has no subject"));
    }

    Ok(claims)
}
