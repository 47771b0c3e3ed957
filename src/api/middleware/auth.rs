//! Bearer token authentication.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Authenticated caller, inserted into request extensions by
/// [`auth_middleware`] and read with `Extension<AuthUser>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub login: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { login: claims.sub }
    }
}

/// Rejects the request with 401 unless it carries `Authorization: Bearer <jwt>`
/// signed with the configured secret.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized("Invalid authorization header format. Expected: Bearer <token>")
    })?;

    let claims = validate_access_token(token.trim(), &state.jwt_config)?;
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_user_from_claims() {
        let claims = Claims {
            sub: "alice".to_string(),
            iat: 0,
            exp: 9_999_999_999,
        };
        assert_eq!(
            AuthUser::from(claims),
            AuthUser {
                login: "alice".to_string()
            }
        );
    }
}
