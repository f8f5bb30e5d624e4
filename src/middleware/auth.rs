use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::modules::auth::model::{AuthIdentity, Role};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer token and yields the authenticated
/// identity. This is the only place a request gains an identity; role
/// enforcement on top of it lives in [`crate::middleware::role`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthIdentity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("No token provided")))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("No token provided")))?;

        let claims = verify_token(token, &state.jwt_config)?;

        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid token")))?;
        let role = Role::parse(&claims.role)
            .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid token")))?;

        Ok(AuthUser(AuthIdentity { id, role }))
    }
}
