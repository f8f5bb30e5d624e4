//! Role-based authorization on top of the token gate.
//!
//! Two forms, both built from [`AuthUser`]:
//! 1. Extractors ([`AdminUser`], [`FarmerUser`]) that handlers take when
//!    they need the caller's identity.
//! 2. A `require_admin` layer applied to the `/api/admin` subtree.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::{AuthIdentity, Role};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Extractor that rejects any caller who is not an administrator.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthIdentity);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;

        if identity.role != Role::Admin {
            return Err(AppError::forbidden(anyhow::anyhow!("Admin only")));
        }

        Ok(AdminUser(identity))
    }
}

/// Extractor that rejects any caller who is not a farmer.
#[derive(Debug, Clone)]
pub struct FarmerUser(pub AuthIdentity);

impl FromRequestParts<AppState> for FarmerUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;

        if identity.role != Role::Farmer {
            return Err(AppError::forbidden(anyhow::anyhow!("Farmer only")));
        }

        Ok(FarmerUser(identity))
    }
}

/// Layer form of the admin gate for `axum::middleware::from_fn_with_state`,
/// applied to the whole `/api/admin` subtree.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(AuthUser(identity)) if identity.role == Role::Admin => {
            next.run(Request::from_parts(parts, body)).await
        }
        Ok(_) => AppError::forbidden(anyhow::anyhow!("Admin only")).into_response(),
        Err(err) => err.into_response(),
    }
}
