use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{Claims, Role};
use crate::utils::errors::AppError;

/// Issue a signed bearer token for the given subject. The expiry window
/// depends on the role: admin sessions are short-lived, farmer sessions
/// last longer so field devices do not need to re-authenticate daily.
pub fn issue_token(subject: Uuid, role: Role, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let ttl = match role {
        Role::Admin => jwt_config.admin_token_expiry,
        Role::Farmer => jwt_config.farmer_token_expiry,
    } as usize;

    let claims = Claims {
        sub: subject.to_string(),
        role: role.as_str().to_string(),
        exp: now + ttl,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verify and decode a bearer token. Fails on a bad signature, a malformed
/// structure, or a passed expiry. Expiry is the only invalidation
/// mechanism; there is no revocation list.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid token")))
}
