use std::env;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Admin token lifetime in seconds (default 12 hours).
    pub admin_token_expiry: i64,
    /// Farmer token lifetime in seconds (default 7 days).
    pub farmer_token_expiry: i64,
}

impl JwtConfig {
    /// Reads the JWT configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set. There is deliberately no
    /// hardcoded fallback secret.
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            admin_token_expiry: env::var("JWT_ADMIN_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(43_200), // 12 hours
            farmer_token_expiry: env::var("JWT_FARMER_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604_800), // 7 days
        }
    }
}
