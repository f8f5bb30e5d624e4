//! Idempotent startup seeding.

use sqlx::PgPool;
use tracing::info;

use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Create the default administrator account iff the admins table is
/// empty. Runs exactly once per process start, guarded by a count check,
/// so restarts and concurrent deployments do not duplicate the account.
pub async fn ensure_default_admin(db: &PgPool) -> Result<(), AppError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
        .fetch_one(db)
        .await?;

    if count > 0 {
        return Ok(());
    }

    let hashed = hash_password(DEFAULT_ADMIN_PASSWORD)?;
    sqlx::query("INSERT INTO admins (username, password) VALUES ($1, $2)")
        .bind(DEFAULT_ADMIN_USERNAME)
        .bind(&hashed)
        .execute(db)
        .await?;

    info!(
        username = DEFAULT_ADMIN_USERNAME,
        "Created default admin account; change its password immediately"
    );

    Ok(())
}
