use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{
    AdminLoginRequest, AdminLoginResponse, ChangePasswordRequest, FarmerLoginRequest,
    FarmerLoginResponse, Role,
};
use crate::utils::errors::AppError;
use crate::utils::jwt::issue_token;
use crate::utils::password::{hash_password, verify_password};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn admin_login(
        db: &PgPool,
        dto: AdminLoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AdminLoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct AdminRow {
            id: Uuid,
            password: String,
        }

        let admin = sqlx::query_as::<_, AdminRow>(
            "SELECT id, password FROM admins WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid admin")))?;

        if !verify_password(&dto.password, &admin.password)? {
            return Err(AppError::unauthorized(anyhow::anyhow!("Invalid admin")));
        }

        let token = issue_token(admin.id, Role::Admin, jwt_config)?;

        Ok(AdminLoginResponse { token })
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn farmer_login(
        db: &PgPool,
        dto: FarmerLoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<FarmerLoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct FarmerRow {
            id: Uuid,
            name: String,
            password: String,
        }

        let farmer = sqlx::query_as::<_, FarmerRow>(
            "SELECT id, name, password FROM farmers WHERE phone = $1",
        )
        .bind(&dto.phone)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid credentials")))?;

        if !verify_password(&dto.password, &farmer.password)? {
            return Err(AppError::unauthorized(anyhow::anyhow!("Invalid credentials")));
        }

        let token = issue_token(farmer.id, Role::Farmer, jwt_config)?;

        Ok(FarmerLoginResponse {
            token,
            farmer_id: farmer.id,
            name: farmer.name,
        })
    }

    /// Change an administrator's password. Requires presenting the current
    /// password; a mismatch fails with 401, never a silent overwrite.
    #[instrument(skip(db, dto))]
    pub async fn change_admin_password(
        db: &PgPool,
        admin_id: Uuid,
        dto: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let current_hash =
            sqlx::query_scalar::<_, String>("SELECT password FROM admins WHERE id = $1")
                .bind(admin_id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Admin not found")))?;

        if !verify_password(&dto.old_password, &current_hash)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Old password incorrect"
            )));
        }

        let new_hash = hash_password(&dto.new_password)?;
        sqlx::query("UPDATE admins SET password = $1 WHERE id = $2")
            .bind(&new_hash)
            .bind(admin_id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Verify an administrator's password out of band (used to confirm
    /// destructive operations such as farmer deletion).
    #[instrument(skip(db, password))]
    pub async fn verify_admin_password(
        db: &PgPool,
        admin_id: Uuid,
        password: &str,
    ) -> Result<(), AppError> {
        let current_hash =
            sqlx::query_scalar::<_, String>("SELECT password FROM admins WHERE id = $1")
                .bind(admin_id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Admin not found")))?;

        if !verify_password(password, &current_hash)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Admin password incorrect"
            )));
        }

        Ok(())
    }
}
