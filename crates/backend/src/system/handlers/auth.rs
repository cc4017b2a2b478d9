use axum::extract::Json;
use axum::http::StatusCode;
use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};

use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentUser;
use crate::system::{auth::jwt, users::service as user_service};

fn user_info(user: contracts::system::users::User) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        company_name: user.company_name,
        email: user.email,
        is_admin: user.is_admin,
    }
}

/// POST /api/system/auth/login
pub async fn login(Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, AppError> {
    // Verify credentials; a bad pair and an inactive account both read as 401
    let user = user_service::verify_credentials(&request.username, &request.password)
        .await
        .map_err(|_| AppError::NotAuthenticated)?
        .ok_or(AppError::NotAuthenticated)?;

    // Generate tokens
    let access_token = jwt::generate_access_token(&user.id, &user.username, user.is_admin).await?;
    let refresh_token = jwt::generate_refresh_token();

    // Store refresh token in database
    store_refresh_token(&user.id, &refresh_token).await?;

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        user: user_info(user),
    }))
}

/// POST /api/system/auth/refresh
pub async fn refresh(
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    // Validate refresh token from database
    let user_id = validate_refresh_token(&request.refresh_token)
        .await
        .map_err(|_| AppError::NotAuthenticated)?;

    let user = user_service::get_by_id(&user_id)
        .await?
        .ok_or(AppError::NotAuthenticated)?;

    let access_token = jwt::generate_access_token(&user.id, &user.username, user.is_admin).await?;

    Ok(Json(RefreshResponse { access_token }))
}

/// POST /api/system/auth/logout
pub async fn logout(Json(request): Json<RefreshRequest>) -> Result<StatusCode, AppError> {
    revoke_refresh_token(&request.refresh_token).await?;
    Ok(StatusCode::OK)
}

/// GET /api/system/auth/me (protected by middleware)
pub async fn current_user(CurrentUser(claims): CurrentUser) -> Result<Json<UserInfo>, AppError> {
    let user = user_service::get_by_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::not_found(format!("user {}", claims.sub)))?;

    Ok(Json(user_info(user)))
}

// Helper functions for refresh tokens

async fn store_refresh_token(user_id: &str, token: &str) -> anyhow::Result<()> {
    use crate::shared::data::db::get_connection;
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let token_id = uuid::Uuid::new_v4().to_string();
    let token_hash = hash_token(token);
    let expires_at = jwt::calculate_refresh_token_expiration();
    let created_at = Utc::now().to_rfc3339();

    let conn = get_connection();
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_refresh_tokens (id, user_id, token_hash, expires_at, created_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            token_id.into(),
            user_id.to_string().into(),
            token_hash.into(),
            expires_at.into(),
            created_at.into(),
        ],
    ))
    .await?;

    Ok(())
}

async fn validate_refresh_token(token: &str) -> anyhow::Result<String> {
    use crate::shared::data::db::get_connection;
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let token_hash = hash_token(token);
    let now = Utc::now().to_rfc3339();

    let conn = get_connection();
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT user_id FROM sys_refresh_tokens
             WHERE token_hash = ? AND expires_at > ? AND revoked_at IS NULL",
            [token_hash.into(), now.into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let user_id: String = row.try_get("", "user_id")?;
            Ok(user_id)
        }
        None => Err(anyhow::anyhow!("Invalid or expired refresh token")),
    }
}

async fn revoke_refresh_token(token: &str) -> anyhow::Result<()> {
    use crate::shared::data::db::get_connection;
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let token_hash = hash_token(token);
    let revoked_at = Utc::now().to_rfc3339();

    let conn = get_connection();
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_refresh_tokens SET revoked_at = ? WHERE token_hash = ?",
        [revoked_at.into(), token_hash.into()],
    ))
    .await?;

    Ok(())
}

fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
