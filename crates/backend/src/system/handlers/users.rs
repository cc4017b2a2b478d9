use axum::extract::{Json, Path};
use axum::http::StatusCode;
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};
use serde_json::json;

use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// GET /api/system/users
pub async fn list(CurrentUser(_claims): CurrentUser) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(service::list_all().await?))
}

/// POST /api/system/users
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateUserDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = service::create(dto, Some(claims.sub))
        .await
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(Json(json!({ "id": id })))
}

/// GET /api/system/users/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<User>, AppError> {
    service::get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("user {}", id)))
}

/// PUT /api/system/users/:id
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<UpdateUserDto>,
) -> Result<StatusCode, AppError> {
    dto.id = id;
    service::update(dto)
        .await
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(StatusCode::OK)
}

/// DELETE /api/system/users/:id
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    // Нельзя удалить собственную учётную запись
    if claims.sub == id {
        return Err(AppError::validation("Cannot delete your own account"));
    }
    if service::delete(&id).await? {
        Ok(StatusCode::OK)
    } else {
        Err(AppError::not_found(format!("user {}", id)))
    }
}

/// POST /api/system/users/:id/change-password
pub async fn change_password(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(mut dto): Json<ChangePasswordDto>,
) -> Result<StatusCode, AppError> {
    dto.user_id = id;
    service::change_password(dto, &claims.sub)
        .await
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(StatusCode::OK)
}
