use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use contracts::domain::a005_notification::{
    Notification, NotificationDto, NotificationKind, NotificationStatus,
};

use crate::domain::a005_notification;
use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentUser;

#[derive(Debug, Deserialize, Default)]
pub struct NotificationFilter {
    pub status: Option<String>,
    pub kind: Option<String>,
}

/// GET /api/notification?status=unread&kind=warning
pub async fn list(
    CurrentUser(claims): CurrentUser,
    Query(filter): Query<NotificationFilter>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let status = filter
        .status
        .as_deref()
        .filter(|s| !s.is_empty() && *s != "all")
        .map(|s| {
            NotificationStatus::parse(s)
                .ok_or_else(|| AppError::validation(format!("Unknown status filter: {}", s)))
        })
        .transpose()?;
    let kind = filter
        .kind
        .as_deref()
        .filter(|s| !s.is_empty() && *s != "all")
        .map(|s| {
            NotificationKind::parse(s)
                .ok_or_else(|| AppError::validation(format!("Unknown kind filter: {}", s)))
        })
        .transpose()?;

    Ok(Json(
        a005_notification::service::list_for_user(&claims.sub, status, kind).await?,
    ))
}

/// POST /api/notification
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<NotificationDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = a005_notification::service::create(dto, &claims.sub).await?;
    Ok(Json(json!({ "id": id.to_string() })))
}

/// POST /api/notification/:id/read
pub async fn mark_read(Path(id): Path<String>) -> Result<(), AppError> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::validation("Invalid notification ID"))?;
    a005_notification::service::mark_read(uuid).await
}

/// POST /api/notification/read-all
pub async fn mark_all_read(
    CurrentUser(claims): CurrentUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let updated = a005_notification::service::mark_all_read(&claims.sub).await?;
    Ok(Json(json!({ "updated": updated })))
}

/// DELETE /api/notification/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), AppError> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::validation("Invalid notification ID"))?;
    if a005_notification::service::delete(uuid).await? {
        Ok(())
    } else {
        Err(AppError::not_found(format!("notification {}", id)))
    }
}
