use super::repository;
use contracts::domain::a005_notification::{
    Notification, NotificationDto, NotificationKind, NotificationStatus,
};
use uuid::Uuid;

use crate::shared::error::AppError;

pub async fn create(dto: NotificationDto, default_user: &str) -> Result<Uuid, AppError> {
    let user_id = dto
        .user_id
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default_user.to_string());

    let mut aggregate = Notification::new_for_insert(
        format!("NTF-{}", Uuid::new_v4()),
        user_id,
        dto.title,
        dto.message,
        dto.kind.unwrap_or(NotificationKind::Info),
    );

    aggregate.validate().map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn list_for_user(
    user_id: &str,
    status: Option<NotificationStatus>,
    kind: Option<NotificationKind>,
) -> Result<Vec<Notification>, AppError> {
    repository::list_filtered(user_id, status, kind).await
}

pub async fn mark_read(id: Uuid) -> Result<(), AppError> {
    if !repository::mark_read(id).await? {
        return Err(AppError::not_found(format!("notification {}", id)));
    }
    Ok(())
}

pub async fn mark_all_read(user_id: &str) -> Result<u64, AppError> {
    repository::mark_all_read(user_id).await
}

pub async fn delete(id: Uuid) -> Result<bool, AppError> {
    repository::soft_delete(id).await
}
