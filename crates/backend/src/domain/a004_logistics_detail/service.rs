use super::repository;
use contracts::domain::a004_logistics_detail::{LogisticsDetail, LogisticsDetailDto};
use uuid::Uuid;

use crate::domain::a003_supply_transaction;
use crate::shared::error::AppError;

pub async fn create(dto: LogisticsDetailDto) -> Result<Uuid, AppError> {
    let transaction_id = dto
        .transaction_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::validation("Transaction reference is required"))?;

    // Детали привязываются только к существующей транзакции
    if a003_supply_transaction::repository::get_by_id(transaction_id)
        .await?
        .is_none()
    {
        return Err(AppError::validation(format!(
            "Unknown transaction: {}",
            transaction_id
        )));
    }

    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("LGD-{}", Uuid::new_v4()));
    let mut aggregate = LogisticsDetail::new_for_insert(
        code,
        transaction_id.to_string(),
        dto.temperature,
        dto.humidity,
        dto.transport_vehicle.clone(),
        dto.transport_duration.clone(),
        dto.storage_conditions.clone(),
        dto.comment.clone(),
    );
    aggregate.quality_checks = dto.quality_checks.clone();
    aggregate.additional_data = dto.additional_data.clone();

    aggregate.validate().map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: LogisticsDetailDto) -> Result<(), AppError> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::validation("Invalid logistics detail ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("logistics detail {}", id)))?;

    aggregate.update(&dto);

    aggregate.validate().map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> Result<bool, AppError> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<LogisticsDetail>, AppError> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<LogisticsDetail>, AppError> {
    repository::list_all().await
}

pub async fn list_by_transaction(transaction_id: Uuid) -> Result<Vec<LogisticsDetail>, AppError> {
    repository::list_by_transaction(transaction_id).await
}
