use super::repository;
use chrono::Utc;
use contracts::domain::a006_report::{Report, ReportDto, ReportFrequency};
use uuid::Uuid;

use crate::shared::error::AppError;

pub async fn create(dto: ReportDto, created_by: Option<String>) -> Result<Uuid, AppError> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("RPT-{}", Uuid::new_v4()));
    let mut aggregate = Report::new_for_insert(
        code,
        dto.description,
        dto.kind.unwrap_or_else(|| "supply_chain".into()),
        dto.frequency.unwrap_or(ReportFrequency::Monthly),
        created_by,
        dto.comment,
    );
    if let Some(status) = &dto.status {
        aggregate.status = status.clone();
    }
    aggregate.extra = dto.extra;

    aggregate.validate().map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: ReportDto) -> Result<(), AppError> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::validation("Invalid report ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("report {}", id)))?;

    aggregate.update(&dto);

    aggregate.validate().map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Stamp a manual run and schedule the next one from the frequency
pub async fn run(id: Uuid) -> Result<Report, AppError> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("report {}", id)))?;

    aggregate.mark_run(Utc::now());
    repository::update(&aggregate).await?;

    Ok(aggregate)
}

pub async fn delete(id: Uuid) -> Result<bool, AppError> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Report>, AppError> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<Report>, AppError> {
    repository::list_all().await
}
