use super::repository;
use contracts::domain::a002_location::{Location, LocationDto, LocationType};
use uuid::Uuid;

use crate::shared::error::AppError;

pub async fn create(dto: LocationDto) -> Result<Uuid, AppError> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("LOC-{}", Uuid::new_v4()));
    let mut aggregate = Location::new_for_insert(
        code,
        dto.description,
        dto.address.unwrap_or_default(),
        dto.location_type.unwrap_or(LocationType::Warehouse),
        dto.latitude,
        dto.longitude,
        dto.comment,
    );
    aggregate.extra = dto.extra;

    aggregate.validate().map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: LocationDto) -> Result<(), AppError> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::validation("Invalid location ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("location {}", id)))?;

    aggregate.update(&dto);

    aggregate.validate().map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> Result<bool, AppError> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Location>, AppError> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<Location>, AppError> {
    repository::list_all().await
}
