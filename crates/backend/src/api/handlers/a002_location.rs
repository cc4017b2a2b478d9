use axum::extract::Path;
use axum::Json;
use serde_json::json;

use contracts::domain::a002_location::{Location, LocationDto};

use crate::domain::a002_location;
use crate::shared::error::AppError;

/// GET /api/location
pub async fn list_all() -> Result<Json<Vec<Location>>, AppError> {
    Ok(Json(a002_location::service::list_all().await?))
}

/// GET /api/location/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Location>, AppError> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::validation("Invalid location ID"))?;
    a002_location::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("location {}", id)))
}

/// POST /api/location
pub async fn upsert(Json(dto): Json<LocationDto>) -> Result<Json<serde_json::Value>, AppError> {
    let id = if dto.id.is_some() {
        a002_location::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())?
    } else {
        a002_location::service::create(dto)
            .await
            .map(|id| id.to_string())?
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/location/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), AppError> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::validation("Invalid location ID"))?;
    if a002_location::service::delete(uuid).await? {
        Ok(())
    } else {
        Err(AppError::not_found(format!("location {}", id)))
    }
}
