use axum::extract::Path;
use axum::Json;
use serde_json::json;

use contracts::domain::a004_logistics_detail::{LogisticsDetail, LogisticsDetailDto};

use crate::domain::a004_logistics_detail;
use crate::shared::error::AppError;

/// GET /api/logistics_detail
pub async fn list_all() -> Result<Json<Vec<LogisticsDetail>>, AppError> {
    Ok(Json(a004_logistics_detail::service::list_all().await?))
}

/// GET /api/logistics_detail/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<LogisticsDetail>, AppError> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::validation("Invalid logistics detail ID"))?;
    a004_logistics_detail::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("logistics detail {}", id)))
}

/// GET /api/logistics_detail/by-transaction/:transaction_id
pub async fn list_by_transaction(
    Path(transaction_id): Path<String>,
) -> Result<Json<Vec<LogisticsDetail>>, AppError> {
    let uuid = uuid::Uuid::parse_str(&transaction_id)
        .map_err(|_| AppError::validation("Invalid transaction ID"))?;
    Ok(Json(
        a004_logistics_detail::service::list_by_transaction(uuid).await?,
    ))
}

/// POST /api/logistics_detail
pub async fn upsert(
    Json(dto): Json<LogisticsDetailDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = if dto.id.is_some() {
        a004_logistics_detail::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())?
    } else {
        a004_logistics_detail::service::create(dto)
            .await
            .map(|id| id.to_string())?
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/logistics_detail/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), AppError> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::validation("Invalid logistics detail ID"))?;
    if a004_logistics_detail::service::delete(uuid).await? {
        Ok(())
    } else {
        Err(AppError::not_found(format!("logistics detail {}", id)))
    }
}
