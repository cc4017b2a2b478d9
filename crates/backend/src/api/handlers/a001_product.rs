use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use contracts::domain::a001_product::{Product, ProductDto};

use crate::domain::a001_product;
use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/product
pub async fn list_all() -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(a001_product::service::list_all().await?))
}

/// GET /api/product/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Product>, AppError> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::validation("Invalid product ID"))?;
    a001_product::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("product {}", id)))
}

#[derive(Debug, Deserialize)]
pub struct SkuQuery {
    pub sku: String,
}

/// GET /api/product/search?sku=...
pub async fn search_by_sku(
    Query(query): Query<SkuQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(a001_product::service::search_by_sku(&query.sku).await?))
}

/// POST /api/product
pub async fn upsert(
    user: Option<CurrentUser>,
    Json(dto): Json<ProductDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = if dto.id.is_some() {
        a001_product::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())?
    } else {
        let created_by = user.map(|CurrentUser(claims)| claims.sub);
        a001_product::service::create(dto, created_by)
            .await
            .map(|id| id.to_string())?
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/product/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), AppError> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::validation("Invalid product ID"))?;
    if a001_product::service::delete(uuid).await? {
        Ok(())
    } else {
        Err(AppError::not_found(format!("product {}", id)))
    }
}
