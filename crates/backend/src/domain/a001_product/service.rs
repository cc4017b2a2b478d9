use super::repository;
use contracts::domain::a001_product::{Product, ProductDto, ProductStatus};
use uuid::Uuid;

use crate::shared::error::AppError;

pub async fn create(dto: ProductDto, created_by: Option<String>) -> Result<Uuid, AppError> {
    let sku = dto.sku.clone().map(|s| s.trim().to_string()).unwrap_or_default();

    // SKU является бизнес-ключом: дубликат при создании отклоняем
    if !sku.is_empty() && !repository::find_by_sku(&sku).await?.is_empty() {
        return Err(AppError::validation(format!("SKU already in use: {}", sku)));
    }

    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("PRD-{}", Uuid::new_v4()));
    let mut aggregate = Product::new_for_insert(
        code,
        dto.description,
        sku,
        dto.full_description.unwrap_or_default(),
        dto.category.unwrap_or_default(),
        dto.status.unwrap_or(ProductStatus::Active),
        created_by,
        dto.comment,
    );
    aggregate.extra = dto.extra;

    aggregate.validate().map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: ProductDto) -> Result<(), AppError> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::validation("Invalid product ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("product {}", id)))?;

    aggregate.update(&dto);

    aggregate.validate().map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> Result<bool, AppError> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Product>, AppError> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<Product>, AppError> {
    repository::list_all().await
}

pub async fn search_by_sku(sku: &str) -> Result<Vec<Product>, AppError> {
    repository::find_by_sku(sku.trim()).await
}
