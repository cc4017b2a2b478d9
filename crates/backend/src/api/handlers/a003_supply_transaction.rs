use axum::extract::Path;
use axum::Json;
use serde_json::json;

use contracts::domain::a003_supply_transaction::{
    AppendTransactionDto, SupplyTransaction, TransactionWithJoins, UpdateStatusDto,
};

use crate::domain::a003_supply_transaction;
use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/supply_transaction (joined listing, newest first)
pub async fn list_all() -> Result<Json<Vec<TransactionWithJoins>>, AppError> {
    Ok(Json(a003_supply_transaction::service::list_with_joins().await?))
}

/// GET /api/supply_transaction/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<SupplyTransaction>, AppError> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::validation("Invalid transaction ID"))?;
    a003_supply_transaction::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("transaction {}", id)))
}

/// GET /api/supply_transaction/by-product/:product_id (chain history, oldest first)
pub async fn history_for_product(
    Path(product_id): Path<String>,
) -> Result<Json<Vec<SupplyTransaction>>, AppError> {
    let uuid = uuid::Uuid::parse_str(&product_id)
        .map_err(|_| AppError::validation("Invalid product ID"))?;
    Ok(Json(
        a003_supply_transaction::service::history_for_product(uuid).await?,
    ))
}

/// POST /api/supply_transaction: append to the product's chain.
/// Requires an authenticated user; the server assigns the predecessor link
/// and the chain token.
pub async fn append(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<AppendTransactionDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = a003_supply_transaction::service::append(dto, claims.sub).await?;
    Ok(Json(json!({ "id": id.to_string() })))
}

/// PUT /api/supply_transaction/:id/status
pub async fn update_status(
    Path(id): Path<String>,
    Json(dto): Json<UpdateStatusDto>,
) -> Result<(), AppError> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::validation("Invalid transaction ID"))?;
    a003_supply_transaction::service::update_status(uuid, dto.status).await
}
