use once_cell::sync::Lazy;
use tokio::sync::Mutex;
use uuid::Uuid;

use contracts::domain::a003_supply_transaction::{
    AppendTransactionDto, SupplyTransaction, TransactionStatus, TransactionWithJoins,
};

use super::{lineage, repository};
use crate::domain::a001_product;
use crate::shared::error::AppError;

/// Single writer for appends. Two concurrent appends for one product would
/// otherwise read the same head and fork the chain.
static APPEND_GUARD: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Append a transaction to a product's chain.
///
/// The predecessor link and the chain token are assigned here, never taken
/// from the caller. `created_by` is the authenticated user's id.
pub async fn append(dto: AppendTransactionDto, created_by: String) -> Result<Uuid, AppError> {
    let product_id = Uuid::parse_str(dto.product_id.trim())
        .map_err(|_| AppError::validation("Product reference is not a valid UUID"))?;

    match a001_product::repository::get_by_id(product_id).await? {
        Some(p) if !p.base.metadata.is_deleted => {}
        _ => {
            return Err(AppError::validation(format!(
                "Unknown product: {}",
                product_id
            )))
        }
    }

    let _guard = APPEND_GUARD.lock().await;

    let latest = repository::latest_for_product(product_id).await?;
    let previous = lineage::resolve_previous(dto.kind, latest.map(|t| t.to_string_id()));

    let mut aggregate = SupplyTransaction::new_for_insert(
        format!("TRX-{}", Uuid::new_v4()),
        product_id.to_string(),
        dto.kind,
        dto.from_location_id.filter(|s| !s.trim().is_empty()),
        dto.to_location_id.filter(|s| !s.trim().is_empty()),
        dto.status.unwrap_or(TransactionStatus::Pending),
        lineage::chain_token(),
        previous,
        created_by,
    );
    aggregate.base.comment = dto.comment;

    aggregate.validate().map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Status is the only mutable field; the chain itself is append-only
pub async fn update_status(id: Uuid, status: TransactionStatus) -> Result<(), AppError> {
    let updated = repository::update_status(id, status).await?;
    if !updated {
        return Err(AppError::not_found(format!("transaction {}", id)));
    }
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> Result<Option<SupplyTransaction>, AppError> {
    repository::get_by_id(id).await
}

pub async fn list_with_joins() -> Result<Vec<TransactionWithJoins>, AppError> {
    repository::list_with_joins().await
}

/// Per-product history, oldest first (the chain in insertion order)
pub async fn history_for_product(product_id: Uuid) -> Result<Vec<SupplyTransaction>, AppError> {
    repository::list_by_product(product_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::ProductDto;
    use contracts::domain::a003_supply_transaction::TransactionKind;

    async fn init_test_db() {
        let path = "target/test-db/append.db";
        let _ = std::fs::remove_file(path);
        crate::shared::data::db::initialize_database(Some(path))
            .await
            .expect("test database");
    }

    fn append_dto(product_id: Uuid, kind: TransactionKind) -> AppendTransactionDto {
        AppendTransactionDto {
            product_id: product_id.to_string(),
            kind,
            from_location_id: None,
            to_location_id: None,
            status: None,
            comment: None,
        }
    }

    #[tokio::test]
    async fn append_links_to_most_recent_and_production_resets() {
        init_test_db().await;

        let product_id = crate::domain::a001_product::service::create(
            ProductDto {
                description: "Olive oil".into(),
                sku: Some("SKU-OIL-1".into()),
                ..Default::default()
            },
            Some("user-1".into()),
        )
        .await
        .expect("product");

        // Unknown product is rejected before anything is written
        let err = append(
            append_dto(Uuid::new_v4(), TransactionKind::Production),
            "user-1".into(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let production = append(append_dto(product_id, TransactionKind::Production), "user-1".into())
            .await
            .expect("production");
        let transport = append(append_dto(product_id, TransactionKind::Transport), "user-1".into())
            .await
            .expect("transport");
        let delivery = append(append_dto(product_id, TransactionKind::Delivery), "user-1".into())
            .await
            .expect("delivery");

        let history = history_for_product(product_id).await.expect("history");
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].to_string_id(), production.to_string());
        assert_eq!(history[0].previous_transaction_id, None);
        assert_eq!(
            history[1].previous_transaction_id,
            Some(production.to_string())
        );
        assert_eq!(history[2].to_string_id(), delivery.to_string());
        assert_eq!(
            history[2].previous_transaction_id,
            Some(transport.to_string())
        );
        assert!(history.iter().all(|t| t.chain_hash.starts_with("0x")));

        // A later production starts a fresh chain regardless of history
        let rerun = append(append_dto(product_id, TransactionKind::Production), "user-1".into())
            .await
            .expect("second production");
        let rerun = get_by_id(rerun).await.expect("get").expect("exists");
        assert_eq!(rerun.previous_transaction_id, None);
    }
}
