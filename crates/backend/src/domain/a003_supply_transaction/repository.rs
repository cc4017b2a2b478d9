use chrono::Utc;
use contracts::domain::a003_supply_transaction::{
    SupplyTransaction, SupplyTransactionId, TransactionKind, TransactionStatus,
    TransactionWithJoins,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, Set, Statement,
};

use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_supply_transaction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub product_id: String,
    pub kind: String,
    pub from_location_id: Option<String>,
    pub to_location_id: Option<String>,
    pub status: String,
    pub chain_hash: String,
    pub previous_transaction_id: Option<String>,
    pub created_by: Option<String>,
    pub extra: Option<Json>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SupplyTransaction {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        SupplyTransaction {
            base: BaseAggregate::with_metadata(
                SupplyTransactionId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            product_id: m.product_id,
            kind: TransactionKind::parse(&m.kind).unwrap_or(TransactionKind::Storage),
            from_location_id: m.from_location_id,
            to_location_id: m.to_location_id,
            status: TransactionStatus::parse(&m.status).unwrap_or(TransactionStatus::Pending),
            chain_hash: m.chain_hash,
            previous_transaction_id: m.previous_transaction_id,
            created_by: m.created_by,
            extra: m.extra,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Newest first, matching the dashboard listing order
pub async fn list_all() -> Result<Vec<SupplyTransaction>, AppError> {
    let items = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> Result<Option<SupplyTransaction>, AppError> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Head of the product's chain: the most recently created transaction.
/// The next append points here as its predecessor.
pub async fn latest_for_product(product_id: Uuid) -> Result<Option<SupplyTransaction>, AppError> {
    let result = Entity::find()
        .filter(Column::ProductId.eq(product_id.to_string()))
        .order_by_desc(Column::CreatedAt)
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Full history of one product, oldest first
pub async fn list_by_product(product_id: Uuid) -> Result<Vec<SupplyTransaction>, AppError> {
    let items = Entity::find()
        .filter(Column::ProductId.eq(product_id.to_string()))
        .order_by_asc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert(aggregate: &SupplyTransaction) -> Result<Uuid, AppError> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        product_id: Set(aggregate.product_id.clone()),
        kind: Set(aggregate.kind.as_str().to_string()),
        from_location_id: Set(aggregate.from_location_id.clone()),
        to_location_id: Set(aggregate.to_location_id.clone()),
        status: Set(aggregate.status.as_str().to_string()),
        chain_hash: Set(aggregate.chain_hash.clone()),
        previous_transaction_id: Set(aggregate.previous_transaction_id.clone()),
        created_by: Set(aggregate.created_by.clone()),
        extra: Set(aggregate.extra.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

/// The chain is append-only: status is the only mutable column
pub async fn update_status(id: Uuid, status: TransactionStatus) -> Result<bool, AppError> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(status.as_str()))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

/// Raw result row for the joined listing
#[derive(Debug, FromQueryResult)]
struct JoinedRow {
    id: String,
    code: String,
    product_id: String,
    kind: String,
    status: String,
    chain_hash: String,
    previous_transaction_id: Option<String>,
    created_at: Option<chrono::DateTime<chrono::Utc>>,
    created_by: Option<String>,
    product_name: Option<String>,
    product_sku: Option<String>,
    from_location_name: Option<String>,
    to_location_name: Option<String>,
}

/// Listing with product and location references resolved via LEFT JOIN.
/// A reference that no longer resolves yields None columns, not an error.
pub async fn list_with_joins() -> Result<Vec<TransactionWithJoins>, AppError> {
    let sql = r#"
        SELECT
            t.id,
            t.code,
            t.product_id,
            t.kind,
            t.status,
            t.chain_hash,
            t.previous_transaction_id,
            t.created_at,
            t.created_by,
            p.description AS product_name,
            p.sku AS product_sku,
            fl.description AS from_location_name,
            tl.description AS to_location_name
        FROM a003_supply_transaction t
        LEFT JOIN a001_product p ON t.product_id = p.id
        LEFT JOIN a002_location fl ON t.from_location_id = fl.id
        LEFT JOIN a002_location tl ON t.to_location_id = tl.id
        ORDER BY t.created_at DESC
    "#;

    let stmt = Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, sql, []);
    let rows = JoinedRow::find_by_statement(stmt).all(conn()).await?;

    let items = rows
        .into_iter()
        .filter_map(|r| {
            let kind = match TransactionKind::parse(&r.kind) {
                Some(k) => k,
                None => {
                    tracing::warn!("Skipping transaction {} with unknown kind {}", r.id, r.kind);
                    return None;
                }
            };
            let status =
                TransactionStatus::parse(&r.status).unwrap_or(TransactionStatus::Pending);
            Some(TransactionWithJoins {
                id: r.id,
                code: r.code,
                product_id: r.product_id,
                kind,
                status,
                chain_hash: r.chain_hash,
                previous_transaction_id: r.previous_transaction_id,
                created_at: r.created_at,
                created_by: r.created_by,
                product_name: r.product_name,
                product_sku: r.product_sku,
                from_location_name: r.from_location_name,
                to_location_name: r.to_location_name,
            })
        })
        .collect();

    Ok(items)
}
