use chrono::Utc;
use contracts::domain::a004_logistics_detail::{LogisticsDetail, LogisticsDetailId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_logistics_detail")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub transaction_id: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub transport_vehicle: Option<String>,
    pub transport_duration: Option<String>,
    pub storage_conditions: Option<String>,
    pub quality_checks: Option<Json>,
    pub additional_data: Option<Json>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LogisticsDetail {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        LogisticsDetail {
            base: BaseAggregate::with_metadata(
                LogisticsDetailId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            transaction_id: m.transaction_id,
            temperature: m.temperature,
            humidity: m.humidity,
            transport_vehicle: m.transport_vehicle,
            transport_duration: m.transport_duration,
            storage_conditions: m.storage_conditions,
            quality_checks: m.quality_checks,
            additional_data: m.additional_data,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> Result<Vec<LogisticsDetail>, AppError> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> Result<Option<LogisticsDetail>, AppError> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Подробности по одной транзакции. Уникальность не навязывается,
/// поэтому возможны несколько записей.
pub async fn list_by_transaction(transaction_id: Uuid) -> Result<Vec<LogisticsDetail>, AppError> {
    let items = Entity::find()
        .filter(Column::TransactionId.eq(transaction_id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert(aggregate: &LogisticsDetail) -> Result<Uuid, AppError> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        transaction_id: Set(aggregate.transaction_id.clone()),
        temperature: Set(aggregate.temperature),
        humidity: Set(aggregate.humidity),
        transport_vehicle: Set(aggregate.transport_vehicle.clone()),
        transport_duration: Set(aggregate.transport_duration.clone()),
        storage_conditions: Set(aggregate.storage_conditions.clone()),
        quality_checks: Set(aggregate.quality_checks.clone()),
        additional_data: Set(aggregate.additional_data.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &LogisticsDetail) -> Result<(), AppError> {
    let id = aggregate.base.id.value().to_string();
    let active = ActiveModel {
        id: Set(id),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        transaction_id: Set(aggregate.transaction_id.clone()),
        temperature: Set(aggregate.temperature),
        humidity: Set(aggregate.humidity),
        transport_vehicle: Set(aggregate.transport_vehicle.clone()),
        transport_duration: Set(aggregate.transport_duration.clone()),
        storage_conditions: Set(aggregate.storage_conditions.clone()),
        quality_checks: Set(aggregate.quality_checks.clone()),
        additional_data: Set(aggregate.additional_data.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
        created_at: sea_orm::ActiveValue::NotSet,
    };
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> Result<bool, AppError> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
