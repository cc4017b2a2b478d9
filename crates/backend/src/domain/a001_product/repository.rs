use chrono::Utc;
use contracts::domain::a001_product::{Product, ProductId, ProductStatus};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub full_description: String,
    pub sku: String,
    pub category: String,
    pub status: String,
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

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Product {
            base: BaseAggregate::with_metadata(
                ProductId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            sku: m.sku,
            full_description: m.full_description,
            category: m.category,
            status: ProductStatus::parse(&m.status).unwrap_or(ProductStatus::Active),
            created_by: m.created_by,
            extra: m.extra,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> Result<Vec<Product>, AppError> {
    let mut items: Vec<Product> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    // Sort by name (case-insensitive)
    items.sort_by(|a, b| {
        a.base
            .description
            .to_lowercase()
            .cmp(&b.base.description.to_lowercase())
    });
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Product>, AppError> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Найти товары по артикулу (SKU). Артикул должен быть уже trimmed.
pub async fn find_by_sku(sku: &str) -> Result<Vec<Product>, AppError> {
    // Фильтруем на стороне приложения для корректного trim
    let all_items: Vec<Model> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?;

    let items: Vec<Product> = all_items
        .into_iter()
        .filter(|m| m.sku.trim() == sku)
        .map(Into::into)
        .collect();

    Ok(items)
}

pub async fn count_active() -> Result<u64, AppError> {
    let count = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::Status.eq(ProductStatus::Active.as_str()))
        .count(conn())
        .await?;
    Ok(count)
}

pub async fn insert(aggregate: &Product) -> Result<Uuid, AppError> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        full_description: Set(aggregate.full_description.clone()),
        sku: Set(aggregate.sku.clone()),
        category: Set(aggregate.category.clone()),
        status: Set(aggregate.status.as_str().to_string()),
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

pub async fn update(aggregate: &Product) -> Result<(), AppError> {
    let id = aggregate.base.id.value().to_string();
    let active = ActiveModel {
        id: Set(id),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        full_description: Set(aggregate.full_description.clone()),
        sku: Set(aggregate.sku.clone()),
        category: Set(aggregate.category.clone()),
        status: Set(aggregate.status.as_str().to_string()),
        created_by: Set(aggregate.created_by.clone()),
        extra: Set(aggregate.extra.clone()),
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
