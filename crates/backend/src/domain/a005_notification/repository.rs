use chrono::Utc;
use contracts::domain::a005_notification::{
    Notification, NotificationId, NotificationKind, NotificationStatus,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_notification")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub user_id: String,
    pub message: String,
    pub kind: String,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Notification {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Notification {
            base: BaseAggregate::with_metadata(
                NotificationId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            user_id: m.user_id,
            message: m.message,
            kind: NotificationKind::parse(&m.kind).unwrap_or(NotificationKind::Info),
            status: NotificationStatus::parse(&m.status).unwrap_or(NotificationStatus::Unread),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Newest first, optionally narrowed by status and kind
pub async fn list_filtered(
    user_id: &str,
    status: Option<NotificationStatus>,
    kind: Option<NotificationKind>,
) -> Result<Vec<Notification>, AppError> {
    let mut query = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::IsDeleted.eq(false));
    if let Some(status) = status {
        query = query.filter(Column::Status.eq(status.as_str()));
    }
    if let Some(kind) = kind {
        query = query.filter(Column::Kind.eq(kind.as_str()));
    }
    let items = query
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Notification>, AppError> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn count_unread(user_id: &str) -> Result<u64, AppError> {
    let count = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Status.eq(NotificationStatus::Unread.as_str()))
        .filter(Column::IsDeleted.eq(false))
        .count(conn())
        .await?;
    Ok(count)
}

pub async fn insert(aggregate: &Notification) -> Result<Uuid, AppError> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        user_id: Set(aggregate.user_id.clone()),
        message: Set(aggregate.message.clone()),
        kind: Set(aggregate.kind.as_str().to_string()),
        status: Set(aggregate.status.as_str().to_string()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn mark_read(id: Uuid) -> Result<bool, AppError> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(
            Column::Status,
            Expr::value(NotificationStatus::Read.as_str()),
        )
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

/// Returns the number of notifications flipped to read
pub async fn mark_all_read(user_id: &str) -> Result<u64, AppError> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(
            Column::Status,
            Expr::value(NotificationStatus::Read.as_str()),
        )
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Status.eq(NotificationStatus::Unread.as_str()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
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
