use sea_orm::{FromQueryResult, Statement};

use contracts::domain::a003_supply_transaction::SupplyTransaction;
use contracts::domain::a004_logistics_detail::LogisticsDetail;

use crate::domain::{a001_product, a003_supply_transaction, a004_logistics_detail};
use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

/// Full transaction snapshot; the dashboard recomputes from scratch
pub async fn fetch_transactions() -> Result<Vec<SupplyTransaction>, AppError> {
    a003_supply_transaction::repository::list_all().await
}

pub async fn fetch_logistics_details() -> Result<Vec<LogisticsDetail>, AppError> {
    a004_logistics_detail::repository::list_all().await
}

pub async fn count_active_products() -> Result<u64, AppError> {
    a001_product::repository::count_active().await
}

/// System-wide unread notifications for the overview tiles
pub async fn count_unread_notifications() -> Result<u64, AppError> {
    #[derive(Debug, FromQueryResult)]
    struct CountRow {
        cnt: i64,
    }

    let sql = r#"
        SELECT COUNT(*) AS cnt
        FROM a005_notification
        WHERE status = 'unread' AND is_deleted = 0
    "#;

    let stmt = Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, sql, []);
    let row = CountRow::find_by_statement(stmt).one(get_connection()).await?;

    Ok(row.map(|r| r.cnt.max(0) as u64).unwrap_or(0))
}
