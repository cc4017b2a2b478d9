use axum::Json;

use contracts::dashboards::d400_supply_analytics::AnalyticsSummary;

use crate::dashboards::d400_supply_analytics::service;
use crate::shared::error::AppError;

/// GET /api/d400/supply_analytics/summary
pub async fn get_summary() -> Result<Json<AnalyticsSummary>, AppError> {
    Ok(Json(service::get_summary().await?))
}
