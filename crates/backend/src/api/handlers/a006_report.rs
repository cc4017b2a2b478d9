use axum::extract::Path;
use axum::Json;
use serde_json::json;

use contracts::domain::a006_report::{Report, ReportDto};

use crate::domain::a006_report;
use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/report
pub async fn list_all() -> Result<Json<Vec<Report>>, AppError> {
    Ok(Json(a006_report::service::list_all().await?))
}

/// GET /api/report/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Report>, AppError> {
    let uuid =
        uuid::Uuid::parse_str(&id).map_err(|_| AppError::validation("Invalid report ID"))?;
    a006_report::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("report {}", id)))
}

/// POST /api/report
pub async fn upsert(
    user: Option<CurrentUser>,
    Json(dto): Json<ReportDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = if dto.id.is_some() {
        a006_report::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())?
    } else {
        let created_by = user.map(|CurrentUser(claims)| claims.sub);
        a006_report::service::create(dto, created_by)
            .await
            .map(|id| id.to_string())?
    };
    Ok(Json(json!({ "id": id })))
}

/// POST /api/report/:id/run: stamp last_run and schedule next_run
pub async fn run(Path(id): Path<String>) -> Result<Json<Report>, AppError> {
    let uuid =
        uuid::Uuid::parse_str(&id).map_err(|_| AppError::validation("Invalid report ID"))?;
    Ok(Json(a006_report::service::run(uuid).await?))
}

/// DELETE /api/report/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), AppError> {
    let uuid =
        uuid::Uuid::parse_str(&id).map_err(|_| AppError::validation("Invalid report ID"))?;
    if a006_report::service::delete(uuid).await? {
        Ok(())
    } else {
        Err(AppError::not_found(format!("report {}", id)))
    }
}
