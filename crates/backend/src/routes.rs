use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{api::handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // System users management (admin only)
        .route(
            "/api/system/users",
            get(system::handlers::users::list)
                .post(system::handlers::users::create)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id",
            get(system::handlers::users::get_by_id)
                .put(system::handlers::users::update)
                .delete(system::handlers::users::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id/change-password",
            post(system::handlers::users::change_password)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // BUSINESS ROUTES
        // ========================================
        // A001 Product handlers
        .route(
            "/api/product",
            get(handlers::a001_product::list_all).post(handlers::a001_product::upsert),
        )
        .route(
            "/api/product/search",
            get(handlers::a001_product::search_by_sku),
        )
        .route(
            "/api/product/:id",
            get(handlers::a001_product::get_by_id).delete(handlers::a001_product::delete),
        )
        // A002 Location handlers
        .route(
            "/api/location",
            get(handlers::a002_location::list_all).post(handlers::a002_location::upsert),
        )
        .route(
            "/api/location/:id",
            get(handlers::a002_location::get_by_id).delete(handlers::a002_location::delete),
        )
        // A003 Supply transaction handlers; append requires an acting user
        .route(
            "/api/supply_transaction",
            get(handlers::a003_supply_transaction::list_all),
        )
        .route(
            "/api/supply_transaction",
            post(handlers::a003_supply_transaction::append)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/supply_transaction/by-product/:product_id",
            get(handlers::a003_supply_transaction::history_for_product),
        )
        .route(
            "/api/supply_transaction/:id",
            get(handlers::a003_supply_transaction::get_by_id),
        )
        .route(
            "/api/supply_transaction/:id/status",
            put(handlers::a003_supply_transaction::update_status),
        )
        // A004 Logistics detail handlers
        .route(
            "/api/logistics_detail",
            get(handlers::a004_logistics_detail::list_all)
                .post(handlers::a004_logistics_detail::upsert),
        )
        .route(
            "/api/logistics_detail/by-transaction/:transaction_id",
            get(handlers::a004_logistics_detail::list_by_transaction),
        )
        .route(
            "/api/logistics_detail/:id",
            get(handlers::a004_logistics_detail::get_by_id)
                .delete(handlers::a004_logistics_detail::delete),
        )
        // A005 Notification handlers (per-user, behind auth)
        .route(
            "/api/notification",
            get(handlers::a005_notification::list)
                .post(handlers::a005_notification::create)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/notification/read-all",
            post(handlers::a005_notification::mark_all_read)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/notification/:id/read",
            post(handlers::a005_notification::mark_read)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/notification/:id",
            axum::routing::delete(handlers::a005_notification::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // A006 Report handlers
        .route(
            "/api/report",
            get(handlers::a006_report::list_all).post(handlers::a006_report::upsert),
        )
        .route(
            "/api/report/:id/run",
            post(handlers::a006_report::run),
        )
        .route(
            "/api/report/:id",
            get(handlers::a006_report::get_by_id).delete(handlers::a006_report::delete),
        )
        // D400 Supply analytics dashboard
        .route(
            "/api/d400/supply_analytics/summary",
            get(handlers::d400_supply_analytics::get_summary),
        )
}
