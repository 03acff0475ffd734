// routes.rs
use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        calendar::calendar_handler, dcsr_reports::dcsr_reports_handler, leads::leads_handler,
        lookups::lookups_handler, properties::properties_handler, referrals::referrals_handler,
        reports::reports_handler, teams::teams_handler, users::users_handler,
        viewings::viewings_handler,
    },
    middleware::rate_limit::export_rate_limiter,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // One limiter shared by every export route
    let export_limiter = Arc::new(export_rate_limiter());

    let api_route = Router::new()
        .nest("/properties", properties_handler())
        .nest("/leads", leads_handler())
        .nest("/viewings", viewings_handler())
        .nest("/referrals", referrals_handler())
        .nest("/teams", teams_handler())
        .nest("/dcsr-reports", dcsr_reports_handler(export_limiter.clone()))
        .nest("/calendar", calendar_handler())
        .nest("/reports", reports_handler(export_limiter))
        .nest("/users", users_handler())
        .merge(lookups_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
