use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};
use serde_json::json;

use crate::{db::lookupdb::LookupExt, error::HttpError, AppState};

// Read-only reference data: categories, property statuses, lead sources.
pub fn lookups_handler() -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/property-statuses", get(get_property_statuses))
        .route("/reference-sources", get(get_reference_sources))
}

pub async fn get_categories(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let categories = app_state
        .db_client
        .get_categories()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({ "success": true, "data": categories })))
}

pub async fn get_property_statuses(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let statuses = app_state
        .db_client
        .get_property_statuses()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({ "success": true, "data": statuses })))
}

pub async fn get_reference_sources(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let sources = app_state
        .db_client
        .get_reference_sources()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({ "success": true, "data": sources })))
}
