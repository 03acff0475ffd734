use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        leaddb::LeadExt,
        propertydb::PropertyExt,
        viewingdb::{ViewingExt, ViewingFilters},
    },
    dtos::viewingdtos::{CreateViewingDto, UpdateViewingStatusDto, ViewingListQueryDto},
    error::HttpError,
    service::{dcsr_service::optional_day_bounds, error::ServiceError},
    AppState,
};

pub fn viewings_handler() -> Router {
    Router::new()
        .route("/", post(create_viewing).get(get_viewings))
        .route("/:viewing_id", get(get_viewing).delete(delete_viewing))
        .route("/:viewing_id/status", put(update_viewing_status))
}

pub async fn create_viewing(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateViewingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_property(body.property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::PropertyNotFound(body.property_id))?;

    app_state
        .db_client
        .get_lead(body.lead_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::LeadNotFound(body.lead_id))?;

    let viewing = app_state
        .db_client
        .save_viewing(&body)
        .await
        .map_err(ServiceError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": viewing,
            "message": "Viewing scheduled successfully"
        })),
    ))
}

pub async fn get_viewings(
    Query(query_params): Query<ViewingListQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1) as u32;
    let limit = query_params.limit.unwrap_or(10);

    let (from, until) = optional_day_bounds(query_params.start_date, query_params.end_date)?;

    let filters = ViewingFilters {
        property_id: query_params.property_id,
        lead_id: query_params.lead_id,
        agent_id: query_params.agent_id,
        from,
        until,
    };

    let viewings = app_state
        .db_client
        .get_viewings(&filters, page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .get_viewing_count(&filters)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "viewings": viewings,
            "pagination": { "page": page, "limit": limit, "total": total }
        }
    })))
}

pub async fn get_viewing(
    Path(viewing_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let viewing = app_state
        .db_client
        .get_viewing(viewing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Viewing {} not found", viewing_id)))?;

    Ok(Json(json!({ "success": true, "data": viewing })))
}

pub async fn update_viewing_status(
    Path(viewing_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateViewingStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .get_viewing(viewing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Viewing {} not found", viewing_id)))?;

    let viewing = app_state
        .db_client
        .update_viewing_status(viewing_id, body.status)
        .await
        .map_err(ServiceError::from)?;

    Ok(Json(json!({
        "success": true,
        "data": viewing,
        "message": "Viewing status updated successfully"
    })))
}

pub async fn delete_viewing(
    Path(viewing_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_viewing(viewing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Viewing {} not found", viewing_id)))?;

    Ok(Json(json!({
        "success": true,
        "data": null,
        "message": "Viewing deleted successfully"
    })))
}
