use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        leaddb::{LeadExt, LeadFilters},
        userdb::UserExt,
    },
    dtos::leaddtos::{CreateLeadDto, LeadListQueryDto, UpdateLeadDto},
    error::HttpError,
    service::error::ServiceError,
    AppState,
};

pub fn leads_handler() -> Router {
    Router::new()
        .route("/", post(create_lead).get(get_leads))
        .route("/stats", get(get_lead_stats))
        .route("/:lead_id", get(get_lead).put(update_lead).delete(delete_lead))
}

pub async fn create_lead(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateLeadDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let status = match body.status.as_deref() {
        Some(status) => {
            if !app_state.env.is_valid_lead_status(status) {
                return Err(ServiceError::InvalidLeadStatus(status.to_string()).into());
            }
            status.to_lowercase()
        }
        None => app_state
            .env
            .lead_statuses
            .first()
            .cloned()
            .unwrap_or_else(|| "new".to_string()),
    };

    app_state
        .db_client
        .get_user(body.operations_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::UserNotFound(body.operations_id))?;

    if let Some(agent_id) = body.agent_id {
        app_state
            .db_client
            .get_user(agent_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or(ServiceError::UserNotFound(agent_id))?;
    }

    let lead = app_state
        .db_client
        .save_lead(&body, &status)
        .await
        .map_err(ServiceError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": lead,
            "message": "Lead created successfully"
        })),
    ))
}

pub async fn get_leads(
    Query(query_params): Query<LeadListQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1) as u32;
    let limit = query_params.limit.unwrap_or(10);

    let filters = LeadFilters {
        status: query_params.status.map(|s| s.to_lowercase()),
        agent_id: query_params.agent_id,
        search: query_params.search,
    };

    let leads = app_state
        .db_client
        .get_leads(&filters, page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .get_lead_count(&filters)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "leads": leads,
            "pagination": { "page": page, "limit": limit, "total": total }
        }
    })))
}

pub async fn get_lead_stats(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state
        .db_client
        .get_lead_stats()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({ "success": true, "data": stats })))
}

pub async fn get_lead(
    Path(lead_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let lead = app_state
        .db_client
        .get_lead(lead_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::LeadNotFound(lead_id))?;

    Ok(Json(json!({ "success": true, "data": lead })))
}

pub async fn update_lead(
    Path(lead_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateLeadDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let mut body = body;
    if let Some(status) = body.status.take() {
        if !app_state.env.is_valid_lead_status(&status) {
            return Err(ServiceError::InvalidLeadStatus(status).into());
        }
        body.status = Some(status.to_lowercase());
    }

    app_state
        .db_client
        .get_lead(lead_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::LeadNotFound(lead_id))?;

    let lead = app_state
        .db_client
        .update_lead(lead_id, &body)
        .await
        .map_err(ServiceError::from)?;

    Ok(Json(json!({
        "success": true,
        "data": lead,
        "message": "Lead updated successfully"
    })))
}

pub async fn delete_lead(
    Path(lead_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_lead(lead_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::LeadNotFound(lead_id))?;

    Ok(Json(json!({
        "success": true,
        "data": null,
        "message": "Lead deleted successfully"
    })))
}
