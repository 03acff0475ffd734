use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{leaddb::LeadExt, referraldb::ReferralExt, userdb::UserExt},
    dtos::referraldtos::{CreateReferralDto, ReferralListQueryDto, UpdateReferralStatusDto},
    error::HttpError,
    service::error::ServiceError,
    AppState,
};

pub fn referrals_handler() -> Router {
    Router::new()
        .route("/", post(create_referral).get(get_referrals))
        .route("/:referral_id", delete(delete_referral))
        .route("/:referral_id/status", put(update_referral_status))
}

pub async fn create_referral(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateReferralDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_lead(body.lead_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::LeadNotFound(body.lead_id))?;

    app_state
        .db_client
        .get_user(body.referred_by)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::UserNotFound(body.referred_by))?;

    let referral = app_state
        .db_client
        .save_referral(&body)
        .await
        .map_err(ServiceError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": referral,
            "message": "Referral created successfully"
        })),
    ))
}

pub async fn get_referrals(
    Query(query_params): Query<ReferralListQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1) as u32;
    let limit = query_params.limit.unwrap_or(10);

    let referrals = app_state
        .db_client
        .get_referrals(
            query_params.lead_id,
            query_params.referred_by,
            query_params.status,
            page,
            limit,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({ "success": true, "data": referrals })))
}

pub async fn update_referral_status(
    Path(referral_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateReferralStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let referral = app_state
        .db_client
        .update_referral_status(referral_id, body.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Referral {} not found", referral_id)))?;

    Ok(Json(json!({
        "success": true,
        "data": referral,
        "message": "Referral status updated successfully"
    })))
}

pub async fn delete_referral(
    Path(referral_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_referral(referral_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Referral {} not found", referral_id)))?;

    Ok(Json(json!({
        "success": true,
        "data": null,
        "message": "Referral deleted successfully"
    })))
}
