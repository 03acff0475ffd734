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
    db::userdb::UserExt,
    dtos::userdtos::{CreateUserDto, FilterUserDto, RequestQueryDto},
    error::HttpError,
    models::usermodel::UserRole,
    service::error::ServiceError,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/", post(create_user).get(get_users))
        .route("/:user_id", get(get_user))
}

pub async fn create_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let role = body.role.unwrap_or(UserRole::Agent);

    let user = app_state
        .db_client
        .save_user(body.name.clone(), body.email.clone(), role)
        .await
        .map_err(|e| {
            if e.as_database_error().and_then(|db_err| db_err.code()).as_deref() == Some("23505") {
                HttpError::unique_constraint_violation("A user with this email already exists")
            } else {
                HttpError::server_error(e.to_string())
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": FilterUserDto::filter_user(&user),
            "message": "User created successfully"
        })),
    ))
}

pub async fn get_users(
    Query(query_params): Query<RequestQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1) as u32;
    let limit = query_params.limit.unwrap_or(10);

    let users = app_state
        .db_client
        .get_users(page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .get_user_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "users": FilterUserDto::filter_users(&users),
            "pagination": { "page": page, "limit": limit, "total": total }
        }
    })))
}

pub async fn get_user(
    Path(user_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::UserNotFound(user_id))?;

    Ok(Json(json!({
        "success": true,
        "data": FilterUserDto::filter_user(&user)
    })))
}
