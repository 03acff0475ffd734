use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        lookupdb::LookupExt,
        propertydb::{PropertyExt, PropertyFilters},
    },
    dtos::propertydtos::{
        CloseDealDto, CreatePropertyDto, FilterPropertyDto, PropertyListQueryDto,
        UpdatePropertyDto,
    },
    error::HttpError,
    service::{error::ServiceError, reference_service::parse_reference},
    AppState,
};

pub fn properties_handler() -> Router {
    Router::new()
        .route("/", post(create_property).get(get_properties))
        .route("/reference/:reference_number", get(get_property_by_reference))
        .route(
            "/:property_id",
            get(get_property).put(update_property).delete(delete_property),
        )
        .route("/:property_id/close", post(close_property))
}

pub async fn create_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let category = app_state
        .db_client
        .get_category(body.category_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::InvalidCategory(body.category_id))?;

    let reference_number = app_state
        .reference_service
        .next_reference_number(body.property_type, &category.code)
        .await?;

    let available = app_state
        .db_client
        .get_property_status_by_name("available")
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::server_error("Property statuses are not seeded"))?;

    let property = app_state
        .db_client
        .save_property(&body, &reference_number, available.id)
        .await
        .map_err(ServiceError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": FilterPropertyDto::filter_property(&property),
            "message": "Property created successfully"
        })),
    ))
}

pub async fn get_properties(
    Query(query_params): Query<PropertyListQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1) as u32;
    let limit = query_params.limit.unwrap_or(10);

    let filters = PropertyFilters {
        property_type: query_params.property_type,
        category_id: query_params.category_id,
        status_id: query_params.status_id,
        agent_id: query_params.agent_id,
    };

    let properties = app_state
        .db_client
        .get_properties(&filters, page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .get_property_count(&filters)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "properties": FilterPropertyDto::filter_properties(&properties),
            "pagination": { "page": page, "limit": limit, "total": total }
        }
    })))
}

pub async fn get_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::PropertyNotFound(property_id))?;

    Ok(Json(json!({
        "success": true,
        "data": FilterPropertyDto::filter_property(&property)
    })))
}

pub async fn get_property_by_reference(
    Path(reference_number): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    // Reject garbage before touching the database
    parse_reference(&reference_number)
        .ok_or_else(|| HttpError::bad_request("Invalid reference number"))?;

    let property = app_state
        .db_client
        .get_property_by_reference(&reference_number)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| {
            HttpError::not_found(format!("Property {} not found", reference_number))
        })?;

    Ok(Json(json!({
        "success": true,
        "data": FilterPropertyDto::filter_property(&property)
    })))
}

pub async fn update_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_property(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::PropertyNotFound(property_id))?;

    let new_type = body.property_type.unwrap_or(existing.property_type);
    let new_category_id = body.category_id.unwrap_or(existing.category_id);

    // A type or category change invalidates the encoded reference number,
    // so the property gets a fresh one from the counter.
    let new_reference = if new_type != existing.property_type
        || new_category_id != existing.category_id
    {
        let category = app_state
            .db_client
            .get_category(new_category_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or(ServiceError::InvalidCategory(new_category_id))?;

        Some(
            app_state
                .reference_service
                .next_reference_number(new_type, &category.code)
                .await?,
        )
    } else {
        None
    };

    let property = app_state
        .db_client
        .update_property(property_id, &body, new_reference.as_deref())
        .await
        .map_err(ServiceError::from)?;

    Ok(Json(json!({
        "success": true,
        "data": FilterPropertyDto::filter_property(&property),
        "message": "Property updated successfully"
    })))
}

pub async fn close_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CloseDealDto>,
) -> Result<impl IntoResponse, HttpError> {
    let existing = app_state
        .db_client
        .get_property(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::PropertyNotFound(property_id))?;

    if existing.closed_date.is_some() {
        return Err(ServiceError::PropertyAlreadyClosed(property_id).into());
    }

    if existing.agent_id.is_none() {
        return Err(HttpError::bad_request(
            "Cannot close a deal on a property with no assigned agent",
        ));
    }

    let closed_date = body.closed_date.unwrap_or_else(|| Utc::now().date_naive());

    let closed_status = app_state
        .db_client
        .get_property_status_by_name("closed")
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::server_error("Property statuses are not seeded"))?;

    let property = app_state
        .db_client
        .close_property(property_id, closed_date, closed_status.id)
        .await
        .map_err(ServiceError::from)?;

    let commission = app_state
        .commission_service
        .record_deal_commission(&property)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "property": FilterPropertyDto::filter_property(&property),
            "commission": commission
        },
        "message": "Deal closed successfully"
    })))
}

pub async fn delete_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_property(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::PropertyNotFound(property_id))?;

    Ok(Json(json!({
        "success": true,
        "data": null,
        "message": "Property deleted successfully"
    })))
}
