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
        calendardb::{CalendarExt, EventFilters},
        userdb::UserExt,
    },
    dtos::calendardtos::{CreateEventDto, EventListQueryDto, UpdateEventDto},
    error::HttpError,
    service::{dcsr_service::optional_day_bounds, error::ServiceError},
    AppState,
};

pub fn calendar_handler() -> Router {
    Router::new()
        .route("/events", post(create_event).get(get_events))
        .route(
            "/events/:event_id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/events/:event_id/reminders", get(get_event_reminders))
}

pub async fn create_event(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateEventDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if let Some(end_time) = body.end_time {
        if end_time <= body.start_time {
            return Err(HttpError::bad_request("End time must be after start time"));
        }
    }

    app_state
        .db_client
        .get_user(body.user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::UserNotFound(body.user_id))?;

    let event = app_state
        .db_client
        .save_event(&body)
        .await
        .map_err(ServiceError::from)?;

    app_state
        .reminder_service
        .schedule_event_reminders(&event)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": event,
            "message": "Event created successfully"
        })),
    ))
}

pub async fn get_events(
    Query(query_params): Query<EventListQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1) as u32;
    let limit = query_params.limit.unwrap_or(10);

    let (from, until) = optional_day_bounds(query_params.start_date, query_params.end_date)?;

    let filters = EventFilters {
        user_id: query_params.user_id,
        from,
        until,
    };

    let events = app_state
        .db_client
        .get_events(&filters, page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .get_event_count(&filters)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "events": events,
            "pagination": { "page": page, "limit": limit, "total": total }
        }
    })))
}

pub async fn get_event(
    Path(event_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let event = app_state
        .db_client
        .get_event(event_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::EventNotFound(event_id))?;

    Ok(Json(json!({ "success": true, "data": event })))
}

pub async fn update_event(
    Path(event_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateEventDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_event(event_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::EventNotFound(event_id))?;

    let new_start = body.start_time.unwrap_or(existing.start_time);
    if let Some(end_time) = body.end_time.or(existing.end_time) {
        if end_time <= new_start {
            return Err(HttpError::bad_request("End time must be after start time"));
        }
    }

    let event = app_state
        .db_client
        .update_event(event_id, &body)
        .await
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::EventNotFound(event_id))?;

    // A moved event invalidates its unsent reminders.
    if event.start_time != existing.start_time {
        app_state
            .reminder_service
            .reschedule_event_reminders(&event)
            .await?;
    }

    Ok(Json(json!({
        "success": true,
        "data": event,
        "message": "Event updated successfully"
    })))
}

pub async fn delete_event(
    Path(event_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_event(event_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::EventNotFound(event_id))?;

    Ok(Json(json!({
        "success": true,
        "data": null,
        "message": "Event deleted successfully"
    })))
}

pub async fn get_event_reminders(
    Path(event_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let reminders = app_state.reminder_service.get_event_reminders(event_id).await?;

    Ok(Json(json!({ "success": true, "data": reminders })))
}
