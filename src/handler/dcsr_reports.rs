use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::dcsrdtos::{DateRangeDto, DcsrListQueryDto},
    error::HttpError,
    middleware::rate_limit::{rate_limit_middleware, RateLimiter},
    service::export_service,
    AppState,
};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const PDF_CONTENT_TYPE: &str = "application/pdf";

pub fn dcsr_reports_handler(export_limiter: Arc<RateLimiter>) -> Router {
    let export_limited = middleware::from_fn_with_state(export_limiter, rate_limit_middleware);

    Router::new()
        .route("/", post(create_report).get(get_reports))
        .route("/calculate", get(calculate_report))
        .route("/team/:leader_id", get(calculate_team_report))
        .route("/:report_id", get(get_report).delete(delete_report))
        .route("/:report_id/recalculate", put(recalculate_report))
        .route(
            "/:report_id/export/xlsx",
            get(export_report_xlsx).layer(export_limited.clone()),
        )
        .route(
            "/:report_id/export/pdf",
            get(export_report_pdf).layer(export_limited),
        )
}

pub async fn create_report(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<DateRangeDto>,
) -> Result<impl IntoResponse, HttpError> {
    let (start, end) = body.resolve().map_err(HttpError::bad_request)?;

    let report = app_state.dcsr_service.create_report(start, end).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": report,
            "message": "DCSR report created successfully"
        })),
    ))
}

pub async fn get_reports(
    Query(query_params): Query<DcsrListQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1) as u32;
    let limit = query_params.limit.unwrap_or(10);

    let (reports, total) = app_state
        .dcsr_service
        .list_reports(query_params.start_date, query_params.end_date, page, limit)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "reports": reports,
            "pagination": { "page": page, "limit": limit, "total": total }
        }
    })))
}

// Counts over an arbitrary range without persisting a report row.
pub async fn calculate_report(
    Query(query_params): Query<DateRangeDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let (start, end) = query_params.resolve().map_err(HttpError::bad_request)?;

    let counts = app_state.dcsr_service.calculate_dcsr_data(start, end).await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "start_date": start,
            "end_date": end,
            "listings_count": counts.listings_count,
            "leads_count": counts.leads_count,
            "sales_count": counts.sales_count,
            "rent_count": counts.rent_count,
            "viewings_count": counts.viewings_count
        }
    })))
}

pub async fn calculate_team_report(
    Path(leader_id): Path<Uuid>,
    Query(query_params): Query<DateRangeDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let (start, end) = query_params.resolve().map_err(HttpError::bad_request)?;

    let team_dcsr = app_state
        .dcsr_service
        .calculate_team_dcsr_data(leader_id, start, end)
        .await?;

    Ok(Json(json!({ "success": true, "data": team_dcsr })))
}

pub async fn get_report(
    Path(report_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let report = app_state.dcsr_service.get_report(report_id).await?;

    Ok(Json(json!({ "success": true, "data": report })))
}

pub async fn recalculate_report(
    Path(report_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let report = app_state.dcsr_service.recalculate_report(report_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": report,
        "message": "DCSR report recalculated successfully"
    })))
}

pub async fn delete_report(
    Path(report_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.dcsr_service.delete_report(report_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": null,
        "message": "DCSR report deleted successfully"
    })))
}

pub async fn export_report_xlsx(
    Path(report_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let report = app_state.dcsr_service.get_report(report_id).await?;

    let bytes = export_service::dcsr_report_xlsx(&report)
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let filename = export_service::dcsr_export_filename(report.start_date, report.end_date, "xlsx");

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    ))
}

pub async fn export_report_pdf(
    Path(report_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let report = app_state.dcsr_service.get_report(report_id).await?;

    let bytes = export_service::dcsr_report_pdf(&report)
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let filename = export_service::dcsr_export_filename(report.start_date, report.end_date, "pdf");

    Ok((
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    ))
}
