use std::sync::Arc;

use axum::{
    extract::Query,
    http::header,
    middleware,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;

use crate::{
    dtos::dcsrdtos::CommissionReportQueryDto,
    error::HttpError,
    middleware::rate_limit::{rate_limit_middleware, RateLimiter},
    service::export_service,
    AppState,
};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const PDF_CONTENT_TYPE: &str = "application/pdf";

pub fn reports_handler(export_limiter: Arc<RateLimiter>) -> Router {
    let export_limited = middleware::from_fn_with_state(export_limiter, rate_limit_middleware);

    Router::new()
        .route("/commissions", get(get_commission_report))
        .route(
            "/commissions/export/xlsx",
            get(export_commissions_xlsx).layer(export_limited.clone()),
        )
        .route(
            "/commissions/export/pdf",
            get(export_commissions_pdf).layer(export_limited),
        )
}

pub async fn get_commission_report(
    Query(query_params): Query<CommissionReportQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let (start, end) = query_params
        .to_range()
        .resolve()
        .map_err(HttpError::bad_request)?;

    let summaries = app_state
        .commission_service
        .summaries(start, end, query_params.agent_id)
        .await?;

    let total_deals: i64 = summaries.iter().map(|s| s.deals).sum();
    let total_sales: i64 = summaries.iter().map(|s| s.total_sales).sum();
    let total_commission: i64 = summaries.iter().map(|s| s.total_commission).sum();

    Ok(Json(json!({
        "success": true,
        "data": {
            "start_date": start,
            "end_date": end,
            "agents": summaries,
            "totals": {
                "deals": total_deals,
                "total_sales": total_sales,
                "total_commission": total_commission
            }
        }
    })))
}

pub async fn export_commissions_xlsx(
    Query(query_params): Query<CommissionReportQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let (start, end) = query_params
        .to_range()
        .resolve()
        .map_err(HttpError::bad_request)?;

    let rows = app_state
        .commission_service
        .export_rows(start, end, query_params.agent_id)
        .await?;

    let bytes = export_service::commissions_xlsx(&rows, start, end)
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let filename = export_service::commission_export_filename(start, end, "xlsx");

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

pub async fn export_commissions_pdf(
    Query(query_params): Query<CommissionReportQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let (start, end) = query_params
        .to_range()
        .resolve()
        .map_err(HttpError::bad_request)?;

    let rows = app_state
        .commission_service
        .export_rows(start, end, query_params.agent_id)
        .await?;

    let bytes = export_service::commissions_pdf(&rows, start, end)
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let filename = export_service::commission_export_filename(start, end, "pdf");

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
