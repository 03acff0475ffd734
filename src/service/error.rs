use crate::error::HttpError;
use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid date range")]
    InvalidDateRange,

    #[error("Team not found or has no members")]
    TeamNotFound,

    #[error("DCSR report for this date range already exists")]
    ReportAlreadyExists,

    #[error("DCSR report {0} not found")]
    ReportNotFound(Uuid),

    #[error("Property {0} not found")]
    PropertyNotFound(Uuid),

    #[error("Property {0} is already closed")]
    PropertyAlreadyClosed(Uuid),

    #[error("Lead {0} not found")]
    LeadNotFound(Uuid),

    #[error("Event {0} not found")]
    EventNotFound(Uuid),

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Invalid category")]
    InvalidCategory(i32),

    #[error("Invalid reference category code: {0}")]
    InvalidCategoryCode(String),

    #[error("Invalid lead status: {0}")]
    InvalidLeadStatus(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Mail error: {0}")]
    Mail(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match &error {
            ServiceError::Database(db_err) => {
                // Unique violations surface as conflicts, everything else is a 500
                let is_unique = db_err
                    .as_database_error()
                    .and_then(|e| e.code())
                    .map(|code| code == "23505")
                    .unwrap_or(false);

                if is_unique {
                    HttpError::unique_constraint_violation("Record already exists")
                } else {
                    HttpError::server_error("Something went wrong").with_detail(db_err.to_string())
                }
            }
            _ => HttpError::new(error.to_string(), error.status_code()),
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::PropertyNotFound(_)
            | ServiceError::LeadNotFound(_)
            | ServiceError::EventNotFound(_)
            | ServiceError::UserNotFound(_)
            | ServiceError::ReportNotFound(_)
            | ServiceError::TeamNotFound => StatusCode::NOT_FOUND,

            ServiceError::InvalidDateRange
            | ServiceError::InvalidCategory(_)
            | ServiceError::InvalidCategoryCode(_)
            | ServiceError::InvalidLeadStatus(_)
            | ServiceError::PropertyAlreadyClosed(_)
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::ReportAlreadyExists => StatusCode::CONFLICT,

            ServiceError::Database(_) | ServiceError::Mail(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_api_contract() {
        assert_eq!(ServiceError::InvalidDateRange.to_string(), "Invalid date range");
        assert_eq!(
            ServiceError::TeamNotFound.to_string(),
            "Team not found or has no members"
        );
        assert!(ServiceError::ReportAlreadyExists
            .to_string()
            .contains("already exists"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServiceError::InvalidDateRange.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServiceError::TeamNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::ReportAlreadyExists.status_code(),
            StatusCode::CONFLICT
        );

        let http: HttpError = ServiceError::ReportAlreadyExists.into();
        assert_eq!(http.status, StatusCode::CONFLICT);

        let http: HttpError = ServiceError::InvalidDateRange.into();
        assert_eq!(http.status, StatusCode::BAD_REQUEST);
        assert_eq!(http.message, "Invalid date range");
    }
}
