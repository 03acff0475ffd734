use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::viewingmodel::ViewingStatus;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateViewingDto {
    pub property_id: Uuid,
    pub lead_id: Uuid,
    pub agent_id: Option<Uuid>,
    pub viewing_date: DateTime<Utc>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateViewingStatusDto {
    pub status: ViewingStatus,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ViewingListQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,

    pub property_id: Option<Uuid>,
    pub lead_id: Option<Uuid>,
    pub agent_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
