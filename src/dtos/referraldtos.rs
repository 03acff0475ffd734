use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::referralmodel::ReferralStatus;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateReferralDto {
    pub lead_id: Uuid,
    pub referred_by: Uuid,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateReferralStatusDto {
    pub status: ReferralStatus,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ReferralListQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,

    pub lead_id: Option<Uuid>,
    pub referred_by: Option<Uuid>,
    pub status: Option<ReferralStatus>,
}
