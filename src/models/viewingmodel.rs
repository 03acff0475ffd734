use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "viewing_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ViewingStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl ViewingStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ViewingStatus::Scheduled => "scheduled",
            ViewingStatus::Completed => "completed",
            ViewingStatus::Cancelled => "cancelled",
            ViewingStatus::NoShow => "no_show",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Viewing {
    pub id: Uuid,
    pub property_id: Uuid,
    pub lead_id: Uuid,
    pub agent_id: Option<Uuid>,
    pub viewing_date: DateTime<Utc>,
    pub status: ViewingStatus,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_to_str_matches_wire_form() {
        assert_eq!(ViewingStatus::Scheduled.to_str(), "scheduled");
        assert_eq!(ViewingStatus::NoShow.to_str(), "no_show");
        assert_eq!(
            serde_json::to_string(&ViewingStatus::NoShow).unwrap(),
            "\"no_show\""
        );
    }
}
