use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "reminder_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    OneDayBefore,
    SameDayMorning,
    OneHourBefore,
}

impl ReminderType {
    pub const ALL: [ReminderType; 3] = [
        ReminderType::OneDayBefore,
        ReminderType::SameDayMorning,
        ReminderType::OneHourBefore,
    ];

    pub fn to_str(&self) -> &str {
        match self {
            ReminderType::OneDayBefore => "one_day_before",
            ReminderType::SameDayMorning => "same_day_morning",
            ReminderType::OneHourBefore => "one_hour_before",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "reminder_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Sent,
    Skipped,
}

impl ReminderStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ReminderStatus::Pending => "pending",
            ReminderStatus::Sent => "sent",
            ReminderStatus::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub user_id: Uuid,
    pub lead_id: Option<Uuid>,
    pub property_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// Joined event + recipient fields used when dispatching a reminder email
#[derive(Debug, FromRow, Clone)]
pub struct ReminderContext {
    pub event_id: Uuid,
    pub title: String,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
}

/// Tracking row, one per (event, user, type). Status only ever moves
/// pending -> sent or pending -> skipped.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EventReminder {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub reminder_type: ReminderType,
    pub scheduled_at: DateTime<Utc>,
    pub status: ReminderStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_status_to_str_matches_wire_form() {
        for status in [
            ReminderStatus::Pending,
            ReminderStatus::Sent,
            ReminderStatus::Skipped,
        ] {
            let wire = serde_json::to_string(&status).unwrap();
            assert_eq!(wire, format!("\"{}\"", status.to_str()));
        }
    }
}
