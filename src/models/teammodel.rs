use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct TeamMembership {
    pub id: Uuid,
    pub leader_id: Uuid,
    pub agent_id: Uuid,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

// Joined row: membership plus the member's user record
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct TeamMemberRow {
    pub membership_id: Uuid,
    pub agent_id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct TeamLeaderRow {
    pub leader_id: Uuid,
    pub leader_name: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct Team {
    pub leader_id: Uuid,
    pub leader_name: String,
    pub members: Vec<TeamMemberRow>,
}
