use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Commission {
    pub id: Uuid,
    pub property_id: Uuid,
    pub agent_id: Uuid,
    pub sale_amount: i64,
    pub rate_bps: i32,
    pub amount: i64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct AgentCommissionSummary {
    pub agent_id: Uuid,
    pub agent_name: String,
    pub deals: i64,
    pub total_sales: i64,
    pub total_commission: i64,
}

// Line item for commission exports
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct CommissionExportRow {
    pub reference_number: String,
    pub agent_name: String,
    pub sale_amount: i64,
    pub rate_bps: i32,
    pub amount: i64,
    pub closed_date: Option<NaiveDate>,
}
