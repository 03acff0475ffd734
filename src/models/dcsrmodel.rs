use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// The five DCSR counts over one date range: new listings, new leads,
/// closed sales, closed rentals and viewings held.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct DcsrCounts {
    pub listings_count: i64,
    pub leads_count: i64,
    pub sales_count: i64,
    pub rent_count: i64,
    pub viewings_count: i64,
}

/// Persisted DCSR snapshot. One row per exact (start_date, end_date) range;
/// recalculation updates the counts in place.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct DcsrReport {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub listings_count: i64,
    pub leads_count: i64,
    pub sales_count: i64,
    pub rent_count: i64,
    pub viewings_count: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl DcsrReport {
    pub fn counts(&self) -> DcsrCounts {
        DcsrCounts {
            listings_count: self.listings_count,
            leads_count: self.leads_count,
            sales_count: self.sales_count,
            rent_count: self.rent_count,
            viewings_count: self.viewings_count,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct MemberDcsr {
    pub agent_id: Uuid,
    pub agent_name: String,
    #[serde(flatten)]
    pub counts: DcsrCounts,
}

#[derive(Debug, Serialize, Clone)]
pub struct TeamDcsr {
    pub leader_id: Uuid,
    pub leader_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(flatten)]
    pub totals: DcsrCounts,
    pub members: Vec<MemberDcsr>,
}
