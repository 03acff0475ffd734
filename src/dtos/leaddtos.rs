use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::leadmodel::LeadStatusCount;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateLeadDto {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 7, max = 50, message = "Phone must be between 7 and 50 characters"))]
    pub phone: Option<String>,

    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,

    // Checked against the configured status list, defaults to the first entry
    pub status: Option<String>,

    pub reference_source_id: Option<i32>,
    pub agent_id: Option<Uuid>,
    pub operations_id: Uuid,

    #[validate(range(min = 1, message = "Budget must be positive"))]
    pub budget: Option<i64>,

    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct UpdateLeadDto {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(length(min = 7, max = 50, message = "Phone must be between 7 and 50 characters"))]
    pub phone: Option<String>,

    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,

    pub status: Option<String>,
    pub reference_source_id: Option<i32>,
    pub agent_id: Option<Uuid>,
    pub operations_id: Option<Uuid>,

    #[validate(range(min = 1, message = "Budget must be positive"))]
    pub budget: Option<i64>,

    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LeadListQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,

    pub status: Option<String>,
    pub agent_id: Option<Uuid>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadPricingStats {
    pub with_price: i64,
    pub without_price: i64,
    pub min_price: i64,
    pub max_price: i64,
    pub avg_price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStatsDto {
    pub total: i64,
    pub by_status: Vec<LeadStatusCount>,
    pub pricing: LeadPricingStats,
}

impl LeadStatsDto {
    pub fn empty() -> Self {
        LeadStatsDto {
            total: 0,
            by_status: vec![],
            pricing: LeadPricingStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats_shape() {
        let json = serde_json::to_value(LeadStatsDto::empty()).unwrap();
        assert_eq!(json["total"], 0);
        assert_eq!(json["byStatus"], serde_json::json!([]));
        assert_eq!(json["pricing"]["withPrice"], 0);
        assert_eq!(json["pricing"]["withoutPrice"], 0);
        assert_eq!(json["pricing"]["minPrice"], 0);
        assert_eq!(json["pricing"]["maxPrice"], 0);
        assert_eq!(json["pricing"]["avgPrice"], 0.0);
    }
}
