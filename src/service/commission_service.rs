// services/commission_service.rs
use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    db::{commissiondb::CommissionExt, db::DBClient},
    models::{
        commissionmodel::{AgentCommissionSummary, Commission, CommissionExportRow},
        propertymodel::Property,
    },
    service::error::ServiceError,
};

/// Commission owed on a deal, in the same minor currency unit as the
/// price. Rates are basis points, 250 bps = 2.5%. Fractions of a unit
/// round down.
pub fn commission_amount(sale_amount: i64, rate_bps: i32) -> i64 {
    sale_amount * rate_bps as i64 / 10_000
}

#[derive(Debug, Clone)]
pub struct CommissionService {
    db_client: Arc<DBClient>,
    rate_bps: i32,
}

impl CommissionService {
    pub fn new(db_client: Arc<DBClient>, rate_bps: i32) -> Self {
        Self { db_client, rate_bps }
    }

    /// Books the commission for a freshly closed deal at the configured
    /// rate, credited to the listing agent.
    pub async fn record_deal_commission(
        &self,
        property: &Property,
    ) -> Result<Commission, ServiceError> {
        let agent_id = property.agent_id.ok_or_else(|| {
            ServiceError::Validation("Cannot close a deal on a property with no assigned agent".to_string())
        })?;

        let amount = commission_amount(property.price, self.rate_bps);

        let commission = self
            .db_client
            .save_commission(property.id, agent_id, property.price, self.rate_bps, amount)
            .await?;

        Ok(commission)
    }

    pub async fn summaries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        agent_id: Option<Uuid>,
    ) -> Result<Vec<AgentCommissionSummary>, ServiceError> {
        if start > end {
            return Err(ServiceError::InvalidDateRange);
        }

        let summaries = self
            .db_client
            .get_commission_summaries(start, end, agent_id)
            .await?;

        Ok(summaries)
    }

    pub async fn export_rows(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        agent_id: Option<Uuid>,
    ) -> Result<Vec<CommissionExportRow>, ServiceError> {
        if start > end {
            return Err(ServiceError::InvalidDateRange);
        }

        let rows = self.db_client.get_commission_rows(start, end, agent_id).await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commission_amount_at_standard_rate() {
        // 2.5% of 50,000,000 minor units
        assert_eq!(commission_amount(50_000_000, 250), 1_250_000);
        assert_eq!(commission_amount(1_000_000, 250), 25_000);
    }

    #[test]
    fn test_commission_amount_rounds_down() {
        // 999 * 250 / 10_000 = 24.975
        assert_eq!(commission_amount(999, 250), 24);
        assert_eq!(commission_amount(1, 250), 0);
    }

    #[test]
    fn test_commission_amount_zero_rate() {
        assert_eq!(commission_amount(50_000_000, 0), 0);
    }

    #[tokio::test]
    async fn commission_service_compiles() {
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/fortunest").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let svc = CommissionService::new(db_client, 250);

        let _ = svc.summaries(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            None,
        );
    }
}
