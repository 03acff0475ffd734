// db/commissiondb.rs
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::commissionmodel::{AgentCommissionSummary, Commission, CommissionExportRow};

#[async_trait]
pub trait CommissionExt {
    async fn save_commission(
        &self,
        property_id: Uuid,
        agent_id: Uuid,
        sale_amount: i64,
        rate_bps: i32,
        amount: i64,
    ) -> Result<Commission, sqlx::Error>;

    /// Per-agent totals for deals closed between the two dates, inclusive.
    async fn get_commission_summaries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        agent_id: Option<Uuid>,
    ) -> Result<Vec<AgentCommissionSummary>, sqlx::Error>;

    async fn get_commission_rows(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        agent_id: Option<Uuid>,
    ) -> Result<Vec<CommissionExportRow>, sqlx::Error>;
}

#[async_trait]
impl CommissionExt for DBClient {
    async fn save_commission(
        &self,
        property_id: Uuid,
        agent_id: Uuid,
        sale_amount: i64,
        rate_bps: i32,
        amount: i64,
    ) -> Result<Commission, sqlx::Error> {
        let commission = sqlx::query_as::<_, Commission>(
            r#"
            INSERT INTO commissions (property_id, agent_id, sale_amount, rate_bps, amount)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(agent_id)
        .bind(sale_amount)
        .bind(rate_bps)
        .bind(amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(commission)
    }

    async fn get_commission_summaries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        agent_id: Option<Uuid>,
    ) -> Result<Vec<AgentCommissionSummary>, sqlx::Error> {
        let summaries = sqlx::query_as::<_, AgentCommissionSummary>(
            r#"
            SELECT c.agent_id,
                   u.name AS agent_name,
                   COUNT(*) AS deals,
                   COALESCE(SUM(c.sale_amount), 0)::bigint AS total_sales,
                   COALESCE(SUM(c.amount), 0)::bigint AS total_commission
            FROM commissions c
            JOIN users u ON u.id = c.agent_id
            JOIN properties p ON p.id = c.property_id
            WHERE p.closed_date >= $1 AND p.closed_date <= $2
              AND ($3::uuid IS NULL OR c.agent_id = $3)
            GROUP BY c.agent_id, u.name
            ORDER BY total_commission DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    async fn get_commission_rows(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        agent_id: Option<Uuid>,
    ) -> Result<Vec<CommissionExportRow>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CommissionExportRow>(
            r#"
            SELECT p.reference_number,
                   u.name AS agent_name,
                   c.sale_amount,
                   c.rate_bps,
                   c.amount,
                   p.closed_date
            FROM commissions c
            JOIN users u ON u.id = c.agent_id
            JOIN properties p ON p.id = c.property_id
            WHERE p.closed_date >= $1 AND p.closed_date <= $2
              AND ($3::uuid IS NULL OR c.agent_id = $3)
            ORDER BY p.closed_date, p.reference_number
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
