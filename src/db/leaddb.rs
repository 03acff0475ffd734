// db/leaddb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::{page_offset, DBClient};
use crate::dtos::leaddtos::{CreateLeadDto, LeadPricingStats, LeadStatsDto, UpdateLeadDto};
use crate::models::leadmodel::{Lead, LeadStatusCount};

#[derive(Debug, Default, Clone)]
pub struct LeadFilters {
    pub status: Option<String>,
    pub agent_id: Option<Uuid>,
    pub search: Option<String>,
}

#[async_trait]
pub trait LeadExt {
    async fn save_lead(&self, data: &CreateLeadDto, status: &str) -> Result<Lead, sqlx::Error>;

    async fn get_lead(&self, lead_id: Uuid) -> Result<Option<Lead>, sqlx::Error>;

    async fn get_leads(
        &self,
        filters: &LeadFilters,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Lead>, sqlx::Error>;

    async fn get_lead_count(&self, filters: &LeadFilters) -> Result<i64, sqlx::Error>;

    async fn update_lead(
        &self,
        lead_id: Uuid,
        data: &UpdateLeadDto,
    ) -> Result<Lead, sqlx::Error>;

    async fn delete_lead(&self, lead_id: Uuid) -> Result<Option<Lead>, sqlx::Error>;

    async fn get_lead_stats(&self) -> Result<LeadStatsDto, sqlx::Error>;
}

#[async_trait]
impl LeadExt for DBClient {
    async fn save_lead(&self, data: &CreateLeadDto, status: &str) -> Result<Lead, sqlx::Error> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads
                (name, phone, email, status, reference_source_id, agent_id,
                 operations_id, budget, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(status)
        .bind(data.reference_source_id)
        .bind(data.agent_id)
        .bind(data.operations_id)
        .bind(data.budget)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }

    async fn get_lead(&self, lead_id: Uuid) -> Result<Option<Lead>, sqlx::Error> {
        let lead = sqlx::query_as::<_, Lead>(r#"SELECT * FROM leads WHERE id = $1"#)
            .bind(lead_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lead)
    }

    async fn get_leads(
        &self,
        filters: &LeadFilters,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let offset = page_offset(page, limit);

        let leads = sqlx::query_as::<_, Lead>(
            r#"
            SELECT * FROM leads
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR agent_id = $2)
              AND ($3::text IS NULL
                   OR name ILIKE '%' || $3 || '%'
                   OR email ILIKE '%' || $3 || '%'
                   OR phone ILIKE '%' || $3 || '%')
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(&filters.status)
        .bind(filters.agent_id)
        .bind(&filters.search)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(leads)
    }

    async fn get_lead_count(&self, filters: &LeadFilters) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM leads
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR agent_id = $2)
              AND ($3::text IS NULL
                   OR name ILIKE '%' || $3 || '%'
                   OR email ILIKE '%' || $3 || '%'
                   OR phone ILIKE '%' || $3 || '%')
            "#,
        )
        .bind(&filters.status)
        .bind(filters.agent_id)
        .bind(&filters.search)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn update_lead(
        &self,
        lead_id: Uuid,
        data: &UpdateLeadDto,
    ) -> Result<Lead, sqlx::Error> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads SET
                name = COALESCE($1, name),
                phone = COALESCE($2, phone),
                email = COALESCE($3, email),
                status = COALESCE($4, status),
                reference_source_id = COALESCE($5, reference_source_id),
                agent_id = COALESCE($6, agent_id),
                operations_id = COALESCE($7, operations_id),
                budget = COALESCE($8, budget),
                notes = COALESCE($9, notes),
                updated_at = NOW()
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.status)
        .bind(data.reference_source_id)
        .bind(data.agent_id)
        .bind(data.operations_id)
        .bind(data.budget)
        .bind(&data.notes)
        .bind(lead_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }

    async fn delete_lead(&self, lead_id: Uuid) -> Result<Option<Lead>, sqlx::Error> {
        let lead = sqlx::query_as::<_, Lead>(r#"DELETE FROM leads WHERE id = $1 RETURNING *"#)
            .bind(lead_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lead)
    }

    async fn get_lead_stats(&self) -> Result<LeadStatsDto, sqlx::Error> {
        let total = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM leads"#)
            .fetch_one(&self.pool)
            .await?;

        if total == 0 {
            return Ok(LeadStatsDto::empty());
        }

        let by_status = sqlx::query_as::<_, LeadStatusCount>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM leads
            GROUP BY status
            ORDER BY count DESC, status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let pricing = sqlx::query_as::<_, LeadPricingStats>(
            r#"
            SELECT
                COUNT(budget)                        AS with_price,
                COUNT(*) - COUNT(budget)             AS without_price,
                COALESCE(MIN(budget), 0)             AS min_price,
                COALESCE(MAX(budget), 0)             AS max_price,
                COALESCE(AVG(budget), 0)::float8     AS avg_price
            FROM leads
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(LeadStatsDto {
            total,
            by_status,
            pricing,
        })
    }
}
