// db/viewingdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::{page_offset, DBClient};
use crate::dtos::viewingdtos::CreateViewingDto;
use crate::models::viewingmodel::{Viewing, ViewingStatus};

#[derive(Debug, Default, Clone)]
pub struct ViewingFilters {
    pub property_id: Option<Uuid>,
    pub lead_id: Option<Uuid>,
    pub agent_id: Option<Uuid>,
    // UTC day boundaries, half-open
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait ViewingExt {
    async fn save_viewing(&self, data: &CreateViewingDto) -> Result<Viewing, sqlx::Error>;

    async fn get_viewing(&self, viewing_id: Uuid) -> Result<Option<Viewing>, sqlx::Error>;

    async fn get_viewings(
        &self,
        filters: &ViewingFilters,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Viewing>, sqlx::Error>;

    async fn get_viewing_count(&self, filters: &ViewingFilters) -> Result<i64, sqlx::Error>;

    async fn update_viewing_status(
        &self,
        viewing_id: Uuid,
        status: ViewingStatus,
    ) -> Result<Viewing, sqlx::Error>;

    async fn delete_viewing(&self, viewing_id: Uuid) -> Result<Option<Viewing>, sqlx::Error>;
}

#[async_trait]
impl ViewingExt for DBClient {
    async fn save_viewing(&self, data: &CreateViewingDto) -> Result<Viewing, sqlx::Error> {
        let viewing = sqlx::query_as::<_, Viewing>(
            r#"
            INSERT INTO viewings (property_id, lead_id, agent_id, viewing_date, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data.property_id)
        .bind(data.lead_id)
        .bind(data.agent_id)
        .bind(data.viewing_date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(viewing)
    }

    async fn get_viewing(&self, viewing_id: Uuid) -> Result<Option<Viewing>, sqlx::Error> {
        let viewing = sqlx::query_as::<_, Viewing>(r#"SELECT * FROM viewings WHERE id = $1"#)
            .bind(viewing_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(viewing)
    }

    async fn get_viewings(
        &self,
        filters: &ViewingFilters,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Viewing>, sqlx::Error> {
        let offset = page_offset(page, limit);

        let viewings = sqlx::query_as::<_, Viewing>(
            r#"
            SELECT * FROM viewings
            WHERE ($1::uuid IS NULL OR property_id = $1)
              AND ($2::uuid IS NULL OR lead_id = $2)
              AND ($3::uuid IS NULL OR agent_id = $3)
              AND ($4::timestamptz IS NULL OR viewing_date >= $4)
              AND ($5::timestamptz IS NULL OR viewing_date < $5)
            ORDER BY viewing_date DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(filters.property_id)
        .bind(filters.lead_id)
        .bind(filters.agent_id)
        .bind(filters.from)
        .bind(filters.until)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(viewings)
    }

    async fn get_viewing_count(&self, filters: &ViewingFilters) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM viewings
            WHERE ($1::uuid IS NULL OR property_id = $1)
              AND ($2::uuid IS NULL OR lead_id = $2)
              AND ($3::uuid IS NULL OR agent_id = $3)
              AND ($4::timestamptz IS NULL OR viewing_date >= $4)
              AND ($5::timestamptz IS NULL OR viewing_date < $5)
            "#,
        )
        .bind(filters.property_id)
        .bind(filters.lead_id)
        .bind(filters.agent_id)
        .bind(filters.from)
        .bind(filters.until)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn update_viewing_status(
        &self,
        viewing_id: Uuid,
        status: ViewingStatus,
    ) -> Result<Viewing, sqlx::Error> {
        let viewing = sqlx::query_as::<_, Viewing>(
            r#"
            UPDATE viewings
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(viewing_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(viewing)
    }

    async fn delete_viewing(&self, viewing_id: Uuid) -> Result<Option<Viewing>, sqlx::Error> {
        let viewing =
            sqlx::query_as::<_, Viewing>(r#"DELETE FROM viewings WHERE id = $1 RETURNING *"#)
                .bind(viewing_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(viewing)
    }
}
