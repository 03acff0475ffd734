// db/dcsrdb.rs
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::db::{page_offset, DBClient};
use crate::models::dcsrmodel::{DcsrCounts, DcsrReport};
use crate::models::propertymodel::PropertyType;

#[async_trait]
pub trait DcsrExt {
    /// Listings created inside the half-open UTC window, optionally
    /// restricted to a set of agents.
    async fn count_listings_in_range(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        agent_ids: Option<&[Uuid]>,
    ) -> Result<i64, sqlx::Error>;

    async fn count_leads_in_range(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        agent_ids: Option<&[Uuid]>,
    ) -> Result<i64, sqlx::Error>;

    /// Deals of the given type closed between the two dates, inclusive.
    /// closed_date is a calendar date so no time normalization applies.
    async fn count_closures_in_range(
        &self,
        property_type: PropertyType,
        start: NaiveDate,
        end: NaiveDate,
        agent_ids: Option<&[Uuid]>,
    ) -> Result<i64, sqlx::Error>;

    async fn count_viewings_in_range(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        agent_ids: Option<&[Uuid]>,
    ) -> Result<i64, sqlx::Error>;

    async fn save_report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        counts: DcsrCounts,
    ) -> Result<DcsrReport, sqlx::Error>;

    async fn get_report(&self, report_id: Uuid) -> Result<Option<DcsrReport>, sqlx::Error>;

    async fn get_report_by_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<DcsrReport>, sqlx::Error>;

    async fn get_reports(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        page: u32,
        limit: usize,
    ) -> Result<Vec<DcsrReport>, sqlx::Error>;

    async fn get_report_count(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<i64, sqlx::Error>;

    async fn update_report_counts(
        &self,
        report_id: Uuid,
        counts: DcsrCounts,
    ) -> Result<DcsrReport, sqlx::Error>;

    async fn delete_report(&self, report_id: Uuid) -> Result<Option<DcsrReport>, sqlx::Error>;
}

#[async_trait]
impl DcsrExt for DBClient {
    async fn count_listings_in_range(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        agent_ids: Option<&[Uuid]>,
    ) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM properties
            WHERE created_at >= $1 AND created_at < $2
              AND ($3::uuid[] IS NULL OR agent_id = ANY($3))
            "#,
        )
        .bind(from)
        .bind(until)
        .bind(agent_ids)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_leads_in_range(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        agent_ids: Option<&[Uuid]>,
    ) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM leads
            WHERE created_at >= $1 AND created_at < $2
              AND ($3::uuid[] IS NULL OR agent_id = ANY($3))
            "#,
        )
        .bind(from)
        .bind(until)
        .bind(agent_ids)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_closures_in_range(
        &self,
        property_type: PropertyType,
        start: NaiveDate,
        end: NaiveDate,
        agent_ids: Option<&[Uuid]>,
    ) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM properties
            WHERE property_type = $1
              AND closed_date IS NOT NULL
              AND closed_date >= $2 AND closed_date <= $3
              AND ($4::uuid[] IS NULL OR agent_id = ANY($4))
            "#,
        )
        .bind(property_type)
        .bind(start)
        .bind(end)
        .bind(agent_ids)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_viewings_in_range(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        agent_ids: Option<&[Uuid]>,
    ) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM viewings
            WHERE viewing_date >= $1 AND viewing_date < $2
              AND ($3::uuid[] IS NULL OR agent_id = ANY($3))
            "#,
        )
        .bind(from)
        .bind(until)
        .bind(agent_ids)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn save_report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        counts: DcsrCounts,
    ) -> Result<DcsrReport, sqlx::Error> {
        let report = sqlx::query_as::<_, DcsrReport>(
            r#"
            INSERT INTO dcsr_reports
                (start_date, end_date, listings_count, leads_count,
                 sales_count, rent_count, viewings_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(counts.listings_count)
        .bind(counts.leads_count)
        .bind(counts.sales_count)
        .bind(counts.rent_count)
        .bind(counts.viewings_count)
        .fetch_one(&self.pool)
        .await?;

        Ok(report)
    }

    async fn get_report(&self, report_id: Uuid) -> Result<Option<DcsrReport>, sqlx::Error> {
        let report =
            sqlx::query_as::<_, DcsrReport>(r#"SELECT * FROM dcsr_reports WHERE id = $1"#)
                .bind(report_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(report)
    }

    async fn get_report_by_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<DcsrReport>, sqlx::Error> {
        let report = sqlx::query_as::<_, DcsrReport>(
            r#"SELECT * FROM dcsr_reports WHERE start_date = $1 AND end_date = $2"#,
        )
        .bind(start)
        .bind(end)
        .fetch_optional(&self.pool)
        .await?;

        Ok(report)
    }

    async fn get_reports(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        page: u32,
        limit: usize,
    ) -> Result<Vec<DcsrReport>, sqlx::Error> {
        let offset = page_offset(page, limit);

        let reports = sqlx::query_as::<_, DcsrReport>(
            r#"
            SELECT * FROM dcsr_reports
            WHERE ($1::date IS NULL OR start_date >= $1)
              AND ($2::date IS NULL OR end_date <= $2)
            ORDER BY start_date DESC, created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    async fn get_report_count(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM dcsr_reports
            WHERE ($1::date IS NULL OR start_date >= $1)
              AND ($2::date IS NULL OR end_date <= $2)
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn update_report_counts(
        &self,
        report_id: Uuid,
        counts: DcsrCounts,
    ) -> Result<DcsrReport, sqlx::Error> {
        let report = sqlx::query_as::<_, DcsrReport>(
            r#"
            UPDATE dcsr_reports SET
                listings_count = $1,
                leads_count = $2,
                sales_count = $3,
                rent_count = $4,
                viewings_count = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(counts.listings_count)
        .bind(counts.leads_count)
        .bind(counts.sales_count)
        .bind(counts.rent_count)
        .bind(counts.viewings_count)
        .bind(report_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(report)
    }

    async fn delete_report(&self, report_id: Uuid) -> Result<Option<DcsrReport>, sqlx::Error> {
        let report = sqlx::query_as::<_, DcsrReport>(
            r#"DELETE FROM dcsr_reports WHERE id = $1 RETURNING *"#,
        )
        .bind(report_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(report)
    }
}
