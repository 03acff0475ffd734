// db/referraldb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::{page_offset, DBClient};
use crate::dtos::referraldtos::CreateReferralDto;
use crate::models::referralmodel::{Referral, ReferralStatus};

#[async_trait]
pub trait ReferralExt {
    async fn save_referral(&self, data: &CreateReferralDto) -> Result<Referral, sqlx::Error>;

    async fn get_referrals(
        &self,
        lead_id: Option<Uuid>,
        referred_by: Option<Uuid>,
        status: Option<ReferralStatus>,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Referral>, sqlx::Error>;

    async fn update_referral_status(
        &self,
        referral_id: Uuid,
        status: ReferralStatus,
    ) -> Result<Option<Referral>, sqlx::Error>;

    async fn delete_referral(&self, referral_id: Uuid) -> Result<Option<Referral>, sqlx::Error>;
}

#[async_trait]
impl ReferralExt for DBClient {
    async fn save_referral(&self, data: &CreateReferralDto) -> Result<Referral, sqlx::Error> {
        let referral = sqlx::query_as::<_, Referral>(
            r#"
            INSERT INTO referrals (lead_id, referred_by, notes)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(data.lead_id)
        .bind(data.referred_by)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(referral)
    }

    async fn get_referrals(
        &self,
        lead_id: Option<Uuid>,
        referred_by: Option<Uuid>,
        status: Option<ReferralStatus>,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Referral>, sqlx::Error> {
        let offset = page_offset(page, limit);

        let referrals = sqlx::query_as::<_, Referral>(
            r#"
            SELECT * FROM referrals
            WHERE ($1::uuid IS NULL OR lead_id = $1)
              AND ($2::uuid IS NULL OR referred_by = $2)
              AND ($3::referral_status IS NULL OR status = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(lead_id)
        .bind(referred_by)
        .bind(status)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(referrals)
    }

    async fn update_referral_status(
        &self,
        referral_id: Uuid,
        status: ReferralStatus,
    ) -> Result<Option<Referral>, sqlx::Error> {
        let referral = sqlx::query_as::<_, Referral>(
            r#"
            UPDATE referrals
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(referral_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(referral)
    }

    async fn delete_referral(&self, referral_id: Uuid) -> Result<Option<Referral>, sqlx::Error> {
        let referral =
            sqlx::query_as::<_, Referral>(r#"DELETE FROM referrals WHERE id = $1 RETURNING *"#)
                .bind(referral_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(referral)
    }
}
