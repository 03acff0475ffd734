// db/propertydb.rs
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::db::{page_offset, DBClient};
use crate::dtos::propertydtos::{CreatePropertyDto, UpdatePropertyDto};
use crate::models::propertymodel::{Property, PropertyType};

#[derive(Debug, Default, Clone)]
pub struct PropertyFilters {
    pub property_type: Option<PropertyType>,
    pub category_id: Option<i32>,
    pub status_id: Option<i32>,
    pub agent_id: Option<Uuid>,
}

#[async_trait]
pub trait PropertyExt {
    async fn save_property(
        &self,
        data: &CreatePropertyDto,
        reference_number: &str,
        status_id: i32,
    ) -> Result<Property, sqlx::Error>;

    async fn get_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error>;

    async fn get_property_by_reference(
        &self,
        reference_number: &str,
    ) -> Result<Option<Property>, sqlx::Error>;

    async fn get_properties(
        &self,
        filters: &PropertyFilters,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Property>, sqlx::Error>;

    async fn get_property_count(&self, filters: &PropertyFilters) -> Result<i64, sqlx::Error>;

    async fn update_property(
        &self,
        property_id: Uuid,
        data: &UpdatePropertyDto,
        new_reference: Option<&str>,
    ) -> Result<Property, sqlx::Error>;

    async fn close_property(
        &self,
        property_id: Uuid,
        closed_date: NaiveDate,
        closed_status_id: i32,
    ) -> Result<Property, sqlx::Error>;

    async fn delete_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error>;
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn save_property(
        &self,
        data: &CreatePropertyDto,
        reference_number: &str,
        status_id: i32,
    ) -> Result<Property, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties
                (reference_number, title, address, property_type, category_id,
                 status_id, price, agent_id, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(reference_number)
        .bind(&data.title)
        .bind(&data.address)
        .bind(data.property_type)
        .bind(data.category_id)
        .bind(status_id)
        .bind(data.price)
        .bind(data.agent_id)
        .bind(data.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(property)
    }

    async fn get_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>(r#"SELECT * FROM properties WHERE id = $1"#)
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(property)
    }

    async fn get_property_by_reference(
        &self,
        reference_number: &str,
    ) -> Result<Option<Property>, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>(
            r#"SELECT * FROM properties WHERE reference_number = $1"#,
        )
        .bind(reference_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    async fn get_properties(
        &self,
        filters: &PropertyFilters,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Property>, sqlx::Error> {
        let offset = page_offset(page, limit);

        let properties = sqlx::query_as::<_, Property>(
            r#"
            SELECT * FROM properties
            WHERE ($1::property_type IS NULL OR property_type = $1)
              AND ($2::int4 IS NULL OR category_id = $2)
              AND ($3::int4 IS NULL OR status_id = $3)
              AND ($4::uuid IS NULL OR agent_id = $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filters.property_type)
        .bind(filters.category_id)
        .bind(filters.status_id)
        .bind(filters.agent_id)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    async fn get_property_count(&self, filters: &PropertyFilters) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM properties
            WHERE ($1::property_type IS NULL OR property_type = $1)
              AND ($2::int4 IS NULL OR category_id = $2)
              AND ($3::int4 IS NULL OR status_id = $3)
              AND ($4::uuid IS NULL OR agent_id = $4)
            "#,
        )
        .bind(filters.property_type)
        .bind(filters.category_id)
        .bind(filters.status_id)
        .bind(filters.agent_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn update_property(
        &self,
        property_id: Uuid,
        data: &UpdatePropertyDto,
        new_reference: Option<&str>,
    ) -> Result<Property, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties SET
                title = COALESCE($1, title),
                address = COALESCE($2, address),
                property_type = COALESCE($3, property_type),
                category_id = COALESCE($4, category_id),
                status_id = COALESCE($5, status_id),
                price = COALESCE($6, price),
                agent_id = COALESCE($7, agent_id),
                owner_id = COALESCE($8, owner_id),
                reference_number = COALESCE($9, reference_number),
                updated_at = NOW()
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.address)
        .bind(data.property_type)
        .bind(data.category_id)
        .bind(data.status_id)
        .bind(data.price)
        .bind(data.agent_id)
        .bind(data.owner_id)
        .bind(new_reference)
        .bind(property_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(property)
    }

    async fn close_property(
        &self,
        property_id: Uuid,
        closed_date: NaiveDate,
        closed_status_id: i32,
    ) -> Result<Property, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties
            SET closed_date = $1, status_id = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(closed_date)
        .bind(closed_status_id)
        .bind(property_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(property)
    }

    async fn delete_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error> {
        let property =
            sqlx::query_as::<_, Property>(r#"DELETE FROM properties WHERE id = $1 RETURNING *"#)
                .bind(property_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(property)
    }
}
