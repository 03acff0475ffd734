// db/lookupdb.rs
use async_trait::async_trait;

use super::db::DBClient;
use crate::models::leadmodel::ReferenceSource;
use crate::models::propertymodel::{Category, PropertyStatus};

#[async_trait]
pub trait LookupExt {
    async fn get_categories(&self) -> Result<Vec<Category>, sqlx::Error>;

    async fn get_category(&self, category_id: i32) -> Result<Option<Category>, sqlx::Error>;

    async fn get_property_statuses(&self) -> Result<Vec<PropertyStatus>, sqlx::Error>;

    async fn get_property_status_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PropertyStatus>, sqlx::Error>;

    async fn get_reference_sources(&self) -> Result<Vec<ReferenceSource>, sqlx::Error>;
}

#[async_trait]
impl LookupExt for DBClient {
    async fn get_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        let categories =
            sqlx::query_as::<_, Category>(r#"SELECT * FROM categories ORDER BY code"#)
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    async fn get_category(&self, category_id: i32) -> Result<Option<Category>, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(r#"SELECT * FROM categories WHERE id = $1"#)
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    async fn get_property_statuses(&self) -> Result<Vec<PropertyStatus>, sqlx::Error> {
        let statuses =
            sqlx::query_as::<_, PropertyStatus>(r#"SELECT * FROM property_statuses ORDER BY id"#)
                .fetch_all(&self.pool)
                .await?;

        Ok(statuses)
    }

    async fn get_property_status_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PropertyStatus>, sqlx::Error> {
        let status = sqlx::query_as::<_, PropertyStatus>(
            r#"SELECT * FROM property_statuses WHERE name = $1"#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status)
    }

    async fn get_reference_sources(&self) -> Result<Vec<ReferenceSource>, sqlx::Error> {
        let sources =
            sqlx::query_as::<_, ReferenceSource>(r#"SELECT * FROM reference_sources ORDER BY id"#)
                .fetch_all(&self.pool)
                .await?;

        Ok(sources)
    }
}
