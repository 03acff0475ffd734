use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "property_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Sale,
    Rent,
}

impl PropertyType {
    pub fn to_str(&self) -> &str {
        match self {
            PropertyType::Sale => "sale",
            PropertyType::Rent => "rent",
        }
    }

    // Leading letter of a reference number: S for sale listings, R for rentals
    pub fn reference_letter(&self) -> char {
        match self {
            PropertyType::Sale => 'S',
            PropertyType::Rent => 'R',
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: Uuid,
    pub reference_number: String,
    pub title: String,
    pub address: Option<String>,
    pub property_type: PropertyType,
    pub category_id: i32,
    pub status_id: i32,

    // Price in minor currency units
    pub price: i64,

    pub agent_id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
    pub closed_date: Option<NaiveDate>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Category {
    pub id: i32,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PropertyStatus {
    pub id: i32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_letter() {
        assert_eq!(PropertyType::Sale.reference_letter(), 'S');
        assert_eq!(PropertyType::Rent.reference_letter(), 'R');
    }

    #[test]
    fn test_property_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PropertyType::Sale).unwrap(), "\"sale\"");
        assert_eq!(serde_json::to_string(&PropertyType::Rent).unwrap(), "\"rent\"");
    }
}
