use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::propertymodel::{Property, PropertyType};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreatePropertyDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    pub address: Option<String>,

    pub property_type: PropertyType,
    pub category_id: i32,

    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: i64,

    pub agent_id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
}

// All fields optional; reference number regenerates when type or category changes
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct UpdatePropertyDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,

    pub address: Option<String>,

    pub property_type: Option<PropertyType>,
    pub category_id: Option<i32>,
    pub status_id: Option<i32>,

    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: Option<i64>,

    pub agent_id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CloseDealDto {
    // Defaults to today (UTC) when omitted
    pub closed_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct PropertyListQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,

    pub property_type: Option<PropertyType>,
    pub category_id: Option<i32>,
    pub status_id: Option<i32>,
    pub agent_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterPropertyDto {
    pub id: Uuid,
    pub reference_number: String,
    pub title: String,
    pub address: Option<String>,
    pub property_type: String,
    pub category_id: i32,
    pub status_id: i32,
    pub price: i64,
    pub agent_id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
    pub closed_date: Option<NaiveDate>,
}

impl FilterPropertyDto {
    pub fn filter_property(property: &Property) -> Self {
        FilterPropertyDto {
            id: property.id,
            reference_number: property.reference_number.to_owned(),
            title: property.title.to_owned(),
            address: property.address.clone(),
            property_type: property.property_type.to_str().to_string(),
            category_id: property.category_id,
            status_id: property.status_id,
            price: property.price,
            agent_id: property.agent_id,
            owner_id: property.owner_id,
            closed_date: property.closed_date,
        }
    }

    pub fn filter_properties(properties: &[Property]) -> Vec<FilterPropertyDto> {
        properties.iter().map(FilterPropertyDto::filter_property).collect()
    }
}
