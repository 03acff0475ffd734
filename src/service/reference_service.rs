// services/reference_service.rs
use std::sync::Arc;

use chrono::{Datelike, Utc};
use regex::Regex;

use crate::{
    db::db::DBClient, models::propertymodel::PropertyType, service::error::ServiceError,
};

/// Counter row shared by every property reference, regardless of type,
/// category or year. Sequence numbers never repeat across the system.
const COUNTER_SCOPE: &str = "properties";

/// Pieces of a reference number such as FSAPT253.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    pub property_type: PropertyType,
    pub category_code: String,
    pub year: u32,
    pub sequence: i64,
}

#[derive(Debug, Clone)]
pub struct ReferenceService {
    db_client: Arc<DBClient>,
}

impl ReferenceService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Issues the next reference number for a property. The sequence comes
    /// from a single upserted counter row, so two concurrent creates can
    /// never be handed the same number. The year is the year of issue;
    /// regenerated references carry the year of regeneration.
    pub async fn next_reference_number(
        &self,
        property_type: PropertyType,
        category_code: &str,
    ) -> Result<String, ServiceError> {
        if !is_valid_category_code(category_code) {
            return Err(ServiceError::InvalidCategoryCode(category_code.to_string()));
        }

        let sequence = self.next_counter_value().await?;
        let year = Utc::now().year();

        Ok(format_reference(property_type, category_code, year, sequence))
    }

    async fn next_counter_value(&self) -> Result<i64, ServiceError> {
        let value = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO reference_counters (scope, last_value)
            VALUES ($1, 1)
            ON CONFLICT (scope)
            DO UPDATE SET last_value = reference_counters.last_value + 1
            RETURNING last_value
            "#,
        )
        .bind(COUNTER_SCOPE)
        .fetch_one(&self.db_client.pool)
        .await?;

        Ok(value)
    }
}

/// Category codes are 1 to 4 uppercase ASCII letters.
pub fn is_valid_category_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= 4 && code.chars().all(|c| c.is_ascii_uppercase())
}

pub fn format_reference(
    property_type: PropertyType,
    category_code: &str,
    year: i32,
    sequence: i64,
) -> String {
    format!(
        "F{}{}{:02}{}",
        property_type.reference_letter(),
        category_code,
        year.rem_euclid(100),
        sequence
    )
}

/// Splits a reference number back into its parts. The sequence must not
/// carry leading zeros, so FSAPT2501 is rejected while FSAPT251 parses.
pub fn parse_reference(reference: &str) -> Option<ParsedReference> {
    let pattern = Regex::new(r"^F([RS])([A-Z]{1,4})(\d{2})([1-9]\d*)$").unwrap();
    let captures = pattern.captures(reference)?;

    let property_type = match &captures[1] {
        "S" => PropertyType::Sale,
        "R" => PropertyType::Rent,
        _ => return None,
    };

    Some(ParsedReference {
        property_type,
        category_code: captures[2].to_string(),
        year: captures[3].parse().ok()?,
        sequence: captures[4].parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reference() {
        assert_eq!(format_reference(PropertyType::Sale, "APT", 2025, 3), "FSAPT253");
        assert_eq!(format_reference(PropertyType::Rent, "VIL", 2025, 12), "FRVIL2512");
        assert_eq!(format_reference(PropertyType::Sale, "LND", 2030, 1), "FSLND301");
        // Single-digit years pad to two digits
        assert_eq!(format_reference(PropertyType::Rent, "OFF", 2107, 9), "FROFF079");
        assert_eq!(format_reference(PropertyType::Rent, "OFF", 2007, 9), "FROFF079");
    }

    #[test]
    fn test_sequence_is_not_zero_padded() {
        let reference = format_reference(PropertyType::Sale, "APT", 2025, 7);
        assert_eq!(reference, "FSAPT257");
        assert!(!reference.ends_with("07"));
    }

    #[test]
    fn test_parse_reference_round_trip() {
        let parsed = parse_reference("FSAPT253").unwrap();
        assert_eq!(parsed.property_type, PropertyType::Sale);
        assert_eq!(parsed.category_code, "APT");
        assert_eq!(parsed.year, 25);
        assert_eq!(parsed.sequence, 3);

        let parsed = parse_reference("FRVIL25144").unwrap();
        assert_eq!(parsed.property_type, PropertyType::Rent);
        assert_eq!(parsed.sequence, 144);
    }

    #[test]
    fn test_parse_rejects_malformed_references() {
        assert!(parse_reference("").is_none());
        assert!(parse_reference("SAPT253").is_none());
        assert!(parse_reference("FXAPT253").is_none());
        assert!(parse_reference("FSapt253").is_none());
        assert!(parse_reference("FSTOOLONG253").is_none());
        assert!(parse_reference("FSAPT25").is_none());
        // Leading zero in the sequence
        assert!(parse_reference("FSAPT2501").is_none());
    }

    #[test]
    fn test_category_code_validation() {
        assert!(is_valid_category_code("A"));
        assert!(is_valid_category_code("APT"));
        assert!(is_valid_category_code("SHOP"));
        assert!(!is_valid_category_code(""));
        assert!(!is_valid_category_code("apt"));
        assert!(!is_valid_category_code("TOOLONG"));
        assert!(!is_valid_category_code("AP1"));
    }

    #[tokio::test]
    async fn reference_service_compiles() {
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/fortunest").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let svc = ReferenceService::new(db_client);

        let _ = svc.next_reference_number(PropertyType::Sale, "APT");
    }
}
