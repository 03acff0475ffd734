use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Date range input, accepted as `start_date`/`end_date`, the legacy
/// `date_from`/`date_to` pair, or `month` + `year`, resolved in that order.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct DateRangeDto {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    // Older clients still send these
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,

    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl DateRangeDto {
    pub fn resolve(&self) -> Result<(NaiveDate, NaiveDate), String> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            return Ok((start, end));
        }
        if let (Some(start), Some(end)) = (self.date_from, self.date_to) {
            return Ok((start, end));
        }
        if let (Some(month), Some(year)) = (self.month, self.year) {
            return month_range(year, month)
                .ok_or_else(|| "Invalid month or year".to_string());
        }
        Err("Start date and end date are required".to_string())
    }
}

/// First and last day of a calendar month.
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next_month.pred_opt()?))
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct DcsrListQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct CommissionReportQueryDto {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub month: Option<u32>,
    pub year: Option<i32>,

    pub agent_id: Option<Uuid>,
}

impl CommissionReportQueryDto {
    pub fn to_range(&self) -> DateRangeDto {
        DateRangeDto {
            start_date: self.start_date,
            end_date: self.end_date,
            date_from: self.date_from,
            date_to: self.date_to,
            month: self.month,
            year: self.year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_prefers_start_end() {
        let dto = DateRangeDto {
            start_date: Some(date(2024, 1, 1)),
            end_date: Some(date(2024, 1, 31)),
            date_from: Some(date(2020, 1, 1)),
            date_to: Some(date(2020, 1, 2)),
            month: Some(6),
            year: Some(2023),
        };
        assert_eq!(dto.resolve().unwrap(), (date(2024, 1, 1), date(2024, 1, 31)));
    }

    #[test]
    fn test_resolve_legacy_params() {
        let dto = DateRangeDto {
            date_from: Some(date(2024, 2, 1)),
            date_to: Some(date(2024, 2, 29)),
            ..Default::default()
        };
        assert_eq!(dto.resolve().unwrap(), (date(2024, 2, 1), date(2024, 2, 29)));
    }

    #[test]
    fn test_resolve_month_year() {
        let dto = DateRangeDto {
            month: Some(2),
            year: Some(2024),
            ..Default::default()
        };
        // 2024 is a leap year
        assert_eq!(dto.resolve().unwrap(), (date(2024, 2, 1), date(2024, 2, 29)));

        let dto = DateRangeDto {
            month: Some(12),
            year: Some(2023),
            ..Default::default()
        };
        assert_eq!(dto.resolve().unwrap(), (date(2023, 12, 1), date(2023, 12, 31)));
    }

    #[test]
    fn test_resolve_invalid_month() {
        let dto = DateRangeDto {
            month: Some(13),
            year: Some(2024),
            ..Default::default()
        };
        assert_eq!(dto.resolve().unwrap_err(), "Invalid month or year");
    }

    #[test]
    fn test_resolve_missing_params() {
        let dto = DateRangeDto::default();
        assert_eq!(
            dto.resolve().unwrap_err(),
            "Start date and end date are required"
        );

        // A lone start date is not enough
        let dto = DateRangeDto {
            start_date: Some(date(2024, 1, 1)),
            ..Default::default()
        };
        assert!(dto.resolve().is_err());
    }
}
