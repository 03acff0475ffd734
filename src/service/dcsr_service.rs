// services/dcsr_service.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use crate::{
    db::{db::DBClient, dcsrdb::DcsrExt, teamdb::TeamExt, userdb::UserExt},
    models::{
        dcsrmodel::{DcsrCounts, DcsrReport, MemberDcsr, TeamDcsr},
        propertymodel::PropertyType,
    },
    service::error::ServiceError,
};

/// Widens an inclusive date range to the half-open UTC instant window
/// [start 00:00:00, day-after-end 00:00:00) used for timestamp columns.
pub fn day_bounds(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let from = Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN));
    let until = Utc.from_utc_datetime(&(end + Duration::days(1)).and_time(NaiveTime::MIN));
    (from, until)
}

/// Same widening for list filters where either side may be absent.
pub fn optional_day_bounds(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), ServiceError> {
    if let (Some(start), Some(end)) = (start, end) {
        validate_range(start, end)?;
    }

    let from = start.map(|d| day_bounds(d, d).0);
    let until = end.map(|d| day_bounds(d, d).1);
    Ok((from, until))
}

fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), ServiceError> {
    if start > end {
        return Err(ServiceError::InvalidDateRange);
    }
    Ok(())
}

/// Daily Client/Sales Report calculations: five activity counts over an
/// inclusive date range, company-wide or scoped to a team.
#[derive(Debug, Clone)]
pub struct DcsrService {
    db_client: Arc<DBClient>,
}

impl DcsrService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    async fn counts_for(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        agent_ids: Option<&[Uuid]>,
    ) -> Result<DcsrCounts, ServiceError> {
        let (from, until) = day_bounds(start, end);

        let listings_count = self
            .db_client
            .count_listings_in_range(from, until, agent_ids)
            .await?;
        let leads_count = self
            .db_client
            .count_leads_in_range(from, until, agent_ids)
            .await?;
        let sales_count = self
            .db_client
            .count_closures_in_range(PropertyType::Sale, start, end, agent_ids)
            .await?;
        let rent_count = self
            .db_client
            .count_closures_in_range(PropertyType::Rent, start, end, agent_ids)
            .await?;
        let viewings_count = self
            .db_client
            .count_viewings_in_range(from, until, agent_ids)
            .await?;

        Ok(DcsrCounts {
            listings_count,
            leads_count,
            sales_count,
            rent_count,
            viewings_count,
        })
    }

    /// Company-wide counts for the range. An empty range is not an error,
    /// it just reports zeros everywhere.
    pub async fn calculate_dcsr_data(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DcsrCounts, ServiceError> {
        validate_range(start, end)?;
        self.counts_for(start, end, None).await
    }

    /// Counts for one team: totals over every active member plus a
    /// per-member breakdown. The leader only contributes through their
    /// own membership row.
    pub async fn calculate_team_dcsr_data(
        &self,
        leader_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TeamDcsr, ServiceError> {
        validate_range(start, end)?;

        let members = self.db_client.get_team_members(leader_id).await?;
        if members.is_empty() {
            return Err(ServiceError::TeamNotFound);
        }

        let leader = self
            .db_client
            .get_user(leader_id)
            .await?
            .ok_or(ServiceError::TeamNotFound)?;

        let member_ids: Vec<Uuid> = members.iter().map(|m| m.agent_id).collect();
        let totals = self.counts_for(start, end, Some(&member_ids)).await?;

        let mut member_reports = Vec::with_capacity(members.len());
        for member in &members {
            let ids = [member.agent_id];
            let counts = self.counts_for(start, end, Some(&ids)).await?;
            member_reports.push(MemberDcsr {
                agent_id: member.agent_id,
                agent_name: member.name.clone(),
                counts,
            });
        }

        Ok(TeamDcsr {
            leader_id,
            leader_name: leader.name,
            start_date: start,
            end_date: end,
            totals,
            members: member_reports,
        })
    }

    /// Persists a snapshot of the counts for the range. Each exact
    /// (start, end) pair may only be saved once; recalculation updates
    /// the existing row instead.
    pub async fn create_report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DcsrReport, ServiceError> {
        validate_range(start, end)?;

        if self
            .db_client
            .get_report_by_range(start, end)
            .await?
            .is_some()
        {
            return Err(ServiceError::ReportAlreadyExists);
        }

        let counts = self.counts_for(start, end, None).await?;
        let report = self.db_client.save_report(start, end, counts).await?;

        Ok(report)
    }

    pub async fn get_report(&self, report_id: Uuid) -> Result<DcsrReport, ServiceError> {
        self.db_client
            .get_report(report_id)
            .await?
            .ok_or(ServiceError::ReportNotFound(report_id))
    }

    pub async fn list_reports(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        page: u32,
        limit: usize,
    ) -> Result<(Vec<DcsrReport>, i64), ServiceError> {
        let reports = self.db_client.get_reports(start, end, page, limit).await?;
        let total = self.db_client.get_report_count(start, end).await?;
        Ok((reports, total))
    }

    /// Re-runs the counts over the report's stored range and writes them
    /// back, refreshing a snapshot after data corrections.
    pub async fn recalculate_report(&self, report_id: Uuid) -> Result<DcsrReport, ServiceError> {
        let report = self.get_report(report_id).await?;
        let counts = self
            .counts_for(report.start_date, report.end_date, None)
            .await?;
        let updated = self.db_client.update_report_counts(report.id, counts).await?;
        Ok(updated)
    }

    pub async fn delete_report(&self, report_id: Uuid) -> Result<DcsrReport, ServiceError> {
        self.db_client
            .delete_report(report_id)
            .await?
            .ok_or(ServiceError::ReportNotFound(report_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_day_bounds_cover_whole_utc_days() {
        let (from, until) = day_bounds(date(2025, 3, 10), date(2025, 3, 12));
        assert_eq!(from.to_rfc3339(), "2025-03-10T00:00:00+00:00");
        assert_eq!(until.to_rfc3339(), "2025-03-13T00:00:00+00:00");
    }

    #[test]
    fn test_single_day_range_spans_exactly_one_day() {
        let day = date(2025, 6, 1);
        let (from, until) = day_bounds(day, day);
        assert_eq!(until - from, Duration::days(1));
    }

    #[test]
    fn test_day_bounds_across_month_end() {
        let (_, until) = day_bounds(date(2025, 1, 31), date(2025, 1, 31));
        assert_eq!(until.to_rfc3339(), "2025-02-01T00:00:00+00:00");
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let result = validate_range(date(2025, 5, 2), date(2025, 5, 1));
        assert!(matches!(result, Err(ServiceError::InvalidDateRange)));
    }

    #[test]
    fn test_equal_start_and_end_is_valid() {
        assert!(validate_range(date(2025, 5, 1), date(2025, 5, 1)).is_ok());
    }

    #[test]
    fn test_optional_day_bounds_one_sided() {
        let (from, until) = optional_day_bounds(Some(date(2025, 4, 1)), None).unwrap();
        assert_eq!(from.unwrap().to_rfc3339(), "2025-04-01T00:00:00+00:00");
        assert!(until.is_none());

        let (from, until) = optional_day_bounds(None, Some(date(2025, 4, 30))).unwrap();
        assert!(from.is_none());
        assert_eq!(until.unwrap().to_rfc3339(), "2025-05-01T00:00:00+00:00");
    }

    #[test]
    fn test_optional_day_bounds_rejects_inverted_pair() {
        let result = optional_day_bounds(Some(date(2025, 4, 2)), Some(date(2025, 4, 1)));
        assert!(matches!(result, Err(ServiceError::InvalidDateRange)));
    }

    // No database behind the lazy pool; the future is built, not awaited.
    #[tokio::test]
    async fn dcsr_service_compiles() {
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/fortunest").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let svc = DcsrService::new(db_client);

        let _ = svc.calculate_dcsr_data(date(2025, 1, 1), date(2025, 1, 31));
    }
}
