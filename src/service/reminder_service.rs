// services/reminder_service.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::{
    config::Config,
    db::{calendardb::CalendarExt, db::DBClient},
    mail::mails::send_event_reminder_email,
    models::calendarmodel::{CalendarEvent, EventReminder, ReminderStatus, ReminderType},
    service::error::ServiceError,
};

/// Upper bound on reminders handled per sweep pass.
const SWEEP_BATCH_SIZE: i64 = 100;

/// Canonical send time for one reminder type, derived from the event start.
pub fn canonical_reminder_time(
    reminder_type: ReminderType,
    event_start: DateTime<Utc>,
) -> DateTime<Utc> {
    match reminder_type {
        ReminderType::OneDayBefore => event_start - Duration::hours(24),
        ReminderType::SameDayMorning => {
            let morning = event_start.date_naive().and_hms_opt(9, 0, 0).unwrap();
            Utc.from_utc_datetime(&morning)
        }
        ReminderType::OneHourBefore => event_start - Duration::hours(1),
    }
}

/// A reminder only starts out pending when its send time is still ahead
/// and falls before the event itself starts. Anything else is recorded
/// skipped at scheduling time.
pub fn initial_status(
    scheduled_at: DateTime<Utc>,
    event_start: DateTime<Utc>,
    now: DateTime<Utc>,
) -> ReminderStatus {
    if scheduled_at <= now || scheduled_at >= event_start {
        ReminderStatus::Skipped
    } else {
        ReminderStatus::Pending
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SweepOutcome {
    pub skipped: u64,
    pub sent: u64,
    pub failed: u64,
}

#[derive(Debug, Clone)]
pub struct ReminderService {
    db_client: Arc<DBClient>,
    env: Config,
}

impl ReminderService {
    pub fn new(db_client: Arc<DBClient>, env: Config) -> Self {
        Self { db_client, env }
    }

    /// Writes the three reminder rows for a freshly created event.
    pub async fn schedule_event_reminders(
        &self,
        event: &CalendarEvent,
    ) -> Result<(), ServiceError> {
        let now = Utc::now();

        for reminder_type in ReminderType::ALL {
            let scheduled_at = canonical_reminder_time(reminder_type, event.start_time);
            let status = initial_status(scheduled_at, event.start_time, now);

            self.db_client
                .insert_reminder(event.id, event.user_id, reminder_type, scheduled_at, status)
                .await?;
        }

        Ok(())
    }

    /// Called after an event's start time changes. Unsent rows are replaced
    /// with a fresh set at the new canonical times; rows that already went
    /// out stay untouched so nothing is sent twice.
    pub async fn reschedule_event_reminders(
        &self,
        event: &CalendarEvent,
    ) -> Result<(), ServiceError> {
        self.db_client.delete_unsent_reminders(event.id).await?;
        self.schedule_event_reminders(event).await
    }

    pub async fn get_event_reminders(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<EventReminder>, ServiceError> {
        self.db_client
            .get_event(event_id)
            .await?
            .ok_or(ServiceError::EventNotFound(event_id))?;

        let reminders = self.db_client.get_event_reminders(event_id).await?;
        Ok(reminders)
    }

    /// One sweep: skip pending reminders whose event already started, then
    /// claim and dispatch everything due. The claim flips the row to sent
    /// before the email goes out, so a crash or a racing sweep can at worst
    /// lose a send, never duplicate one.
    pub async fn run_sweep(&self) -> Result<SweepOutcome, ServiceError> {
        let mut outcome = SweepOutcome::default();

        outcome.skipped = self.db_client.skip_overdue_reminders().await?;

        let claimed = self.db_client.claim_due_reminders(SWEEP_BATCH_SIZE).await?;

        for reminder in claimed {
            match self.dispatch(&reminder).await {
                Ok(()) => outcome.sent += 1,
                Err(err) => {
                    outcome.failed += 1;
                    tracing::error!(
                        "Failed to dispatch reminder {} ({}): {}",
                        reminder.id,
                        reminder.reminder_type.to_str(),
                        err
                    );
                    self.db_client
                        .record_reminder_error(reminder.id, &err.to_string())
                        .await?;
                }
            }
        }

        Ok(outcome)
    }

    async fn dispatch(&self, reminder: &EventReminder) -> Result<(), ServiceError> {
        let context = self
            .db_client
            .get_reminder_context(reminder.event_id, reminder.user_id)
            .await?
            .ok_or(ServiceError::EventNotFound(reminder.event_id))?;

        send_event_reminder_email(
            &self.env,
            &context.user_email,
            &context.user_name,
            &context.title,
            context.location.as_deref(),
            context.start_time,
            reminder.reminder_type,
        )
        .await
        .map_err(|e| ServiceError::Mail(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_canonical_times() {
        let start = instant("2025-03-10T15:30:00Z");

        assert_eq!(
            canonical_reminder_time(ReminderType::OneDayBefore, start),
            instant("2025-03-09T15:30:00Z")
        );
        assert_eq!(
            canonical_reminder_time(ReminderType::SameDayMorning, start),
            instant("2025-03-10T09:00:00Z")
        );
        assert_eq!(
            canonical_reminder_time(ReminderType::OneHourBefore, start),
            instant("2025-03-10T14:30:00Z")
        );
    }

    #[test]
    fn test_same_day_morning_ignores_event_hour() {
        let late_event = instant("2025-03-10T23:45:00Z");
        assert_eq!(
            canonical_reminder_time(ReminderType::SameDayMorning, late_event),
            instant("2025-03-10T09:00:00Z")
        );
    }

    #[test]
    fn test_future_reminder_starts_pending() {
        let now = instant("2025-03-09T08:00:00Z");
        let start = instant("2025-03-10T15:30:00Z");
        let scheduled = canonical_reminder_time(ReminderType::OneDayBefore, start);

        assert_eq!(initial_status(scheduled, start, now), ReminderStatus::Pending);
    }

    #[test]
    fn test_past_reminder_is_skipped_at_scheduling() {
        // Event created only 30 minutes ahead: every canonical time has
        // already gone by.
        let now = instant("2025-03-10T15:00:00Z");
        let start = instant("2025-03-10T15:30:00Z");

        for reminder_type in ReminderType::ALL {
            let scheduled = canonical_reminder_time(reminder_type, start);
            assert_eq!(
                initial_status(scheduled, start, now),
                ReminderStatus::Skipped,
                "{} should be skipped",
                reminder_type.to_str()
            );
        }
    }

    #[test]
    fn test_morning_reminder_after_early_start_is_skipped() {
        // Event at 08:00 means the 09:00 morning reminder would land after
        // the event has begun.
        let now = instant("2025-03-01T12:00:00Z");
        let start = instant("2025-03-10T08:00:00Z");
        let scheduled = canonical_reminder_time(ReminderType::SameDayMorning, start);

        assert_eq!(initial_status(scheduled, start, now), ReminderStatus::Skipped);
    }

    #[test]
    fn test_reminder_at_event_start_is_skipped() {
        let now = instant("2025-03-01T12:00:00Z");
        let start = instant("2025-03-10T09:00:00Z");
        let scheduled = canonical_reminder_time(ReminderType::SameDayMorning, start);

        assert_eq!(scheduled, start);
        assert_eq!(initial_status(scheduled, start, now), ReminderStatus::Skipped);
    }

    #[tokio::test]
    async fn reminder_service_compiles() {
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/fortunest").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let env = Config {
            database_url: "postgres://localhost/fortunest".to_string(),
            port: 8000,
            smtp_host: "localhost".to_string(),
            smtp_username: "".to_string(),
            smtp_password: "".to_string(),
            from_email: "noreply@fortunest.com".to_string(),
            lead_statuses: vec!["new".to_string()],
            commission_rate_bps: 250,
            reminder_sweep_secs: 60,
            allowed_origins: vec![],
        };
        let svc = ReminderService::new(db_client, env);

        let _ = svc.run_sweep();
    }
}
