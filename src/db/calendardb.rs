// db/calendardb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::{page_offset, DBClient};
use crate::dtos::calendardtos::{CreateEventDto, UpdateEventDto};
use crate::models::calendarmodel::{
    CalendarEvent, EventReminder, ReminderContext, ReminderStatus, ReminderType,
};

#[derive(Debug, Default, Clone)]
pub struct EventFilters {
    pub user_id: Option<Uuid>,
    // UTC day boundaries, half-open
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait CalendarExt {
    async fn save_event(&self, data: &CreateEventDto) -> Result<CalendarEvent, sqlx::Error>;

    async fn get_event(&self, event_id: Uuid) -> Result<Option<CalendarEvent>, sqlx::Error>;

    async fn get_events(
        &self,
        filters: &EventFilters,
        page: u32,
        limit: usize,
    ) -> Result<Vec<CalendarEvent>, sqlx::Error>;

    async fn get_event_count(&self, filters: &EventFilters) -> Result<i64, sqlx::Error>;

    async fn update_event(
        &self,
        event_id: Uuid,
        data: &UpdateEventDto,
    ) -> Result<Option<CalendarEvent>, sqlx::Error>;

    /// Reminder rows cascade with the event.
    async fn delete_event(&self, event_id: Uuid) -> Result<Option<CalendarEvent>, sqlx::Error>;

    async fn insert_reminder(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        reminder_type: ReminderType,
        scheduled_at: DateTime<Utc>,
        status: ReminderStatus,
    ) -> Result<Option<EventReminder>, sqlx::Error>;

    /// Drops rows that have not fired yet so a rescheduled event gets a
    /// fresh set. Sent rows stay, an email cannot be unsent.
    async fn delete_unsent_reminders(&self, event_id: Uuid) -> Result<u64, sqlx::Error>;

    async fn get_event_reminders(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<EventReminder>, sqlx::Error>;

    /// Marks pending reminders of already-started events as skipped.
    async fn skip_overdue_reminders(&self) -> Result<u64, sqlx::Error>;

    /// Atomically claims due pending reminders by flipping them to sent.
    /// A row can only be claimed once, concurrent sweeps see SKIP LOCKED.
    async fn claim_due_reminders(&self, limit: i64) -> Result<Vec<EventReminder>, sqlx::Error>;

    async fn record_reminder_error(
        &self,
        reminder_id: Uuid,
        error: &str,
    ) -> Result<(), sqlx::Error>;

    async fn get_reminder_context(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ReminderContext>, sqlx::Error>;
}

#[async_trait]
impl CalendarExt for DBClient {
    async fn save_event(&self, data: &CreateEventDto) -> Result<CalendarEvent, sqlx::Error> {
        let event = sqlx::query_as::<_, CalendarEvent>(
            r#"
            INSERT INTO calendar_events
                (title, description, location, start_time, end_time,
                 user_id, lead_id, property_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.location)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.user_id)
        .bind(data.lead_id)
        .bind(data.property_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    async fn get_event(&self, event_id: Uuid) -> Result<Option<CalendarEvent>, sqlx::Error> {
        let event =
            sqlx::query_as::<_, CalendarEvent>(r#"SELECT * FROM calendar_events WHERE id = $1"#)
                .bind(event_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(event)
    }

    async fn get_events(
        &self,
        filters: &EventFilters,
        page: u32,
        limit: usize,
    ) -> Result<Vec<CalendarEvent>, sqlx::Error> {
        let offset = page_offset(page, limit);

        let events = sqlx::query_as::<_, CalendarEvent>(
            r#"
            SELECT * FROM calendar_events
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::timestamptz IS NULL OR start_time >= $2)
              AND ($3::timestamptz IS NULL OR start_time < $3)
            ORDER BY start_time
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filters.user_id)
        .bind(filters.from)
        .bind(filters.until)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn get_event_count(&self, filters: &EventFilters) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM calendar_events
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::timestamptz IS NULL OR start_time >= $2)
              AND ($3::timestamptz IS NULL OR start_time < $3)
            "#,
        )
        .bind(filters.user_id)
        .bind(filters.from)
        .bind(filters.until)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn update_event(
        &self,
        event_id: Uuid,
        data: &UpdateEventDto,
    ) -> Result<Option<CalendarEvent>, sqlx::Error> {
        let event = sqlx::query_as::<_, CalendarEvent>(
            r#"
            UPDATE calendar_events SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                location = COALESCE($3, location),
                start_time = COALESCE($4, start_time),
                end_time = COALESCE($5, end_time),
                lead_id = COALESCE($6, lead_id),
                property_id = COALESCE($7, property_id),
                updated_at = NOW()
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.location)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.lead_id)
        .bind(data.property_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn delete_event(&self, event_id: Uuid) -> Result<Option<CalendarEvent>, sqlx::Error> {
        let event = sqlx::query_as::<_, CalendarEvent>(
            r#"DELETE FROM calendar_events WHERE id = $1 RETURNING *"#,
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn insert_reminder(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        reminder_type: ReminderType,
        scheduled_at: DateTime<Utc>,
        status: ReminderStatus,
    ) -> Result<Option<EventReminder>, sqlx::Error> {
        // DO NOTHING keeps an already-sent row for the same (event, user, type)
        let reminder = sqlx::query_as::<_, EventReminder>(
            r#"
            INSERT INTO event_reminders (event_id, user_id, reminder_type, scheduled_at, status)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (event_id, user_id, reminder_type) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(reminder_type)
        .bind(scheduled_at)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder)
    }

    async fn delete_unsent_reminders(&self, event_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"DELETE FROM event_reminders WHERE event_id = $1 AND status != 'sent'"#,
        )
        .bind(event_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn get_event_reminders(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<EventReminder>, sqlx::Error> {
        let reminders = sqlx::query_as::<_, EventReminder>(
            r#"
            SELECT * FROM event_reminders
            WHERE event_id = $1
            ORDER BY scheduled_at
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }

    async fn skip_overdue_reminders(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE event_reminders er
            SET status = 'skipped'
            FROM calendar_events e
            WHERE e.id = er.event_id
              AND er.status = 'pending'
              AND e.start_time <= NOW()
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn claim_due_reminders(&self, limit: i64) -> Result<Vec<EventReminder>, sqlx::Error> {
        let reminders = sqlx::query_as::<_, EventReminder>(
            r#"
            UPDATE event_reminders
            SET status = 'sent', sent_at = NOW()
            WHERE id IN (
                SELECT er.id
                FROM event_reminders er
                JOIN calendar_events e ON e.id = er.event_id
                WHERE er.status = 'pending'
                  AND er.scheduled_at <= NOW()
                  AND e.start_time > NOW()
                ORDER BY er.scheduled_at
                LIMIT $1
                FOR UPDATE OF er SKIP LOCKED
            )
              AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }

    async fn record_reminder_error(
        &self,
        reminder_id: Uuid,
        error: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(r#"UPDATE event_reminders SET last_error = $1 WHERE id = $2"#)
            .bind(error)
            .bind(reminder_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_reminder_context(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ReminderContext>, sqlx::Error> {
        let context = sqlx::query_as::<_, ReminderContext>(
            r#"
            SELECT e.id AS event_id, e.title, e.location, e.start_time,
                   u.name AS user_name, u.email AS user_email
            FROM calendar_events e
            JOIN users u ON u.id = $2
            WHERE e.id = $1
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(context)
    }
}
