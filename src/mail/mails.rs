use chrono::{DateTime, Utc};

use super::sendmail::send_email;
use crate::{config::Config, models::calendarmodel::ReminderType};

fn reminder_subject(reminder_type: ReminderType, event_title: &str) -> String {
    match reminder_type {
        ReminderType::OneDayBefore => format!("Reminder: {} is tomorrow", event_title),
        ReminderType::SameDayMorning => format!("Reminder: {} is today", event_title),
        ReminderType::OneHourBefore => format!("Reminder: {} starts in one hour", event_title),
    }
}

pub async fn send_event_reminder_email(
    config: &Config,
    to_email: &str,
    username: &str,
    event_title: &str,
    event_location: Option<&str>,
    event_start: DateTime<Utc>,
    reminder_type: ReminderType,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = reminder_subject(reminder_type, event_title);
    let template_path = "src/mail/templates/event-reminder.html";

    let placeholders = vec![
        ("{{username}}".to_string(), username.to_string()),
        ("{{event_title}}".to_string(), event_title.to_string()),
        (
            "{{event_time}}".to_string(),
            event_start.format("%Y-%m-%d %H:%M UTC").to_string(),
        ),
        (
            "{{event_location}}".to_string(),
            event_location.unwrap_or("Not specified").to_string(),
        ),
    ];

    send_email(config, to_email, &subject, template_path, &placeholders).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_subjects() {
        assert_eq!(
            reminder_subject(ReminderType::OneDayBefore, "Viewing at Lekki Phase 1"),
            "Reminder: Viewing at Lekki Phase 1 is tomorrow"
        );
        assert_eq!(
            reminder_subject(ReminderType::SameDayMorning, "Owner meeting"),
            "Reminder: Owner meeting is today"
        );
        assert_eq!(
            reminder_subject(ReminderType::OneHourBefore, "Owner meeting"),
            "Reminder: Owner meeting starts in one hour"
        );
    }
}
