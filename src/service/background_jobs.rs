// service/background_jobs.rs
use std::sync::Arc;

use tokio::time::{interval, Duration};

use crate::AppState;

/// Start the background sweep that skips stale calendar reminders and
/// dispatches the due ones by email.
pub async fn start_reminder_sweep_job(app_state: Arc<AppState>) {
    let mut interval = interval(Duration::from_secs(app_state.env.reminder_sweep_secs));

    loop {
        interval.tick().await;

        match app_state.reminder_service.run_sweep().await {
            Ok(outcome) => {
                if outcome.sent > 0 || outcome.skipped > 0 || outcome.failed > 0 {
                    tracing::info!(
                        "Reminder sweep completed: {} sent, {} skipped, {} failed",
                        outcome.sent,
                        outcome.skipped,
                        outcome.failed
                    );
                }
            }
            Err(e) => tracing::error!("Reminder sweep failed: {}", e),
        }
    }
}
