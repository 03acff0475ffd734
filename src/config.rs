#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    // Email service configurations
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    // CRM behavior
    pub lead_statuses: Vec<String>,
    pub commission_rate_bps: i32,
    pub reminder_sweep_secs: u64,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid port number");

        // Email service configurations (with defaults)
        let smtp_host = std::env::var("SMTP_HOST")
            .unwrap_or_else(|_| "localhost".to_string());
        let smtp_username = std::env::var("SMTP_USERNAME")
            .unwrap_or_else(|_| "".to_string());
        let smtp_password = std::env::var("SMTP_PASSWORD")
            .unwrap_or_else(|_| "".to_string());
        let from_email = std::env::var("FROM_EMAIL")
            .unwrap_or_else(|_| "noreply@fortunest.com".to_string());

        // Lead statuses are configurable so operations can tune the pipeline
        // without a deploy
        let lead_statuses = std::env::var("LEAD_STATUSES")
            .unwrap_or_else(|_| {
                "new,contacted,qualified,viewing,negotiation,closed,lost".to_string()
            })
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let commission_rate_bps = std::env::var("COMMISSION_RATE_BPS")
            .unwrap_or_else(|_| "250".to_string())
            .parse::<i32>()
            .expect("COMMISSION_RATE_BPS must be an integer");

        let reminder_sweep_secs = std::env::var("REMINDER_SWEEP_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .expect("REMINDER_SWEEP_SECS must be an integer");

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Config {
            database_url,
            port,
            smtp_host,
            smtp_username,
            smtp_password,
            from_email,
            lead_statuses,
            commission_rate_bps,
            reminder_sweep_secs,
            allowed_origins,
        }
    }

    pub fn is_valid_lead_status(&self, status: &str) -> bool {
        self.lead_statuses.iter().any(|s| s == &status.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_status_validation() {
        let config = Config {
            database_url: "postgres://localhost/fortunest".to_string(),
            port: 8000,
            smtp_host: "localhost".to_string(),
            smtp_username: "".to_string(),
            smtp_password: "".to_string(),
            from_email: "noreply@fortunest.com".to_string(),
            lead_statuses: vec!["new".to_string(), "contacted".to_string()],
            commission_rate_bps: 250,
            reminder_sweep_secs: 60,
            allowed_origins: vec![],
        };

        assert!(config.is_valid_lead_status("new"));
        assert!(config.is_valid_lead_status("Contacted"));
        assert!(!config.is_valid_lead_status("archived"));
        assert!(!config.is_valid_lead_status(""));
    }
}
