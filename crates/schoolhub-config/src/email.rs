use std::env;

use crate::env_or;

#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
    /// Inbox that receives contact-form and application notifications.
    pub notify_email: Option<String>,
    pub frontend_url: String,
}

impl EmailConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: env::var("SMTP_ENABLED")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: env_or("SMTP_PORT", 1025),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_email: env::var("FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@schoolhub.local".to_string()),
            from_name: env::var("FROM_NAME").unwrap_or_else(|_| "SchoolHub".to_string()),
            notify_email: env::var("NOTIFY_EMAIL").ok().filter(|v| !v.trim().is_empty()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        }
    }

    /// Mail goes out only when SMTP is enabled and someone is listening.
    pub fn notifications_enabled(&self) -> bool {
        self.enabled && self.notify_email.is_some()
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: "noreply@schoolhub.local".to_string(),
            from_name: "SchoolHub".to_string(),
            notify_email: None,
            frontend_url: "http://localhost:5173".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_notifications_off() {
        let config = EmailConfig::default();
        assert!(!config.notifications_enabled());

        let config = EmailConfig {
            enabled: true,
            notify_email: Some("office@school.ac.th".to_string()),
            ..EmailConfig::default()
        };
        assert!(config.notifications_enabled());
    }
}
