use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use schoolhub_config::EmailConfig;
use schoolhub_core::AppError;
use schoolhub_models::admissions::Admission;
use schoolhub_models::contact::ContactMessage;
use tracing::{instrument, warn};

use crate::utils::html::{escape_html, escape_multiline};

/// Sends notification mail to the school office.
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Notifies the office about a new contact message. Never fails the
    /// caller: delivery problems are logged.
    pub async fn notify_contact_message(&self, message: &ContactMessage) {
        let Some(to) = self.office_address() else {
            return;
        };

        let subject = format!("[Contact] {}", message.subject);
        let text_body = format!(
            "New message from {} <{}>\nPhone: {}\n\n{}\n\nReply from the admin panel: {}/admin/messages",
            message.name,
            message.email,
            message.phone.as_deref().unwrap_or("-"),
            message.message,
            self.config.frontend_url
        );
        let html_body = self.contact_template(message);

        if let Err(e) = self.send_email(&to, &subject, &text_body, &html_body).await {
            warn!(error = %e.error, message_id = %message.id, "Contact notification not sent");
        }
    }

    /// Notifies the office about a submitted application.
    pub async fn notify_new_application(&self, admission: &Admission) {
        let Some(to) = self.office_address() else {
            return;
        };

        let subject = format!("[Admissions] New application {}", admission.reference_number);
        let text_body = format!(
            "Reference: {}\nStudent: {}\nGrade: {}\nParent: {} ({})\n\nReview: {}/admin/admissions",
            admission.reference_number,
            admission.student_full_name(),
            admission.applying_grade,
            admission.parent_name,
            admission.parent_phone,
            self.config.frontend_url
        );
        let html_body = self.application_template(admission);

        if let Err(e) = self.send_email(&to, &subject, &text_body, &html_body).await {
            warn!(
                error = %e.error,
                reference_number = %admission.reference_number,
                "Application notification not sent"
            );
        }
    }

    fn office_address(&self) -> Option<String> {
        if !self.config.notifications_enabled() {
            return None;
        }
        self.config.notify_email.clone()
    }

    #[instrument(skip(self, html_body, text_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal_error(format!("Invalid from email: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal_error(format!("Invalid to email: {}", e)))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal_error(format!("Failed to build email: {}", e)))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal_error(format!("Failed to create SMTP relay: {}", e))
                })?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal_error(format!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal_error(format!("Failed to send email: {}", e)))?;

        Ok(())
    }

    fn contact_template(&self, message: &ContactMessage) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<body style="font-family: sans-serif; color: #1f2937;">
  <h2>New contact message</h2>
  <p><strong>From:</strong> {name} &lt;{email}&gt;</p>
  <p><strong>Phone:</strong> {phone}</p>
  <p><strong>Subject:</strong> {subject}</p>
  <div style="padding: 12px; background: #f3f4f6; border-radius: 6px;">{body}</div>
  <p><a href="{url}/admin/messages">Open in admin panel</a></p>
</body>
</html>"#,
            name = escape_html(&message.name),
            email = escape_html(&message.email),
            phone = escape_html(message.phone.as_deref().unwrap_or("-")),
            subject = escape_html(&message.subject),
            body = escape_multiline(&message.message),
            url = escape_html(&self.config.frontend_url),
        )
    }

    fn application_template(&self, admission: &Admission) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<body style="font-family: sans-serif; color: #1f2937;">
  <h2>New enrollment application</h2>
  <p><strong>Reference:</strong> {reference}</p>
  <p><strong>Student:</strong> {student}</p>
  <p><strong>Applying for:</strong> {grade}</p>
  <p><strong>Parent:</strong> {parent} ({phone})</p>
  <p><a href="{url}/admin/admissions">Review in admin panel</a></p>
</body>
</html>"#,
            reference = escape_html(&admission.reference_number),
            student = escape_html(&admission.student_full_name()),
            grade = escape_html(&admission.applying_grade),
            parent = escape_html(&admission.parent_name),
            phone = escape_html(&admission.parent_phone),
            url = escape_html(&self.config.frontend_url),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn message() -> ContactMessage {
        ContactMessage {
            id: Uuid::new_v4(),
            name: "<b>Parent</b>".to_string(),
            email: "parent@example.com".to_string(),
            phone: None,
            subject: "Hello".to_string(),
            message: "Line 1\nLine 2".to_string(),
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_contact_template_escapes_user_input() {
        let service = EmailService::new(EmailConfig::default());
        let html = service.contact_template(&message());
        assert!(html.contains("&lt;b&gt;Parent&lt;/b&gt;"));
        assert!(!html.contains("<b>Parent</b>"));
        assert!(html.contains("Line 1<br>Line 2"));
    }

    #[test]
    fn test_no_office_address_when_disabled() {
        let service = EmailService::new(EmailConfig {
            enabled: false,
            notify_email: Some("office@school.ac.th".to_string()),
            ..EmailConfig::default()
        });
        assert!(service.office_address().is_none());
    }
}
