//! Custom field validators used by `#[validate(custom(...))]`.

use std::borrow::Cow;

use chrono::{NaiveDate, Utc};
use validator::{ValidateEmail, ValidateUrl, ValidationError};

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Absolute `http(s)` URL.
pub fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let has_scheme = value.starts_with("http://") || value.starts_with("https://");
    if has_scheme && value.len() <= 2048 && value.validate_url() {
        Ok(())
    } else {
        Err(error("url", "must be a valid http(s) URL"))
    }
}

/// Image URL on a content row. Blank is accepted and clears the column.
pub fn validate_image_url(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    validate_http_url(value)
}

/// Optional contact email on a content row. Blank clears it.
pub fn validate_optional_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(error("email", "must be a valid email address"))
    }
}

/// Required text that is not only whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "must not be blank"))
    } else {
        Ok(())
    }
}

/// Thai national ID: exactly 13 digits.
pub fn validate_national_id(value: &str) -> Result<(), ValidationError> {
    if value.len() == 13 && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(error("national_id", "must be exactly 13 digits"))
    }
}

/// Phone number of 9 or 10 digits. Dashes and spaces are ignored.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let mut digits = 0;
    for c in value.chars() {
        match c {
            '0'..='9' => digits += 1,
            '-' | ' ' => {}
            _ => return Err(error("phone", "must contain only digits")),
        }
    }

    if (9..=10).contains(&digits) {
        Ok(())
    } else {
        Err(error("phone", "must be 9 to 10 digits"))
    }
}

/// Optional phone on a content row. Blank clears it.
pub fn validate_optional_phone(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    validate_phone(value)
}

pub fn validate_not_future(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value > Utc::now().date_naive() {
        Err(error("future_date", "must not be in the future"))
    } else {
        Ok(())
    }
}

/// Settings key: `^[a-z][a-z0-9_]{0,63}$`.
pub fn validate_setting_key(value: &str) -> Result<(), ValidationError> {
    let mut chars = value.chars();
    let valid = value.len() <= 64
        && chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(error(
            "setting_key",
            "must start with a lowercase letter and contain only a-z, 0-9 and _ (max 64)",
        ))
    }
}

/// Storage folder name: `^[a-z0-9_-]{1,32}$`.
pub fn validate_folder_name(value: &str) -> Result<(), ValidationError> {
    let valid = (1..=32).contains(&value.len())
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(error(
            "folder",
            "must be 1-32 characters of a-z, 0-9, _ or -",
        ))
    }
}

/// Short list of bullet points (curriculum highlights).
pub fn validate_text_list(values: &[String]) -> Result<(), ValidationError> {
    if values.len() > 20 {
        return Err(error("too_many", "must have at most 20 entries"));
    }
    if values.iter().any(|v| v.trim().is_empty() || v.len() > 200) {
        return Err(error(
            "entry",
            "entries must be non-blank and at most 200 characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_national_id() {
        assert!(validate_national_id("1234567890123").is_ok());
        assert!(validate_national_id("123456789012").is_err());
        assert!(validate_national_id("12345678901234").is_err());
        assert!(validate_national_id("12345678901a3").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("0812345678").is_ok());
        assert!(validate_phone("081-234-5678").is_ok());
        assert!(validate_phone("021234567").is_ok());
        assert!(validate_phone("02123456").is_err());
        assert!(validate_phone("08123456789").is_err());
        assert!(validate_phone("+66812345678").is_err());
    }

    #[test]
    fn test_not_future() {
        let today = Utc::now().date_naive();
        assert!(validate_not_future(&today).is_ok());
        assert!(validate_not_future(&(today - Duration::days(3650))).is_ok());
        assert!(validate_not_future(&(today + Duration::days(1))).is_err());
    }

    #[test]
    fn test_urls() {
        assert!(validate_http_url("https://facebook.com/school").is_ok());
        assert!(validate_http_url("ftp://example.com/file").is_err());
        assert!(validate_http_url("not a url").is_err());
        assert!(validate_image_url("").is_ok());
        assert!(validate_image_url("http://localhost:3000/files/news/a.png").is_ok());
        assert!(validate_image_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_setting_key() {
        assert!(validate_setting_key("school_name").is_ok());
        assert!(validate_setting_key("stat_students_2024").is_ok());
        assert!(validate_setting_key("School").is_err());
        assert!(validate_setting_key("1st").is_err());
        assert!(validate_setting_key("").is_err());
        assert!(validate_setting_key(&"a".repeat(65)).is_err());
        assert!(validate_setting_key("bad-key").is_err());
    }

    #[test]
    fn test_folder_name() {
        assert!(validate_folder_name("news").is_ok());
        assert!(validate_folder_name("gallery-2024_a").is_ok());
        assert!(validate_folder_name("").is_err());
        assert!(validate_folder_name("../etc").is_err());
        assert!(validate_folder_name("News").is_err());
        assert!(validate_folder_name(&"a".repeat(33)).is_err());
    }

    #[test]
    fn test_optional_email() {
        assert!(validate_optional_email("").is_ok());
        assert!(validate_optional_email("teacher@school.ac.th").is_ok());
        assert!(validate_optional_email("nope").is_err());
    }
}
