//! Input validation utilities

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Validate a user's display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name must not be empty".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Enter a valid email".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Enter a valid email".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 5 {
        return Err("Password must have at least 5 characters".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate an event title
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title must not be empty".to_string());
    }

    Ok(())
}

/// Validate an event description
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.len() < 2 {
        return Err("Description must have at least 2 characters".to_string());
    }

    Ok(())
}

/// Validate an event location
pub fn validate_location(location: &str) -> Result<(), String> {
    if location.trim().is_empty() {
        return Err("Location must not be empty".to_string());
    }

    Ok(())
}

/// Parse an ISO 8601 timestamp, reporting the offending field on failure
///
/// `field` is the human-readable field name used in the error message, e.g.
/// "start date and time".
pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("Invalid {}", field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Ada Lovelace").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("user.name+tag@sub.example.co").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("12345").is_ok());
        assert!(validate_password("1234").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_event_fields() {
        assert!(validate_title("Rust meetup").is_ok());
        assert!(validate_title(" ").is_err());
        assert!(validate_description("ok").is_ok());
        assert!(validate_description("x").is_err());
        assert!(validate_location("Berlin").is_ok());
        assert!(validate_location("").is_err());
    }

    #[test]
    fn test_parse_datetime() {
        let parsed = parse_datetime("2025-01-01T10:00:00Z", "start date and time")
            .expect("Failed to parse timestamp");
        assert_eq!(parsed.to_rfc3339(), "2025-01-01T10:00:00+00:00");

        let err = parse_datetime("next tuesday", "start date and time").unwrap_err();
        assert_eq!(err, "Invalid start date and time");
    }
}
