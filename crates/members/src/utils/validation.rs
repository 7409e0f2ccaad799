//! Input validation utilities.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());

const MAX_DISPLAY_NAME_CHARS: usize = 50;
const MAX_EMAIL_CHARS: usize = 255;
const MAX_PASSWORD_CHARS: usize = 128;
const MAX_ATTRIBUTE_CHARS: usize = 32;

/// Identifiers are positive numbers such as student numbers.
pub fn validate_identifier(identifier: i64) -> Result<(), String> {
    if identifier <= 0 {
        return Err("Identifier must be a positive number".to_string());
    }
    Ok(())
}

pub fn validate_display_name(display_name: &str) -> Result<(), String> {
    if display_name.trim().is_empty() {
        return Err("Display name cannot be empty".to_string());
    }

    if display_name.chars().count() > MAX_DISPLAY_NAME_CHARS {
        return Err(format!(
            "Display name must be at most {MAX_DISPLAY_NAME_CHARS} characters long"
        ));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.len() > MAX_EMAIL_CHARS {
        return Err("Email too long".to_string());
    }

    let Some(pattern) = EMAIL_PATTERN.as_ref() else {
        return Err("Email pattern unavailable".to_string());
    };

    if !pattern.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Only presence and an upper bound are enforced; strength rules are the caller's policy.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }

    if password.chars().count() > MAX_PASSWORD_CHARS {
        return Err(format!(
            "Password must be at most {MAX_PASSWORD_CHARS} characters long"
        ));
    }

    Ok(())
}

/// Free-form descriptive attributes (sex, grade).
pub fn validate_attribute(field: &str, value: &str) -> Result<(), String> {
    if value.chars().count() > MAX_ATTRIBUTE_CHARS {
        return Err(format!(
            "{field} must be at most {MAX_ATTRIBUTE_CHARS} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier(1001).is_ok());
        assert!(validate_identifier(0).is_err());
        assert!(validate_identifier(-5).is_err());
    }

    #[test]
    fn test_validate_display_name() {
        assert!(validate_display_name("Alice").is_ok());
        assert!(validate_display_name("王小明").is_ok());
        assert!(validate_display_name("   ").is_err());
        assert!(validate_display_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@school.example").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email(&format!("{}@example.com", "a".repeat(250))).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("pw").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_attribute() {
        assert!(validate_attribute("grade", "2024").is_ok());
        assert!(validate_attribute("grade", "").is_ok());
        assert!(validate_attribute("sex", &"x".repeat(33)).is_err());
    }
}
