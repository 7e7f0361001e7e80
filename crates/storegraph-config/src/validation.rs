//! Validation utilities and regex patterns

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex pattern for validating time-of-day strings (e.g., 15:00, 09:30)
pub static TIME_OF_DAY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("Invalid time-of-day regex pattern")
});

/// Validate an IANA timezone name (e.g., "Asia/Kolkata", "UTC")
pub fn validate_timezone(timezone: &str) -> Result<(), ValidationError> {
    if timezone.is_empty() {
        return Err(ValidationError::new("empty_timezone"));
    }

    match timezone.parse::<chrono_tz::Tz>() {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("invalid_timezone")),
    }
}

/// Validate a log level string
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_regex() {
        assert!(TIME_OF_DAY_REGEX.is_match("00:00"));
        assert!(TIME_OF_DAY_REGEX.is_match("15:00"));
        assert!(TIME_OF_DAY_REGEX.is_match("23:59"));
        assert!(TIME_OF_DAY_REGEX.is_match("09:30"));

        assert!(!TIME_OF_DAY_REGEX.is_match("24:00"));
        assert!(!TIME_OF_DAY_REGEX.is_match("15:60"));
        assert!(!TIME_OF_DAY_REGEX.is_match("3:00"));
        assert!(!TIME_OF_DAY_REGEX.is_match("15:00:00"));
        assert!(!TIME_OF_DAY_REGEX.is_match(""));
    }

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("UTC").is_ok());
        assert!(validate_timezone("Asia/Kolkata").is_ok());
        assert!(validate_timezone("Europe/London").is_ok());

        assert!(validate_timezone("").is_err());
        assert!(validate_timezone("Mars/Olympus_Mons").is_err());
        assert!(validate_timezone("not a timezone").is_err());
    }

    #[test]
    fn test_validate_log_level() {
        assert!(validate_log_level("info").is_ok());
        assert!(validate_log_level("trace").is_ok());
        assert!(validate_log_level("verbose").is_err());
        assert!(validate_log_level("").is_err());
    }
}
