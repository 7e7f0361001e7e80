//! Utility functions used across the storegraph workspace

use crate::Result;

/// Count of characters (not bytes) in a string
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Validate that a string is not empty after trimming
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(crate::StoregraphError::new(format!(
            "{} cannot be empty",
            field_name
        )))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len() {
        assert_eq!(char_len("app"), 3);
        assert_eq!(char_len(""), 0);
        // multi-byte characters count once
        assert_eq!(char_len("写真"), 2);
    }

    #[test]
    fn test_validate_non_empty() {
        assert!(validate_non_empty("test", "field").is_ok());
        assert!(validate_non_empty("", "field").is_err());
        assert!(validate_non_empty("   ", "field").is_err());
    }
}
