//! Length section - checks password minimum length.

use super::SectionResult;
use crate::status::StatusCode;

/// Minimum password length.
pub const MIN_LENGTH: usize = 8;

/// Checks if the password meets the minimum length.
///
/// Length is counted in characters.
pub fn length_section(password: &str) -> SectionResult {
    if password.chars().count() < MIN_LENGTH {
        return Ok(Some(StatusCode::Short));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_section_very_short() {
        assert_eq!(length_section("abc").unwrap(), Some(StatusCode::Short));
        assert_eq!(length_section("").unwrap(), Some(StatusCode::Short));
    }

    #[test]
    fn test_length_section_too_short() {
        assert_eq!(length_section("Short1!").unwrap(), Some(StatusCode::Short));
    }

    #[test]
    fn test_length_section_exactly_minimum() {
        assert_eq!(length_section("12345678").unwrap(), None);
    }

    #[test]
    fn test_length_section_counts_characters() {
        // 7 characters, 14 bytes
        assert_eq!(length_section("ééééééé").unwrap(), Some(StatusCode::Short));
        assert_eq!(length_section("éééééééé").unwrap(), None);
    }
}
