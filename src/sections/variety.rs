//! Character variety section - checks for enough different characters.

use std::collections::HashSet;

use super::SectionResult;
use crate::status::StatusCode;

/// Minimum number of different characters.
pub const MIN_DIFFERENT: usize = 5;

/// Checks if the password uses enough distinct characters.
pub fn character_variety_section(password: &str) -> SectionResult {
    let unique: HashSet<char> = password.chars().collect();
    if unique.len() < MIN_DIFFERENT {
        return Ok(Some(StatusCode::Different));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variety_section_repeated_chars() {
        assert_eq!(
            character_variety_section("aaaabbbb").unwrap(),
            Some(StatusCode::Different)
        );
    }

    #[test]
    fn test_variety_section_case_is_distinct() {
        assert_eq!(character_variety_section("aAbBc").unwrap(), None);
    }

    #[test]
    fn test_variety_section_boundary() {
        assert_eq!(
            character_variety_section("abcdabcd").unwrap(),
            Some(StatusCode::Different)
        );
        assert_eq!(character_variety_section("abcde").unwrap(), None);
    }

    #[test]
    fn test_variety_section_empty() {
        assert_eq!(
            character_variety_section("").unwrap(),
            Some(StatusCode::Different)
        );
    }
}
