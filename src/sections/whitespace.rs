//! Whitespace section - rejects passwords made only of whitespace.

use super::SectionResult;
use crate::status::StatusCode;

pub fn whitespace_section(password: &str) -> SectionResult {
    if password.trim().is_empty() {
        return Ok(Some(StatusCode::Whitespace));
    }
    Ok(None)
}
