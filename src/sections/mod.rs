//! Password check sections
//!
//! Each section looks at one weakness and reports at most one status code.

mod dictionary;
mod length;
mod variety;
mod whitespace;

pub use dictionary::dictionary_section;
pub use length::length_section;
pub use variety::character_variety_section;
pub use whitespace::whitespace_section;

use crate::checker::CheckError;
use crate::status::StatusCode;

/// Result type for section check functions.
/// - `Ok(Some(code))` - Section found a weakness
/// - `Ok(None)` - Section passed
/// - `Err(e)` - Fatal error (broken dictionary or rule table)
pub type SectionResult = Result<Option<StatusCode>, CheckError>;
