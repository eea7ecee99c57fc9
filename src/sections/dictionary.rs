//! Dictionary section - checks if any de-obfuscated form of the password is
//! a dictionary word.

use super::SectionResult;
use crate::dictionary::Dictionary;
use crate::rules::{Mangled, RuleSet};
use crate::status::StatusCode;
use crate::store::BlockStore;

/// Applies every destructor rule to `password` and looks each surviving
/// candidate up in `dict`.
///
/// # Returns
/// - `Ok(Some(Dictionary))` on the first candidate found
/// - `Ok(None)` if no candidate is a dictionary word
pub fn dictionary_section<S: BlockStore>(
    dict: &Dictionary<S>,
    destructors: &RuleSet,
    password: &str,
) -> SectionResult {
    for rule in destructors {
        let Mangled::Applied(candidate) = rule.apply(password) else {
            continue;
        };
        if dict.find(&candidate)?.is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!("Dictionary hit via rule {:?}", rule.as_str());
            return Ok(Some(StatusCode::Dictionary));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Mode;
    use std::io::Cursor;

    fn dictionary(words: &[&str]) -> Dictionary<Cursor<Vec<u8>>> {
        let mut data = Cursor::new(Vec::new());
        let mut index = Cursor::new(Vec::new());
        {
            let dict = Dictionary::from_stores(Mode::Write, &mut data, &mut index, None)
                .expect("Failed to create dictionary");
            for w in words {
                dict.put(w).expect("Failed to put");
            }
            dict.close().expect("Failed to close");
        }
        Dictionary::from_stores(
            Mode::Read,
            Cursor::new(data.into_inner()),
            Cursor::new(index.into_inner()),
            None,
        )
        .expect("Failed to open dictionary")
    }

    #[test]
    fn test_dictionary_section_leetspeak_word() {
        let dict = dictionary(&["password", "qwerty"]);
        let rules = RuleSet::destructors().unwrap();
        let result = dictionary_section(&dict, rules, "p4$$w0rd");
        assert!(matches!(result, Ok(Some(StatusCode::Dictionary))));
    }

    #[test]
    fn test_dictionary_section_trailing_junk() {
        let dict = dictionary(&["password", "qwerty"]);
        let rules = RuleSet::destructors().unwrap();
        let result = dictionary_section(&dict, rules, "qwerty12");
        assert!(matches!(result, Ok(Some(StatusCode::Dictionary))));
    }

    #[test]
    fn test_dictionary_section_strong_password() {
        let dict = dictionary(&["password", "qwerty"]);
        let rules = RuleSet::destructors().unwrap();
        let result = dictionary_section(&dict, rules, "CorrectHorseBatteryStaple!123");
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_dictionary_section_custom_rules() {
        let dict = dictionary(&["secret"]);
        let rules = RuleSet::parse(["r"]).unwrap();
        assert!(matches!(
            dictionary_section(&dict, &rules, "terces"),
            Ok(Some(StatusCode::Dictionary))
        ));
        assert!(matches!(dictionary_section(&dict, &rules, "secret"), Ok(None)));
    }
}
