//! Status codes reported by a password check.

use std::collections::BTreeSet;
use std::collections::btree_set;
use std::fmt;

/// The outcome categories of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusCode {
    /// Password is too short.
    Short,
    /// Not enough different characters.
    Different,
    /// All whitespace.
    Whitespace,
    /// Based on a dictionary word.
    Dictionary,
    /// Password is acceptable.
    Ok,
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusCode::Short => "Short",
            StatusCode::Different => "Different",
            StatusCode::Whitespace => "Whitespace",
            StatusCode::Dictionary => "Dictionary",
            StatusCode::Ok => "Ok",
        };
        f.write_str(name)
    }
}

/// The set of status codes found for a password.
///
/// Contains `Ok` exactly when it contains nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Findings(BTreeSet<StatusCode>);

impl Findings {
    pub(crate) fn insert(&mut self, code: StatusCode) {
        if code != StatusCode::Ok {
            self.0.remove(&StatusCode::Ok);
        }
        self.0.insert(code);
    }

    /// Marks the password acceptable if nothing was found.
    pub(crate) fn finish(mut self) -> Self {
        if self.0.is_empty() {
            self.0.insert(StatusCode::Ok);
        }
        self
    }

    pub fn contains(&self, code: StatusCode) -> bool {
        self.0.contains(&code)
    }

    pub fn is_ok(&self) -> bool {
        self.contains(StatusCode::Ok)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, StatusCode> {
        self.0.iter()
    }

    pub fn into_set(self) -> BTreeSet<StatusCode> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Findings {
    type Item = &'a StatusCode;
    type IntoIter = btree_set::Iter<'a, StatusCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Findings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, code) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_findings_finish_ok() {
        let findings = Findings::default().finish();
        assert!(findings.is_ok());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings.to_string(), "Ok");
    }

    #[test]
    fn test_findings_are_a_set() {
        let mut findings = Findings::default();
        findings.insert(StatusCode::Short);
        findings.insert(StatusCode::Short);
        findings.insert(StatusCode::Dictionary);
        let findings = findings.finish();

        assert_eq!(findings.len(), 2);
        assert!(!findings.is_ok());
        assert_eq!(findings.to_string(), "Short, Dictionary");
    }

    #[test]
    fn test_ok_is_exclusive() {
        let mut findings = Findings::default().finish();
        findings.insert(StatusCode::Different);
        assert!(!findings.is_ok());
        assert_eq!(
            findings.into_set().into_iter().collect::<Vec<_>>(),
            vec![StatusCode::Different]
        );
    }
}
