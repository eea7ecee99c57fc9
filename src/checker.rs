//! Password checker - main evaluation logic.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

#[cfg(feature = "async")]
use std::sync::Arc;
#[cfg(feature = "async")]
use tokio::sync::mpsc;

use crate::config;
use crate::dictionary::{Dictionary, DictionaryError, DictionaryPaths};
use crate::rules::{Mangled, RuleError, RuleSet, reverse};
use crate::sections::{
    SectionResult, character_variety_section, dictionary_section, length_section,
    whitespace_section,
};
use crate::status::Findings;
use crate::store::BlockStore;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error("Password check task failed: {0}")]
    Task(String),
}

/// Checks passwords against a packed dictionary.
///
/// Uses the built-in destructor and constructor rules unless others are
/// supplied with [`PasswordChecker::with_rules`].
#[derive(Debug, Clone)]
pub struct PasswordChecker {
    paths: DictionaryPaths,
    destructors: Option<RuleSet>,
    constructors: Option<RuleSet>,
}

impl PasswordChecker {
    pub fn new(paths: DictionaryPaths) -> Self {
        Self {
            paths,
            destructors: None,
            constructors: None,
        }
    }

    /// Checker for the dictionary named by `PWD_DICTIONARY_PATH`.
    pub fn from_env() -> Self {
        Self::new(config::dictionary_paths())
    }

    pub fn with_rules(mut self, destructors: RuleSet, constructors: RuleSet) -> Self {
        self.destructors = Some(destructors);
        self.constructors = Some(constructors);
        self
    }

    pub fn paths(&self) -> &DictionaryPaths {
        &self.paths
    }

    fn destructors(&self) -> Result<&RuleSet, RuleError> {
        match &self.destructors {
            Some(rules) => Ok(rules),
            None => RuleSet::destructors(),
        }
    }

    fn constructors(&self) -> Result<&RuleSet, RuleError> {
        match &self.constructors {
            Some(rules) => Ok(rules),
            None => RuleSet::constructors(),
        }
    }

    /// Checks a password, opening the dictionary for the duration of the check.
    pub fn check(&self, password: &SecretString) -> Result<Findings, CheckError> {
        let dict = Dictionary::open(&self.paths)?;
        let findings = self.check_with(&dict, password);
        dict.close()?;
        findings
    }

    /// Checks a password against an already opened dictionary.
    pub fn check_with<S: BlockStore>(
        &self,
        dict: &Dictionary<S>,
        password: &SecretString,
    ) -> Result<Findings, CheckError> {
        let mut findings = Findings::default();
        let pwd = password.expose_secret();

        // Orchestrator: execute heuristic sections in sequence
        let sections: [(&str, fn(&str) -> SectionResult); 3] = [
            ("length", length_section),
            ("variety", character_variety_section),
            ("whitespace", whitespace_section),
        ];
        for (_section_name, section_fn) in sections {
            match section_fn(pwd) {
                Ok(Some(code)) => findings.insert(code),
                Ok(None) => {}
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Fatal error in password check section {}: {}", _section_name, e);
                    return Err(e);
                }
            }
        }

        // Dictionary lookups use the trimmed password, forwards then backwards.
        let destructors = self.destructors()?;
        let trimmed = pwd.trim();
        for candidate in [trimmed.to_string(), reverse(trimmed)] {
            if let Some(code) = dictionary_section(dict, destructors, &candidate)? {
                findings.insert(code);
                break;
            }
        }

        let findings = findings.finish();

        #[cfg(feature = "tracing")]
        tracing::info!("Password check complete: {}", findings);

        Ok(findings)
    }

    /// True if a destructor turns `password` (or its reversal) into
    /// `raw_word`, or a constructor applied to `raw_word` yields `raw_word`
    /// itself.
    pub fn matches(&self, raw_word: &str, password: &SecretString) -> Result<bool, RuleError> {
        let pwd = password.expose_secret();
        for rule in self.destructors()? {
            let Mangled::Applied(mangled) = rule.apply(pwd) else {
                continue;
            };
            if mangled == raw_word || reverse(&mangled) == raw_word {
                return Ok(true);
            }
        }
        // Compares against the raw word, not the password.
        for rule in self.constructors()? {
            if rule.apply(raw_word) == Mangled::Applied(raw_word.to_string()) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Runs a check on the blocking pool and sends the outcome via channel.
///
/// A check task that panics or is cancelled is reported as
/// [`CheckError::Task`].
#[cfg(feature = "async")]
pub async fn check_password_tx(
    checker: Arc<PasswordChecker>,
    password: SecretString,
    tx: mpsc::Sender<Result<Findings, CheckError>>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("password check is about to start...");

    let outcome = tokio::task::spawn_blocking(move || checker.check(&password)).await;
    let result = joined(outcome);

    if let Err(_e) = tx.send(result).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password check result: {}", _e);
    }
}

#[cfg(feature = "async")]
fn joined(
    outcome: Result<Result<Findings, CheckError>, tokio::task::JoinError>,
) -> Result<Findings, CheckError> {
    outcome.unwrap_or_else(|e| {
        #[cfg(feature = "tracing")]
        tracing::error!("Password check task failed: {}", e);
        Err(CheckError::Task(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusCode;
    use tempfile::TempDir;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn setup_dictionary(words: &[&str]) -> (TempDir, PasswordChecker) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let paths = DictionaryPaths::from_base(dir.path().join("words.pack"));
        let dict = Dictionary::create(&paths).expect("Failed to create dictionary");
        for w in words {
            dict.put(w).expect("Failed to put");
        }
        dict.close().expect("Failed to close");
        (dir, PasswordChecker::new(paths))
    }

    #[test]
    fn test_check_dictionary_word() {
        let (_dir, checker) = setup_dictionary(&["apple", "applesauce", "banana"]);
        let findings = checker.check(&secret("apple")).unwrap();

        assert!(findings.contains(StatusCode::Dictionary));
        assert!(findings.contains(StatusCode::Short));
        assert!(!findings.is_ok());
    }

    #[test]
    fn test_check_acceptable_password() {
        let (_dir, checker) = setup_dictionary(&["apple", "applesauce", "banana"]);
        let findings = checker.check(&secret("Xk9#qzM2")).unwrap();

        assert_eq!(findings.iter().copied().collect::<Vec<_>>(), vec![StatusCode::Ok]);
    }

    #[test]
    fn test_check_whitespace_password() {
        let (_dir, checker) = setup_dictionary(&["apple", "applesauce", "banana"]);
        let findings = checker.check(&secret("   ")).unwrap();

        assert!(findings.contains(StatusCode::Whitespace));
        assert!(findings.contains(StatusCode::Short));
        assert!(findings.contains(StatusCode::Different));
        assert!(!findings.is_ok());
    }

    #[test]
    fn test_check_reversed_word() {
        let (_dir, checker) = setup_dictionary(&["applesauce", "banana"]);
        let findings = checker.check(&secret("ecuaselppa")).unwrap();
        assert!(findings.contains(StatusCode::Dictionary));
    }

    #[test]
    fn test_check_obfuscated_word() {
        let (_dir, checker) = setup_dictionary(&["applesauce", "banana"]);
        let findings = checker.check(&secret("4ppl3$4uc3")).unwrap();
        assert!(findings.contains(StatusCode::Dictionary));
        assert!(!findings.contains(StatusCode::Short));
    }

    #[test]
    fn test_check_trims_before_lookup() {
        let (_dir, checker) = setup_dictionary(&["applesauce"]);
        let findings = checker.check(&secret("  applesauce  ")).unwrap();
        assert!(findings.contains(StatusCode::Dictionary));
        assert!(!findings.contains(StatusCode::Whitespace));
    }

    #[test]
    fn test_check_missing_dictionary() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let checker = PasswordChecker::new(DictionaryPaths::from_base(dir.path().join("none")));
        let result = checker.check(&secret("whatever"));
        assert!(matches!(result, Err(CheckError::Dictionary(DictionaryError::Io(_)))));
    }

    #[test]
    fn test_check_with_reuses_dictionary() {
        let (_dir, checker) = setup_dictionary(&["apple", "applesauce", "banana"]);
        let dict = Dictionary::open(checker.paths()).unwrap();
        for (pwd, expect_dictionary) in [("banana", true), ("Xk9#qzM2", false), ("b4n4n4", true)] {
            let findings = checker.check_with(&dict, &secret(pwd)).unwrap();
            assert_eq!(findings.contains(StatusCode::Dictionary), expect_dictionary, "{}", pwd);
        }
    }

    #[test]
    fn test_check_custom_rules() {
        let (_dir, checker) = setup_dictionary(&["banana"]);
        let checker = checker.with_rules(
            RuleSet::parse(["["]).unwrap(),
            RuleSet::parse([":"]).unwrap(),
        );
        let findings = checker.check(&secret("xbanana")).unwrap();
        assert!(findings.contains(StatusCode::Dictionary));
        // without the noop rule the raw word itself is never looked up
        let findings = checker.check(&secret("banana")).unwrap();
        assert!(!findings.contains(StatusCode::Dictionary));
    }

    #[test]
    fn test_matches_destructor() {
        let checker = PasswordChecker::new(DictionaryPaths::default())
            .with_rules(RuleSet::parse(["/$s$s/0s0o"]).unwrap(), RuleSet::default());
        assert!(checker.matches("password", &secret("pa$$w0rd")).unwrap());
        assert!(checker.matches("drowssap", &secret("pa$$w0rd")).unwrap());
        assert!(!checker.matches("passport", &secret("pa$$w0rd")).unwrap());
    }

    #[test]
    fn test_matches_constructor_self_comparison() {
        let checker = PasswordChecker::new(DictionaryPaths::default());
        // the noop constructor always reproduces a non-empty raw word
        assert!(checker.matches("anything", &secret("unrelated")).unwrap());
        assert!(!checker.matches("", &secret("abc")).unwrap());
    }
}
