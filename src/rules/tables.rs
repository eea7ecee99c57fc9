//! Rule sets, including the built-in destructor and constructor tables.
//!
//! The built-in tables ship as text files under `assets/` and are compiled
//! once, on first use.

use std::slice::Iter;
use std::sync::LazyLock;

use super::{Rule, RuleError};

static DESTRUCTORS: LazyLock<Result<RuleSet, RuleError>> = LazyLock::new(|| {
    let rules = RuleSet::from_lines(include_str!("../../assets/destructors.rules"));

    #[cfg(feature = "tracing")]
    {
        match &rules {
            Ok(set) => tracing::info!("Destructor rules loaded: {}", set.len()),
            Err(e) => tracing::error!("Destructor rules FAILED to load: {}", e),
        }
    }

    rules
});

static CONSTRUCTORS: LazyLock<Result<RuleSet, RuleError>> =
    LazyLock::new(|| RuleSet::from_lines(include_str!("../../assets/constructors.rules")));

/// An ordered list of compiled rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn parse<I, S>(rules: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = rules
            .into_iter()
            .map(|r| Rule::parse(r.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Parses one rule per line, skipping blank lines and `#` comments.
    pub fn from_lines(text: &str) -> Result<Self, RuleError> {
        Self::parse(
            text.lines()
                .map(|line| line.trim_end_matches('\r'))
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Rules that undo common obfuscations, turning a password back into
    /// a candidate dictionary word.
    pub fn destructors() -> Result<&'static RuleSet, RuleError> {
        DESTRUCTORS.as_ref().map_err(Clone::clone)
    }

    /// Rules that derive variants from a dictionary word.
    pub fn constructors() -> Result<&'static RuleSet, RuleError> {
        CONSTRUCTORS.as_ref().map_err(Clone::clone)
    }

    pub fn iter(&self) -> Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
