//! Word mangling rules.
//!
//! A rule is a string of one-character commands, some followed by inline
//! arguments, applied left to right to a working copy of a word:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `:` | no-op |
//! | `r`, `f` | reverse |
//! | `u`, `l`, `c` | upper-case, lower-case, capitalize |
//! | `p` | pluralize |
//! | `d` | duplicate |
//! | `>n`, `<n` | reject unless longer than `n` / shorter than `n` |
//! | `^x`, `$x` | prepend / append `x` |
//! | `xnm` | extract `m` characters from position `n` |
//! | `onx`, `inx` | overstrike / insert `x` at position `n` |
//! | `@x` | purge every `x` |
//! | `sxy` | substitute `y` for every `x` |
//! | `/x`, `!x` | reject unless / if the word contains `x` |
//! | `=nx` | reject unless position `n` is `x` |
//! | `[`, `]` | delete the first character / the last two characters |
//! | `(x)y` | reject unless the word starts with `x` and ends with `y` |
//!
//! Numbers are single base-36 digits. Wherever a character `x` is matched
//! (not inserted), `?c` matches any character of class `c` instead; see
//! [`CharClass`].
//!
//! A rule that does not suit a word *rejects* it ([`Mangled::Rejected`]);
//! a rule that cannot be parsed is a [`RuleError`].

mod class;
mod tables;

pub use class::{CharClass, pattern_matches};
pub use tables::RuleSet;

use std::fmt;
use std::str::{Chars, FromStr};
use thiserror::Error;

const CLASS_PREFIX: char = '?';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("mangle: '{op}' missing argument in {rule:?}")]
    MissingArgument { op: char, rule: String },
    #[error("mangle: '{op}' weird argument {arg:?} in {rule:?}")]
    BadArgument { op: char, arg: char, rule: String },
    #[error("mangle: unknown class {class:?} in {rule:?}")]
    UnknownClass { class: char, rule: String },
    #[error("mangle: unknown command {op:?} in {rule:?}")]
    UnknownCommand { op: char, rule: String },
}

/// Outcome of applying a rule to a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mangled {
    Applied(String),
    Rejected,
}

impl Mangled {
    pub fn applied(self) -> Option<String> {
        match self {
            Mangled::Applied(s) => Some(s),
            Mangled::Rejected => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Mangled::Rejected)
    }
}

/// A single character test: a literal or a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cond {
    Literal(char),
    Class(CharClass),
}

impl Cond {
    pub fn matches(self, c: char) -> bool {
        match self {
            Cond::Literal(l) => l == c,
            Cond::Class(class) => class.matches(c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Noop,
    Reverse,
    Upper,
    Lower,
    Capitalize,
    Pluralize,
    Duplicate,
    RejectUnlessLonger(usize),
    RejectUnlessShorter(usize),
    Prepend(char),
    Append(char),
    Extract { start: usize, len: usize },
    Overstrike { pos: usize, with: char },
    Insert { pos: usize, with: char },
    Purge(Cond),
    Substitute { from: Cond, to: char },
    Require(Cond),
    Forbid(Cond),
    PositionIs { pos: usize, cond: Cond },
    DeleteFirst,
    DeleteLastTwo,
    FirstAndLast { first: Cond, last: Cond },
}

impl Op {
    /// Applies the command in place. `false` rejects the word.
    fn apply(self, s: &mut Vec<char>) -> bool {
        match self {
            Op::Noop => {}
            Op::Reverse => s.reverse(),
            Op::Upper => *s = s.iter().flat_map(|c| c.to_uppercase()).collect(),
            Op::Lower => *s = s.iter().flat_map(|c| c.to_lowercase()).collect(),
            Op::Capitalize => capitalize(s),
            Op::Pluralize => pluralize(s),
            Op::Duplicate => s.extend_from_within(..),
            Op::RejectUnlessLonger(n) => return s.len() > n,
            Op::RejectUnlessShorter(n) => return s.len() < n,
            Op::Prepend(c) => s.insert(0, c),
            Op::Append(c) => s.push(c),
            Op::Extract { start, len } => {
                if start + len > s.len() {
                    return false;
                }
                s.truncate(start + len);
                s.drain(..start);
            }
            Op::Overstrike { pos, with } => match s.get_mut(pos) {
                Some(c) => *c = with,
                None => return false,
            },
            Op::Insert { pos, with } => {
                if pos > s.len() {
                    return false;
                }
                s.insert(pos, with);
            }
            Op::Purge(cond) => s.retain(|&c| !cond.matches(c)),
            Op::Substitute { from, to } => {
                for c in s.iter_mut().filter(|c| from.matches(**c)) {
                    *c = to;
                }
            }
            Op::Require(cond) => return s.iter().any(|&c| cond.matches(c)),
            Op::Forbid(cond) => return !s.iter().any(|&c| cond.matches(c)),
            Op::PositionIs { pos, cond } => return s.get(pos).is_some_and(|&c| cond.matches(c)),
            Op::DeleteFirst => {
                if !s.is_empty() {
                    s.remove(0);
                }
            }
            Op::DeleteLastTwo => {
                if s.len() >= 2 {
                    s.truncate(s.len() - 2);
                }
            }
            Op::FirstAndLast { first, last } => {
                return s.first().is_some_and(|&c| first.matches(c))
                    && s.last().is_some_and(|&c| last.matches(c));
            }
        }
        true
    }
}

fn capitalize(s: &mut Vec<char>) {
    let mut chars = s.iter();
    let Some(head) = chars.next() else {
        return;
    };
    let capitalized = head
        .to_uppercase()
        .chain(chars.flat_map(|c| c.to_lowercase()))
        .collect();
    *s = capitalized;
}

fn ends_with(s: &[char], suffix: &str) -> bool {
    let n = suffix.chars().count();
    s.len() > n && s[s.len() - n..].iter().copied().eq(suffix.chars())
}

/// English plural heuristics: bench -> benches, gully -> gullies,
/// alloy -> alloys, bias -> biases, cat -> cats.
fn pluralize(s: &mut Vec<char>) {
    if ["ch", "ex", "ix", "sh", "ss"].iter().any(|suffix| ends_with(s, suffix)) {
        s.extend(['e', 's']);
    } else if s.len() > 2 && s.last() == Some(&'y') {
        if "aeiou".contains(s[s.len() - 2]) {
            s.push('s');
        } else {
            s.pop();
            s.extend(['i', 'e', 's']);
        }
    } else if s.last() == Some(&'s') {
        s.extend(['e', 's']);
    } else {
        s.push('s');
    }
}

/// Decodes a base-36 digit: `0`-`9`, then `a`-`z` (either case).
fn char_to_int(c: char) -> Option<usize> {
    c.to_digit(36).map(|d| d as usize)
}

struct Parser<'a> {
    rule: &'a str,
    chars: Chars<'a>,
}

impl<'a> Parser<'a> {
    fn new(rule: &'a str) -> Self {
        Self {
            rule,
            chars: rule.chars(),
        }
    }

    fn arg(&mut self, op: char) -> Result<char, RuleError> {
        self.chars.next().ok_or_else(|| RuleError::MissingArgument {
            op,
            rule: self.rule.to_string(),
        })
    }

    fn number(&mut self, op: char) -> Result<usize, RuleError> {
        let arg = self.arg(op)?;
        char_to_int(arg).ok_or_else(|| RuleError::BadArgument {
            op,
            arg,
            rule: self.rule.to_string(),
        })
    }

    fn cond(&mut self, op: char) -> Result<Cond, RuleError> {
        let arg = self.arg(op)?;
        if arg != CLASS_PREFIX {
            return Ok(Cond::Literal(arg));
        }
        let tag = self.arg(op)?;
        CharClass::from_tag(tag)
            .map(Cond::Class)
            .ok_or_else(|| RuleError::UnknownClass {
                class: tag,
                rule: self.rule.to_string(),
            })
    }

    fn next_op(&mut self) -> Option<Result<Op, RuleError>> {
        let op = self.chars.next()?;
        Some(self.parse_op(op))
    }

    fn parse_op(&mut self, op: char) -> Result<Op, RuleError> {
        let parsed = match op {
            ':' => Op::Noop,
            'r' | 'f' => Op::Reverse,
            'u' => Op::Upper,
            'l' => Op::Lower,
            'c' => Op::Capitalize,
            'p' => Op::Pluralize,
            'd' => Op::Duplicate,
            '>' => Op::RejectUnlessLonger(self.number(op)?),
            '<' => Op::RejectUnlessShorter(self.number(op)?),
            '^' => Op::Prepend(self.arg(op)?),
            '$' => Op::Append(self.arg(op)?),
            'x' => Op::Extract {
                start: self.number(op)?,
                len: self.number(op)?,
            },
            'o' => Op::Overstrike {
                pos: self.number(op)?,
                with: self.arg(op)?,
            },
            'i' => Op::Insert {
                pos: self.number(op)?,
                with: self.arg(op)?,
            },
            '@' => Op::Purge(self.cond(op)?),
            's' => Op::Substitute {
                from: self.cond(op)?,
                to: self.arg(op)?,
            },
            '/' => Op::Require(self.cond(op)?),
            '!' => Op::Forbid(self.cond(op)?),
            '=' => Op::PositionIs {
                pos: self.number(op)?,
                cond: self.cond(op)?,
            },
            '[' => Op::DeleteFirst,
            ']' => Op::DeleteLastTwo,
            '(' => {
                let first = self.cond(op)?;
                match self.arg(op)? {
                    ')' => {}
                    arg => {
                        return Err(RuleError::BadArgument {
                            op,
                            arg,
                            rule: self.rule.to_string(),
                        });
                    }
                }
                let last = self.cond(')')?;
                Op::FirstAndLast { first, last }
            }
            _ => {
                return Err(RuleError::UnknownCommand {
                    op,
                    rule: self.rule.to_string(),
                });
            }
        };
        Ok(parsed)
    }
}

/// A compiled rule string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    source: String,
    ops: Vec<Op>,
}

impl Rule {
    pub fn parse(source: &str) -> Result<Self, RuleError> {
        let mut parser = Parser::new(source);
        let mut ops = Vec::new();
        while let Some(op) = parser.next_op() {
            ops.push(op?);
        }
        Ok(Self {
            source: source.to_string(),
            ops,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Runs the rule over `word`. An empty result is a rejection.
    pub fn apply(&self, word: &str) -> Mangled {
        let mut s: Vec<char> = word.chars().collect();
        for op in &self.ops {
            if !op.apply(&mut s) {
                return Mangled::Rejected;
            }
        }
        if s.is_empty() {
            return Mangled::Rejected;
        }
        Mangled::Applied(s.into_iter().collect())
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parses `rule` and applies it to `word` in one step.
pub fn mangle(word: &str, rule: &str) -> Result<Mangled, RuleError> {
    Ok(Rule::parse(rule)?.apply(word))
}

/// Reverses `s` by characters.
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}
