//! Character classes addressed by `?x` in rule strings.

/// A class of characters, selected by a one-letter tag (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// `??`, a literal question mark
    Question,
    Vowel,
    Consonant,
    Whitespace,
    Punctuation,
    Symbol,
    Lower,
    Upper,
    Alphabetic,
    Alphanumeric,
    Digit,
}

const VOWELS: &str = "aeiou";
const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyz";
const PUNCTUATION: &str = ".`,:;'!?\"";
const SYMBOLS: &str = "$%^&*()-_+=|\\[]{}#@/~";

impl CharClass {
    pub fn from_tag(tag: char) -> Option<Self> {
        let class = match tag.to_ascii_lowercase() {
            '?' => CharClass::Question,
            'v' => CharClass::Vowel,
            'c' => CharClass::Consonant,
            'w' => CharClass::Whitespace,
            'p' => CharClass::Punctuation,
            's' => CharClass::Symbol,
            'l' => CharClass::Lower,
            'u' => CharClass::Upper,
            'a' => CharClass::Alphabetic,
            'x' => CharClass::Alphanumeric,
            'd' => CharClass::Digit,
            _ => return None,
        };
        Some(class)
    }

    pub fn tag(self) -> char {
        match self {
            CharClass::Question => '?',
            CharClass::Vowel => 'v',
            CharClass::Consonant => 'c',
            CharClass::Whitespace => 'w',
            CharClass::Punctuation => 'p',
            CharClass::Symbol => 's',
            CharClass::Lower => 'l',
            CharClass::Upper => 'u',
            CharClass::Alphabetic => 'a',
            CharClass::Alphanumeric => 'x',
            CharClass::Digit => 'd',
        }
    }

    pub fn matches(self, c: char) -> bool {
        match self {
            CharClass::Question => c == '?',
            CharClass::Vowel => VOWELS.contains(c.to_ascii_lowercase()),
            CharClass::Consonant => CONSONANTS.contains(c.to_ascii_lowercase()),
            CharClass::Whitespace => c.is_whitespace(),
            CharClass::Punctuation => PUNCTUATION.contains(c),
            CharClass::Symbol => SYMBOLS.contains(c),
            CharClass::Lower => c.is_lowercase(),
            CharClass::Upper => c.is_uppercase(),
            CharClass::Alphabetic => c.is_alphabetic(),
            CharClass::Alphanumeric => c.is_alphanumeric(),
            // ASCII only, like the case folding used for lookups
            CharClass::Digit => c.is_ascii_digit(),
        }
    }
}

/// True when `word` has the same length as `pattern` and every character
/// belongs to the class tagged at the same position of `pattern`.
///
/// Returns `None` if `pattern` contains an unknown class tag.
pub fn pattern_matches(pattern: &str, word: &str) -> Option<bool> {
    if pattern.chars().count() != word.chars().count() {
        return Some(false);
    }
    for (tag, c) in pattern.chars().zip(word.chars()) {
        if !CharClass::from_tag(tag)?.matches(c) {
            return Some(false);
        }
    }
    Some(true)
}
