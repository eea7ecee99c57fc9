//! Dictionary-based weak password detection
//!
//! This library decides whether a password is (a trivial transform of) a
//! dictionary word. It pairs a compact, front-coded on-disk word index with
//! a mangling-rule interpreter that undoes common obfuscations (leetspeak,
//! reversal, junk suffixes) before looking the result up.
//!
//! # Features
//!
//! - `async` (default): Enables [`check_password_tx`] on the tokio blocking pool
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_DICTIONARY_PATH`: Base path of the dictionary files
//!   (default: `./assets/words.pack`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_cracklib::{build_from_path, PasswordChecker, StatusCode};
//! use secrecy::SecretString;
//!
//! let checker = PasswordChecker::from_env();
//!
//! // Build the dictionary once from a sorted word list
//! build_from_path("words.txt", checker.paths()).expect("Failed to build dictionary");
//!
//! // Check a password
//! let password = SecretString::new("p4$$w0rd".to_string().into());
//! let findings = checker.check(&password).expect("Failed to check password");
//!
//! assert!(findings.contains(StatusCode::Dictionary));
//! println!("{}", findings);
//! ```

// Internal modules
mod builder;
mod checker;
mod codec;
mod sections;
mod status;

pub mod config;
pub mod dictionary;
pub mod rules;
pub mod store;

// Public API
pub use builder::{BuildError, build_from_path, build_from_reader};
pub use checker::{CheckError, PasswordChecker};
pub use dictionary::{Dictionary, DictionaryError, DictionaryPaths, Mode};
pub use rules::{Mangled, Rule, RuleError, RuleSet, mangle};
pub use status::{Findings, StatusCode};
pub use store::BlockStore;

#[cfg(feature = "async")]
pub use checker::check_password_tx;
