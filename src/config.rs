//! Dictionary location resolved from the environment.

use std::path::PathBuf;

use crate::dictionary::DictionaryPaths;

pub const DICTIONARY_PATH_ENV: &str = "PWD_DICTIONARY_PATH";
pub const DEFAULT_DICTIONARY_PATH: &str = "./assets/words.pack";

/// Returns the dictionary base path (without `.pwd`/`.pwi`/`.hwm`).
///
/// Priority:
/// 1. Environment variable `PWD_DICTIONARY_PATH`
/// 2. Default path `./assets/words.pack`
pub fn dictionary_base_path() -> PathBuf {
    std::env::var(DICTIONARY_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DICTIONARY_PATH))
}

/// The three dictionary files under [`dictionary_base_path`].
pub fn dictionary_paths() -> DictionaryPaths {
    DictionaryPaths::from_base(dictionary_base_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper to safely set env var in tests
    fn set_env(key: &str, value: &str) {
        // SAFETY: only used from #[serial] tests
        unsafe { std::env::set_var(key, value); }
    }

    /// Helper to safely remove env var in tests
    fn remove_env(key: &str) {
        // SAFETY: only used from #[serial] tests
        unsafe { std::env::remove_var(key); }
    }

    #[test]
    #[serial]
    fn test_dictionary_base_path_default() {
        remove_env(DICTIONARY_PATH_ENV);

        let path = dictionary_base_path();
        assert_eq!(path, PathBuf::from("./assets/words.pack"));
    }

    #[test]
    #[serial]
    fn test_dictionary_base_path_from_env() {
        set_env(DICTIONARY_PATH_ENV, "/custom/path/cracklib");

        let paths = dictionary_paths();
        assert_eq!(paths.data, PathBuf::from("/custom/path/cracklib.pwd"));
        assert_eq!(paths.index, PathBuf::from("/custom/path/cracklib.pwi"));
        assert_eq!(paths.hwm, PathBuf::from("/custom/path/cracklib.hwm"));

        remove_env(DICTIONARY_PATH_ENV);
    }
}
