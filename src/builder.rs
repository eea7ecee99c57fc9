//! Dictionary building from plain word lists.
//!
//! A word list has one word per line, already sorted case-insensitively.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dictionary::{Dictionary, DictionaryError, DictionaryPaths};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Word list file not found: {0}")]
    WordListNotFound(PathBuf),
    #[error("Failed to read word list: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Word list is empty")]
    EmptyWordList,
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

/// Builds a dictionary at `paths` from the word list at `word_list`.
///
/// Any existing dictionary files at `paths` are replaced.
///
/// # Errors
///
/// Returns error if:
/// - The word list does not exist or cannot be read
/// - The word list has no words
/// - The words are not sorted case-insensitively
pub fn build_from_path<P: AsRef<Path>>(
    word_list: P,
    paths: &DictionaryPaths,
) -> Result<usize, BuildError> {
    let word_list = word_list.as_ref();

    if !word_list.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Dictionary build FAILED: FileNotFound {:?}", word_list);
        return Err(BuildError::WordListNotFound(word_list.to_path_buf()));
    }

    let reader = BufReader::new(File::open(word_list)?);
    build_from_reader(reader, paths)
}

/// Builds a dictionary at `paths` from lines of `reader`.
///
/// Surrounding whitespace is trimmed and blank lines are skipped.
pub fn build_from_reader<R: BufRead>(reader: R, paths: &DictionaryPaths) -> Result<usize, BuildError> {
    let dict = Dictionary::create(paths)?;

    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        if let Err(e) = dict.put(word) {
            #[cfg(feature = "tracing")]
            tracing::error!("Dictionary build FAILED at {:?}: {}", word, e);
            return Err(e.into());
        }
    }

    let count = dict.size();
    dict.close()?;

    if count == 0 {
        #[cfg(feature = "tracing")]
        tracing::error!("Dictionary build FAILED: empty word list");
        return Err(BuildError::EmptyWordList);
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Dictionary built: {} words at {:?}", count, paths.index);

    Ok(count)
}
