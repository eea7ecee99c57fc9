//! Packed dictionary index.
//!
//! A dictionary is stored as three files sharing a base name:
//!
//! - `.pwi` index: 12-byte header, then one LE u32 data offset per block
//! - `.pwd` data: front-coded blocks of 16 sorted words
//! - `.hwm` high-water marks: 256 LE u32, one per leading byte (optional)
//!
//! Words must be inserted in strictly increasing case-insensitive order.
//! Lookups binary-search the range of words sharing the query's leading
//! byte (ASCII letters folded to lower case), decoding whole blocks on demand.

mod block;
mod cache;
mod header;

pub use header::{DictionaryHeader, HEADER_SIZE, MAGIC};

use std::cmp::Ordering;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use crate::codec::{get_u32, put_u32};
use crate::store::BlockStore;
use block::{decode_block, encode_block};
use cache::{BlockCache, DEFAULT_CACHE_BLOCKS, block_cache};

/// Words per block.
pub const BLOCK_WORDS: usize = 16;

/// Maximum stored word length, including the terminator.
pub const MAX_WORD_LEN: usize = 32;

const MAX_BLOCK_LEN: usize = MAX_WORD_LEN * BLOCK_WORDS;
const HWM_SLOTS: usize = 256;
const OFFSET_SIZE: u64 = 4;

/// Base name used when none is configured.
pub const DEFAULT_BASE_NAME: &str = "words.pack";

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Dictionary I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Dictionary header too short: {len} bytes")]
    HeaderTooShort { len: usize },
    #[error("Magic number mismatch: found {found:#x}")]
    BadMagic { found: u32 },
    #[error("Block size mismatch: expected {expected}, found {found}")]
    BlockSizeMismatch { expected: i16, found: i16 },
    #[error("Mode must be \"rw\" or \"r\", got {0:?}")]
    InvalidMode(String),
    #[error("Cannot {op} in mode \"{mode}\"")]
    WrongMode { op: &'static str, mode: Mode },
    #[error("Words must be put in alphabetical order: {word:?} after {previous:?}")]
    OutOfOrder { previous: String, word: String },
    #[error("Cannot put an empty word")]
    EmptyWord,
    #[error("Word contains a NUL byte: {0:?}")]
    InvalidWord(String),
    #[error("Corrupt dictionary: {0}")]
    Corrupt(String),
}

/// Open mode, spelled `"r"` or `"rw"` in the historical API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Read,
    Write,
}

impl FromStr for Mode {
    type Err = DictionaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(Mode::Read),
            "rw" => Ok(Mode::Write),
            other => Err(DictionaryError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Read => f.write_str("r"),
            Mode::Write => f.write_str("rw"),
        }
    }
}

/// Locations of the three dictionary files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryPaths {
    pub data: PathBuf,
    pub index: PathBuf,
    pub hwm: PathBuf,
}

impl DictionaryPaths {
    /// Appends `.pwd`, `.pwi` and `.hwm` to `base`.
    pub fn from_base<P: AsRef<Path>>(base: P) -> Self {
        let base = base.as_ref();
        let with_ext = |ext: &str| {
            let mut s = base.as_os_str().to_owned();
            s.push(ext);
            PathBuf::from(s)
        };
        Self {
            data: with_ext(".pwd"),
            index: with_ext(".pwi"),
            hwm: with_ext(".hwm"),
        }
    }

    /// Files named `name` inside `dir` when it is an existing directory,
    /// otherwise `name` relative to the working directory.
    pub fn in_dir(dir: Option<&Path>, name: &str) -> Self {
        match dir {
            Some(dir) if dir.is_dir() => Self::from_base(dir.join(name)),
            _ => Self::from_base(name),
        }
    }
}

impl Default for DictionaryPaths {
    fn default() -> Self {
        Self::from_base(DEFAULT_BASE_NAME)
    }
}

/// Case-insensitive ordinal comparison (ASCII letters fold).
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

/// High-water-mark slot of a non-empty word: its leading byte, ASCII-folded
/// so that marks follow the case-insensitive word order.
fn lead_slot(word: &str) -> usize {
    word.as_bytes()[0].to_ascii_lowercase() as usize
}

/// Cuts `word` to fit a stored entry, on a character boundary.
pub fn truncate_word(word: &str) -> &str {
    let limit = MAX_WORD_LEN - 1;
    if word.len() <= limit {
        return word;
    }
    let mut end = limit;
    while !word.is_char_boundary(end) {
        end -= 1;
    }
    &word[..end]
}

struct Inner<S> {
    data: S,
    index: S,
    hwm: Option<S>,
    header: DictionaryHeader,
    hwms: [u32; HWM_SLOTS],
    use_hwms: bool,
    pending: Vec<String>,
    last_word: Option<String>,
    cache: BlockCache,
    finished: bool,
}

/// A packed, sorted word list opened for building or for lookup.
///
/// All operations take `&self`; a single mutex serializes access to the
/// streams and the decode cache, so one instance can be shared between
/// threads. Independent instances search in parallel.
pub struct Dictionary<S: BlockStore = File> {
    mode: Mode,
    inner: Mutex<Inner<S>>,
}

impl Dictionary<File> {
    /// Creates a new dictionary for writing, deleting any existing files.
    pub fn create(paths: &DictionaryPaths) -> Result<Self, DictionaryError> {
        for path in [&paths.data, &paths.index, &paths.hwm] {
            remove_existing(path)?;
        }
        let open = |path: &Path| {
            OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
        };
        let data = open(&paths.data)?;
        let index = open(&paths.index)?;
        let hwm = open(&paths.hwm)?;

        #[cfg(feature = "tracing")]
        tracing::info!("Dictionary created at {:?}", paths.index);

        Self::from_stores(Mode::Write, data, index, Some(hwm))
    }

    /// Opens an existing dictionary for lookup.
    ///
    /// A missing `.hwm` file is tolerated; lookups then search the whole
    /// word list instead of the leading-byte range.
    pub fn open(paths: &DictionaryPaths) -> Result<Self, DictionaryError> {
        let data = File::open(&paths.data)?;
        let index = File::open(&paths.index)?;
        let hwm = match File::open(&paths.hwm) {
            Ok(file) => Some(file),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                #[cfg(feature = "tracing")]
                tracing::info!("No high-water marks at {:?}, using full-range search", paths.hwm);
                None
            }
            Err(e) => return Err(e.into()),
        };

        let dict = Self::from_stores(Mode::Read, data, index, hwm)?;

        #[cfg(feature = "tracing")]
        tracing::info!("Dictionary opened: {} words from {:?}", dict.size(), paths.index);

        Ok(dict)
    }

    pub fn open_with_mode(paths: &DictionaryPaths, mode: Mode) -> Result<Self, DictionaryError> {
        match mode {
            Mode::Read => Self::open(paths),
            Mode::Write => Self::create(paths),
        }
    }
}

impl<S: BlockStore> Dictionary<S> {
    /// Wraps host-supplied stores. In write mode the stores are expected to
    /// be empty; in read mode the header and high-water marks are loaded.
    pub fn from_stores(
        mode: Mode,
        data: S,
        mut index: S,
        mut hwm: Option<S>,
    ) -> Result<Self, DictionaryError> {
        let mut hwms = [0u32; HWM_SLOTS];
        let header = match mode {
            Mode::Write => {
                let header = DictionaryHeader::new(BLOCK_WORDS as i16);
                index.seek_to(0)?;
                index.write_bytes(&header.to_bytes())?;
                header
            }
            Mode::Read => {
                index.seek_to(0)?;
                let header = DictionaryHeader::read_from(&mut index)?;
                if let Err(e) = header.validate(BLOCK_WORDS as i16) {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Dictionary open FAILED: {}", e);
                    return Err(e);
                }
                if let Some(store) = hwm.as_mut() {
                    read_hwms(store, &mut hwms)?;
                }
                header
            }
        };

        let use_hwms = hwm.is_some();
        Ok(Self {
            mode,
            inner: Mutex::new(Inner {
                data,
                index,
                hwm: if mode == Mode::Write { hwm } else { None },
                header,
                hwms,
                use_hwms,
                pending: Vec::with_capacity(BLOCK_WORDS),
                last_word: None,
                cache: block_cache(DEFAULT_CACHE_BLOCKS),
                finished: false,
            }),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn require(&self, mode: Mode, op: &'static str) -> Result<(), DictionaryError> {
        if self.mode != mode {
            return Err(DictionaryError::WrongMode { op, mode: self.mode });
        }
        Ok(())
    }

    /// Appends a word. Words must arrive in strictly increasing
    /// case-insensitive order; longer words are truncated to 31 bytes.
    pub fn put(&self, word: &str) -> Result<(), DictionaryError> {
        self.require(Mode::Write, "put")?;
        if word.is_empty() {
            return Err(DictionaryError::EmptyWord);
        }
        if word.contains('\0') {
            return Err(DictionaryError::InvalidWord(word.to_string()));
        }

        let mut inner = self.lock();
        if let Some(previous) = inner.last_word.as_deref() {
            if compare_ignore_case(previous, word) != Ordering::Less {
                return Err(DictionaryError::OutOfOrder {
                    previous: previous.to_string(),
                    word: word.to_string(),
                });
            }
            // distinct words can collapse to the same stored prefix
            if truncate_word(previous) == truncate_word(word) {
                #[cfg(feature = "tracing")]
                tracing::debug!("Skipping {:?}: same stored prefix as {:?}", word, previous);
                inner.last_word = Some(word.to_string());
                return Ok(());
            }
        }
        inner.last_word = Some(word.to_string());

        let stored = truncate_word(word).to_string();
        let lead = lead_slot(&stored);
        inner.header.word_count += 1;
        inner.hwms[lead] = inner.header.word_count as u32;
        inner.pending.push(stored);

        if inner.pending.len() >= BLOCK_WORDS {
            inner.flush_block()?;
        }
        Ok(())
    }

    /// Returns the `n`-th word, or `None` past the end.
    pub fn get(&self, n: usize) -> Result<Option<String>, DictionaryError> {
        self.require(Mode::Read, "get")?;
        self.lock().get(n)
    }

    /// Returns the position of `word`, compared case-insensitively.
    pub fn find(&self, word: &str) -> Result<Option<usize>, DictionaryError> {
        self.require(Mode::Read, "find")?;
        if word.is_empty() {
            return Ok(None);
        }
        let lead = lead_slot(word);

        let mut inner = self.lock();
        let count = inner.header.word_count.max(0) as i64;
        let (lower, upper) = if inner.use_hwms {
            let lower = if lead == 0 { 0 } else { inner.hwms[lead - 1] };
            (lower as i64, (inner.hwms[lead] as i64).min(count))
        } else {
            (0, count)
        };
        if upper <= lower {
            return Ok(None);
        }

        // Open interval (low, high); the midpoint rounds up.
        let mut low = lower - 1;
        let mut high = upper;
        loop {
            let middle = low + (high - low + 1) / 2;
            if middle == high {
                return Ok(None);
            }
            let Some(candidate) = inner.get(middle as usize)? else {
                return Ok(None);
            };
            match compare_ignore_case(word, &candidate) {
                Ordering::Less => high = middle,
                Ordering::Greater => low = middle,
                Ordering::Equal => return Ok(Some(middle as usize)),
            }
        }
    }

    pub fn contains(&self, word: &str) -> Result<bool, DictionaryError> {
        Ok(self.find(word)?.is_some())
    }

    /// Number of words in the dictionary.
    pub fn size(&self) -> usize {
        self.lock().header.word_count.max(0) as usize
    }

    /// Iterates all words in index order.
    pub fn words(&self) -> Words<'_, S> {
        Words { dict: self, next: 0 }
    }

    /// Finishes a write session (flushing the last block, the final header
    /// and the high-water marks) and releases the stores.
    pub fn close(mut self) -> Result<(), DictionaryError> {
        let mode = self.mode;
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        inner.finish(mode)
    }
}

impl<S: BlockStore> Drop for Dictionary<S> {
    fn drop(&mut self) {
        let mode = self.mode;
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Err(_e) = inner.finish(mode) {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to finalize dictionary on drop: {}", _e);
        }
    }
}

impl<S: BlockStore> Inner<S> {
    fn flush_block(&mut self) -> Result<(), DictionaryError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let offset = self.data.position()?;
        let offset = u32::try_from(offset)
            .map_err(|_| DictionaryError::Corrupt(format!("data offset {} exceeds 4 GiB", offset)))?;
        let mut b = [0u8; 4];
        put_u32(&mut b, offset);
        self.index.write_bytes(&b)?;

        let mut buf = Vec::with_capacity(MAX_BLOCK_LEN);
        encode_block(&self.pending, BLOCK_WORDS, &mut buf);
        self.data.write_bytes(&buf)?;
        self.pending.clear();
        Ok(())
    }

    fn finish(&mut self, mode: Mode) -> Result<(), DictionaryError> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if mode == Mode::Read {
            return Ok(());
        }

        self.flush_block()?;
        self.index.seek_to(0)?;
        self.index.write_bytes(&self.header.to_bytes())?;
        self.index.flush_bytes()?;
        self.data.flush_bytes()?;

        if let Some(store) = self.hwm.as_mut() {
            // Letters without words inherit the bound of the letter before.
            for i in 1..HWM_SLOTS {
                if self.hwms[i] == 0 {
                    self.hwms[i] = self.hwms[i - 1];
                }
            }
            let mut buf = vec![0u8; HWM_SLOTS * 4];
            for (chunk, mark) in buf.chunks_exact_mut(4).zip(self.hwms.iter()) {
                put_u32(chunk, *mark);
            }
            store.seek_to(0)?;
            store.write_bytes(&buf)?;
            store.flush_bytes()?;
        }

        #[cfg(feature = "tracing")]
        tracing::info!("Dictionary closed: {} words", self.header.word_count);

        Ok(())
    }

    fn get(&mut self, n: usize) -> Result<Option<String>, DictionaryError> {
        if n >= self.header.word_count.max(0) as usize {
            return Ok(None);
        }
        let block = n / BLOCK_WORDS;
        let words = match self.cache.get(&block).cloned() {
            Some(words) => words,
            None => {
                let words = self.read_block(block)?;
                self.cache.put(block, Arc::clone(&words));
                words
            }
        };
        match words.get(n % BLOCK_WORDS) {
            Some(word) => Ok(Some(word.clone())),
            None => Err(DictionaryError::Corrupt(format!(
                "block {} holds {} words, word {} missing",
                block,
                words.len(),
                n
            ))),
        }
    }

    fn read_block(&mut self, block: usize) -> Result<Arc<[String]>, DictionaryError> {
        let at = HEADER_SIZE as u64 + block as u64 * OFFSET_SIZE;
        self.index.seek_to(at)?;
        let mut b = [0u8; 8];
        let n = self.index.read_fullish(&mut b)?;
        if n < 4 {
            return Err(DictionaryError::Corrupt(format!("missing offset for block {}", block)));
        }
        let start = get_u32(&b[0..4]) as u64;
        let len = if n == 8 {
            let end = get_u32(&b[4..8]) as u64;
            end.checked_sub(start).ok_or_else(|| {
                DictionaryError::Corrupt(format!("block {} offsets decrease", block))
            })? as usize
        } else {
            MAX_BLOCK_LEN
        };

        let mut buf = vec![0u8; len];
        self.data.seek_to(start)?;
        let read = self.data.read_fullish(&mut buf)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Decoding block {} ({} bytes at {})", block, read, start);

        Ok(decode_block(&buf[..read], BLOCK_WORDS).into())
    }
}

fn read_hwms<S: BlockStore>(store: &mut S, hwms: &mut [u32; HWM_SLOTS]) -> Result<(), DictionaryError> {
    let mut buf = vec![0u8; HWM_SLOTS * 4];
    store.seek_to(0)?;
    store.read_exactly(&mut buf)?;
    for (mark, chunk) in hwms.iter_mut().zip(buf.chunks_exact(4)) {
        *mark = get_u32(chunk);
    }
    Ok(())
}

fn remove_existing(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Iterator over every word of a read-mode dictionary.
pub struct Words<'a, S: BlockStore> {
    dict: &'a Dictionary<S>,
    next: usize,
}

impl<S: BlockStore> Iterator for Words<'_, S> {
    type Item = Result<String, DictionaryError>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.next;
        self.next += 1;
        self.dict.get(n).transpose()
    }
}
