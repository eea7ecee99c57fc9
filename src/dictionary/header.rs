//! Fixed 12-byte header at the start of the index stream.
//!
//! Layout (LE):
//!   magic[4]      = 0x70775631
//!   word_count[4] = number of words in the dictionary
//!   block_len[2]  = words per block (16)
//!   pad[2]        = 0

use std::fmt;

use super::DictionaryError;
use crate::codec::{get_u16, get_u32, put_u16, put_u32};
use crate::store::BlockStore;

pub const MAGIC: u32 = 0x7077_5631;
pub const HEADER_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryHeader {
    pub magic: u32,
    pub word_count: i32,
    pub block_len: i16,
    pub pad: i16,
}

impl DictionaryHeader {
    /// Header written when a dictionary is created.
    pub fn new(block_len: i16) -> Self {
        Self {
            magic: MAGIC,
            word_count: 0,
            block_len,
            pad: 0,
        }
    }

    pub fn parse(b: &[u8]) -> Result<Self, DictionaryError> {
        if b.len() < HEADER_SIZE {
            return Err(DictionaryError::HeaderTooShort { len: b.len() });
        }
        Ok(Self {
            magic: get_u32(&b[0..4]),
            word_count: get_u32(&b[4..8]) as i32,
            block_len: get_u16(&b[8..10]) as i16,
            pad: get_u16(&b[10..12]) as i16,
        })
    }

    pub fn read_from<S: BlockStore + ?Sized>(store: &mut S) -> Result<Self, DictionaryError> {
        let mut b = [0u8; HEADER_SIZE];
        let n = store.read_fullish(&mut b)?;
        Self::parse(&b[..n])
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut b = [0u8; HEADER_SIZE];
        put_u32(&mut b[0..4], self.magic);
        put_u32(&mut b[4..8], self.word_count as u32);
        put_u16(&mut b[8..10], self.block_len as u16);
        put_u16(&mut b[10..12], self.pad as u16);
        b
    }

    /// Checks the header against what this engine writes.
    pub fn validate(&self, block_len: i16) -> Result<(), DictionaryError> {
        if self.magic != MAGIC {
            return Err(DictionaryError::BadMagic { found: self.magic });
        }
        if self.block_len != block_len {
            return Err(DictionaryError::BlockSizeMismatch {
                expected: block_len,
                found: self.block_len,
            });
        }
        Ok(())
    }
}

impl fmt::Display for DictionaryHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "magic={:#x},word_count={},block_len={},pad={}",
            self.magic, self.word_count, self.block_len, self.pad
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_bytes_layout() {
        let mut header = DictionaryHeader::new(16);
        header.word_count = 3;
        let b = header.to_bytes();
        assert_eq!(
            b,
            [0x31, 0x56, 0x77, 0x70, 3, 0, 0, 0, 16, 0, 0, 0]
        );
        assert_eq!(DictionaryHeader::parse(&b).unwrap(), header);
    }

    #[test]
    fn test_header_too_short() {
        let result = DictionaryHeader::parse(&[0u8; 11]);
        assert!(matches!(
            result,
            Err(DictionaryError::HeaderTooShort { len: 11 })
        ));
    }

    #[test]
    fn test_header_validate_magic() {
        let mut header = DictionaryHeader::new(16);
        header.magic = 0xdead_beef;
        assert!(matches!(
            header.validate(16),
            Err(DictionaryError::BadMagic { found: 0xdead_beef })
        ));
    }

    #[test]
    fn test_header_validate_block_len() {
        let header = DictionaryHeader::new(8);
        assert!(matches!(
            header.validate(16),
            Err(DictionaryError::BlockSizeMismatch { expected: 16, found: 8 })
        ));
        assert!(DictionaryHeader::new(16).validate(16).is_ok());
    }

    #[test]
    fn test_header_display() {
        let header = DictionaryHeader::new(16);
        assert_eq!(
            header.to_string(),
            "magic=0x70775631,word_count=0,block_len=16,pad=0"
        );
    }
}
