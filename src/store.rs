//! Seekable byte storage backing the dictionary streams.
//!
//! The dictionary only needs sequential appends while building and
//! positional reads while searching, so any `Read + Write + Seek` type
//! qualifies: files on disk, or `Cursor<Vec<u8>>` for in-memory use.

use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};

pub trait BlockStore {
    /// Moves the cursor to an absolute offset.
    fn seek_to(&mut self, offset: u64) -> io::Result<()>;

    /// Current absolute offset of the cursor.
    fn position(&mut self) -> io::Result<u64>;

    /// Reads at most `buf.len()` bytes, returning how many were read.
    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()>;

    fn flush_bytes(&mut self) -> io::Result<()>;

    /// Reads until `buf` is full or the store is exhausted.
    ///
    /// Unlike `read_exact`, a short read at end-of-stream is not an error:
    /// the last block of a dictionary is read with an upper-bound length.
    fn read_fullish(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read_some(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    fn read_exactly(&mut self, buf: &mut [u8]) -> io::Result<()> {
        let n = self.read_fullish(buf)?;
        if n < buf.len() {
            return Err(io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("expected {} bytes, read {}", buf.len(), n),
            ));
        }
        Ok(())
    }
}

impl<T: Read + Write + Seek> BlockStore for T {
    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    fn position(&mut self) -> io::Result<u64> {
        self.stream_position()
    }

    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read(buf)
    }

    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        self.write_all(buf)
    }

    fn flush_bytes(&mut self) -> io::Result<()> {
        self.flush()
    }
}
