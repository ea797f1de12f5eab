//! Little-endian byte cursor over a seekable source.
//!
//! Mirrors the permissive behavior of legacy container tooling: reading past
//! the end of the source zero-fills instead of failing, and `at_end()` is the
//! authoritative stop condition for callers.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::chunk::FourCc;

pub struct ByteCursor<R: Read + Seek> {
    inner: R,
    pos: u64,
    len: u64,
    eof: bool,
}

impl<R: Read + Seek> ByteCursor<R> {
    pub fn new(mut inner: R) -> std::io::Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self {
            inner,
            pos: 0,
            len,
            eof: false,
        })
    }

    /// Current byte offset from the start of the source.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Total length of the source in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once the cursor sits at or past the end of the source, or a read
    /// has already come up short.
    pub fn at_end(&self) -> bool {
        self.eof || self.pos >= self.len
    }

    /// Fills `buf` from the source, zero-filling whatever could not be read.
    /// A short read latches the EOF flag; it never fails the parse.
    fn fill(&mut self, buf: &mut [u8]) {
        let mut read = 0;
        while read < buf.len() {
            match self.inner.read(&mut buf[read..]) {
                Ok(0) => break,
                Ok(n) => read += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        if read < buf.len() {
            buf[read..].fill(0);
            self.eof = true;
        }
        self.pos += read as u64;
    }

    pub fn read_u16_le(&mut self) -> u16 {
        let mut buf = [0u8; 2];
        self.fill(&mut buf);
        u16::from_le_bytes(buf)
    }

    pub fn read_u32_le(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill(&mut buf);
        u32::from_le_bytes(buf)
    }

    pub fn read_fourcc(&mut self) -> FourCc {
        let mut buf = [0u8; 4];
        self.fill(&mut buf);
        FourCc(buf)
    }

    /// Moves the cursor forward or backward relative to its position.
    /// Seeking clears a latched EOF, like fseek clearing the EOF indicator.
    pub fn skip(&mut self, n: i64) {
        match self.inner.seek(SeekFrom::Current(n)) {
            Ok(pos) => {
                self.pos = pos;
                self.eof = false;
            }
            Err(_) => self.eof = true,
        }
    }

    /// Absolute reposition, used to land exactly on a chunk boundary.
    pub fn seek_to(&mut self, pos: u64) {
        match self.inner.seek(SeekFrom::Start(pos)) {
            Ok(pos) => {
                self.pos = pos;
                self.eof = false;
            }
            Err(_) => self.eof = true,
        }
    }
}
