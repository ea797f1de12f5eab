//! RIFF chunk primitives: FourCC tags and the tag + size chunk header.

use std::fmt;
use std::io::{Read, Seek};

use serde::{Deserialize, Serialize};

use crate::reader::ByteCursor;

// ============================================================================
// Tags
// ============================================================================

pub const RIFF: FourCc = FourCc(*b"RIFF");
pub const AVI_: FourCc = FourCc(*b"AVI ");
pub const LIST: FourCc = FourCc(*b"LIST");
pub const HDRL: FourCc = FourCc(*b"hdrl"); // header list
pub const AVIH: FourCc = FourCc(*b"avih"); // main AVI header
pub const STRL: FourCc = FourCc(*b"strl"); // stream list
pub const STRH: FourCc = FourCc(*b"strh"); // stream header
pub const STRF: FourCc = FourCc(*b"strf"); // stream format
pub const MOVI: FourCc = FourCc(*b"movi"); // movie data
pub const IDX1: FourCc = FourCc(*b"idx1"); // legacy index

// Stream types
pub const VIDS: FourCc = FourCc(*b"vids");
pub const AUDS: FourCc = FourCc(*b"auds");

// ============================================================================
// FourCC
// ============================================================================

/// A four-byte ASCII tag. Comparison is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Printable rendering: bytes outside ASCII [32, 126] become '.'.
    pub fn printable(&self) -> String {
        self.0
            .iter()
            .map(|&b| if (32..=126).contains(&b) { b as char } else { '.' })
            .collect()
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.printable())
    }
}

// ============================================================================
// Chunk Header
// ============================================================================

/// Tag + little-endian body size. The size excludes the 8-byte header.
#[derive(Debug, Clone, Copy)]
pub struct ChunkHeader {
    pub id: FourCc,
    pub size: u32,
}

impl ChunkHeader {
    /// Reads a tag + size pair. Never fails: malformed input produces a
    /// header the walker will not recognize and will skip by size.
    pub fn read<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Self {
        let id = cursor.read_fourcc();
        let size = cursor.read_u32_le();
        Self { id, size }
    }

    /// Absolute offset of the first byte past this chunk's declared body,
    /// given the offset where the header itself started.
    pub fn body_end(&self, header_start: u64) -> u64 {
        header_start + 8 + self.size as u64
    }

    /// Offset of the next chunk: declared end plus the pad byte that follows
    /// an odd-sized body. The pad is never counted in any size field.
    pub fn next_offset(&self, header_start: u64) -> u64 {
        self.body_end(header_start) + (self.size as u64 & 1)
    }
}
