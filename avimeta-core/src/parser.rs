//! AVI container walker.
//!
//! Recursive descent over nested RIFF chunks. Strict about the envelope
//! (RIFF tag, then `AVI ` form type), lenient about everything inside it:
//! unknown chunks and lists are always skippable by their declared size,
//! which is the format's self-describing guarantee.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chunk::{self, ChunkHeader, FourCc};
use crate::headers::{AudioFormat, MainHeader, StreamHeader, VideoFormat};
use crate::reader::ByteCursor;

/// Hard cap on recorded streams; `strl` lists beyond this are dropped.
pub const MAX_STREAMS: usize = 10;

#[derive(Debug, Error)]
pub enum AviError {
    #[error("cannot open file: {0}")]
    CannotOpen(#[from] std::io::Error),
    #[error("not a RIFF file")]
    NotRiff,
    #[error("not an AVI file")]
    NotAvi,
}

// ============================================================================
// Aggregate
// ============================================================================

/// Per-stream format block, selected by the stream header's type tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamFormat {
    Video(VideoFormat),
    Audio(AudioFormat),
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub type_tag: FourCc,
    pub header: StreamHeader,
    pub format: StreamFormat,
}

/// Everything the walker collects from one pass over the container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AviInfo {
    pub main_header: MainHeader,
    pub streams: Vec<StreamInfo>,
    pub video_streams: u32,
    pub audio_streams: u32,
    /// Handler tag of the first video stream, rendered printable.
    pub video_codec: String,
    /// Offset of the `movi` sub-type tag from the start of the file.
    pub movi_offset: u64,
    /// Payload size in bytes, excluding the sub-type tag.
    pub movi_size: u32,
    pub has_index: bool,
}

impl AviInfo {
    pub fn stream_count(&self) -> u32 {
        self.streams.len() as u32
    }

    /// Frames per second from the main header, 0 when unknown.
    pub fn fps(&self) -> f64 {
        if self.main_header.micro_sec_per_frame > 0 {
            1_000_000.0 / self.main_header.micro_sec_per_frame as f64
        } else {
            0.0
        }
    }

    /// Total duration in seconds, 0 when the frame rate is unknown.
    pub fn duration_secs(&self) -> f64 {
        let fps = self.fps();
        if fps > 0.0 {
            self.main_header.total_frames as f64 / fps
        } else {
            0.0
        }
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Parses AVI metadata from a file on disk.
pub fn parse_avi_file(path: impl AsRef<Path>) -> Result<AviInfo, AviError> {
    let file = File::open(path.as_ref())?;
    parse_avi(file)
}

/// Parses AVI metadata from any seekable byte source.
pub fn parse_avi<R: Read + Seek>(reader: R) -> Result<AviInfo, AviError> {
    let mut cursor = ByteCursor::new(reader)?;

    let riff = ChunkHeader::read(&mut cursor);
    if riff.id != chunk::RIFF {
        return Err(AviError::NotRiff);
    }
    let form_type = cursor.read_fourcc();
    if form_type != chunk::AVI_ {
        return Err(AviError::NotAvi);
    }

    let mut walker = Walker {
        cursor,
        info: AviInfo::default(),
    };
    walker.walk_top(riff.size);
    Ok(walker.info)
}

// ============================================================================
// Walker
// ============================================================================

struct Walker<R: Read + Seek> {
    cursor: ByteCursor<R>,
    info: AviInfo,
}

impl<R: Read + Seek> Walker<R> {
    /// Top level, bounded by the outer RIFF size.
    fn walk_top(&mut self, riff_size: u32) {
        let end = 8 + riff_size as u64;
        while self.cursor.position() < end && !self.cursor.at_end() {
            let start = self.cursor.position();
            let header = ChunkHeader::read(&mut self.cursor);
            if header.id == chunk::LIST {
                let list_type = self.cursor.read_fourcc();
                tracing::debug!(list = %list_type, size = header.size, "top-level list");
                if list_type == chunk::HDRL {
                    self.walk_hdrl(header.body_end(start));
                } else if list_type == chunk::MOVI {
                    // Offset points at the sub-type tag itself; the tag is
                    // excluded from the recorded size. A later movi list
                    // overwrites an earlier one.
                    self.info.movi_offset = self.cursor.position() - 4;
                    self.info.movi_size = header.size.saturating_sub(4);
                }
            } else if header.id == chunk::IDX1 {
                self.info.has_index = true;
            } else {
                tracing::trace!(tag = %header.id, size = header.size, "skipping top-level chunk");
            }
            self.finish_chunk(start, &header);
        }
    }

    /// Header list (`hdrl`): main header plus one `strl` list per stream.
    fn walk_hdrl(&mut self, end: u64) {
        while self.cursor.position() < end && !self.cursor.at_end() {
            let start = self.cursor.position();
            let header = ChunkHeader::read(&mut self.cursor);
            if header.id == chunk::AVIH {
                self.info.main_header = MainHeader::read(&mut self.cursor);
            } else if header.id == chunk::LIST {
                let list_type = self.cursor.read_fourcc();
                if list_type == chunk::STRL {
                    if self.info.streams.len() < MAX_STREAMS {
                        self.walk_strl(header.body_end(start));
                    } else {
                        tracing::warn!("stream limit reached, dropping extra strl list");
                    }
                }
            }
            self.finish_chunk(start, &header);
        }
    }

    /// Stream list (`strl`): the stream header must precede the format
    /// block, since the format's layout depends on the stream type.
    fn walk_strl(&mut self, end: u64) {
        let mut stream = StreamInfo::default();
        while self.cursor.position() < end && !self.cursor.at_end() {
            let start = self.cursor.position();
            let header = ChunkHeader::read(&mut self.cursor);
            if header.id == chunk::STRH {
                stream.header = StreamHeader::read(&mut self.cursor);
                stream.type_tag = stream.header.fcc_type;
                if stream.type_tag == chunk::VIDS {
                    self.info.video_streams += 1;
                    // First video stream's codec wins.
                    if self.info.video_codec.is_empty() {
                        self.info.video_codec = stream.header.fcc_handler.printable();
                    }
                } else if stream.type_tag == chunk::AUDS {
                    self.info.audio_streams += 1;
                }
            } else if header.id == chunk::STRF {
                // A strf before any strh leaves the type unknown; the
                // block is then skipped like any unrecognized chunk.
                if stream.type_tag == chunk::VIDS {
                    stream.format = StreamFormat::Video(VideoFormat::read(&mut self.cursor));
                } else if stream.type_tag == chunk::AUDS {
                    stream.format = StreamFormat::Audio(AudioFormat::read(&mut self.cursor));
                }
            }
            self.finish_chunk(start, &header);
        }
        self.info.streams.push(stream);
    }

    /// Lands the cursor exactly past the chunk's declared body plus the
    /// odd-size pad byte, regardless of how much of the body was consumed.
    fn finish_chunk(&mut self, start: u64, header: &ChunkHeader) {
        self.cursor.seek_to(header.next_offset(start));
    }
}
