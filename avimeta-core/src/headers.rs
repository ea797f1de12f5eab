//! Fixed-layout header decoders.
//!
//! Each decoder reads a statically known field sequence from the cursor.
//! No field is validated here; zero frame rates, absurd dimensions and the
//! like are a reporting concern, not a decoding one.

use std::io::{Read, Seek};

use serde::{Deserialize, Serialize};

use crate::chunk::FourCc;
use crate::reader::ByteCursor;

// ============================================================================
// Main Header (avih)
// ============================================================================

/// Global stream-independent properties. 56 bytes on disk, of which the
/// trailing 16 are reserved and discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainHeader {
    pub micro_sec_per_frame: u32,
    pub max_bytes_per_sec: u32,
    pub padding_granularity: u32,
    pub flags: u32,
    pub total_frames: u32,
    pub initial_frames: u32,
    pub streams: u32,
    pub suggested_buffer_size: u32,
    pub width: u32,
    pub height: u32,
}

impl MainHeader {
    pub fn read<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Self {
        let header = Self {
            micro_sec_per_frame: cursor.read_u32_le(),
            max_bytes_per_sec: cursor.read_u32_le(),
            padding_granularity: cursor.read_u32_le(),
            flags: cursor.read_u32_le(),
            total_frames: cursor.read_u32_le(),
            initial_frames: cursor.read_u32_le(),
            streams: cursor.read_u32_le(),
            suggested_buffer_size: cursor.read_u32_le(),
            width: cursor.read_u32_le(),
            height: cursor.read_u32_le(),
        };
        // Four reserved dwords
        cursor.skip(16);
        header
    }
}

// ============================================================================
// Stream Header (strh)
// ============================================================================

/// Display rectangle at the tail of a stream header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRect {
    pub left: u16,
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
}

/// Per-stream descriptor. 56 bytes on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamHeader {
    pub fcc_type: FourCc,
    pub fcc_handler: FourCc,
    pub flags: u32,
    pub priority: u32,
    pub initial_frames: u32,
    pub scale: u32,
    pub rate: u32,
    pub start: u32,
    pub length: u32,
    pub suggested_buffer_size: u32,
    pub quality: u32,
    pub sample_size: u32,
    pub frame: FrameRect,
}

impl StreamHeader {
    pub fn read<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Self {
        Self {
            fcc_type: cursor.read_fourcc(),
            fcc_handler: cursor.read_fourcc(),
            flags: cursor.read_u32_le(),
            priority: cursor.read_u32_le(),
            initial_frames: cursor.read_u32_le(),
            scale: cursor.read_u32_le(),
            rate: cursor.read_u32_le(),
            start: cursor.read_u32_le(),
            length: cursor.read_u32_le(),
            suggested_buffer_size: cursor.read_u32_le(),
            quality: cursor.read_u32_le(),
            sample_size: cursor.read_u32_le(),
            frame: FrameRect {
                left: cursor.read_u16_le(),
                top: cursor.read_u16_le(),
                right: cursor.read_u16_le(),
                bottom: cursor.read_u16_le(),
            },
        }
    }
}

// ============================================================================
// Video Format (strf for vids, BITMAPINFOHEADER)
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFormat {
    pub size: u32,
    pub width: u32,
    pub height: u32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: FourCc,
    pub image_size: u32,
    pub x_pels_per_meter: u32,
    pub y_pels_per_meter: u32,
    pub clr_used: u32,
    pub clr_important: u32,
}

impl VideoFormat {
    pub fn read<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Self {
        Self {
            size: cursor.read_u32_le(),
            width: cursor.read_u32_le(),
            height: cursor.read_u32_le(),
            planes: cursor.read_u16_le(),
            bit_count: cursor.read_u16_le(),
            compression: cursor.read_fourcc(),
            image_size: cursor.read_u32_le(),
            x_pels_per_meter: cursor.read_u32_le(),
            y_pels_per_meter: cursor.read_u32_le(),
            clr_used: cursor.read_u32_le(),
            clr_important: cursor.read_u32_le(),
        }
    }
}

// ============================================================================
// Audio Format (strf for auds, WAVEFORMATEX)
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    pub format_tag: u16,
    pub channels: u16,
    pub samples_per_sec: u32,
    pub avg_bytes_per_sec: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    /// Trailing cbSize, present only in extended blocks. Defaults to 0.
    pub extra_size: u16,
}

impl AudioFormat {
    /// The one decoder with a conditional tail: after the 14-byte base
    /// record, legacy WAVEFORMAT blocks end while extended ones carry a
    /// trailing size field, sometimes behind one alignment byte.
    pub fn read<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Self {
        let mut format = Self {
            format_tag: cursor.read_u16_le(),
            channels: cursor.read_u16_le(),
            samples_per_sec: cursor.read_u32_le(),
            avg_bytes_per_sec: cursor.read_u32_le(),
            block_align: cursor.read_u16_le(),
            bits_per_sample: cursor.read_u16_le(),
            extra_size: 0,
        };
        if cursor.position() % 2 != 0 {
            cursor.skip(1);
        }
        if !cursor.at_end() {
            format.extra_size = cursor.read_u16_le();
        }
        format
    }
}
