//! Human-readable rendering of parsed AVI metadata.
//!
//! Presentation only: every number printed here is either a stored field or
//! one of the derivations exposed by [`AviInfo`].

use std::fmt::Write;

use crate::chunk;
use crate::parser::{AviInfo, StreamFormat};

pub fn format_report(info: &AviInfo) -> String {
    let mut out = String::new();

    let duration = info.duration_secs();
    let hours = (duration / 3600.0) as u32;
    let minutes = ((duration - f64::from(hours) * 3600.0) / 60.0) as u32;
    let seconds = duration - f64::from(hours) * 3600.0 - f64::from(minutes) * 60.0;

    let _ = writeln!(out, "=== AVI File Information ===");
    let _ = writeln!(
        out,
        "Dimensions: {}x{} pixels",
        info.main_header.width, info.main_header.height
    );
    let _ = writeln!(out, "Total frames: {}", info.main_header.total_frames);
    let _ = writeln!(out, "Frame rate: {:.3} fps", info.fps());
    let _ = writeln!(out, "Duration: {:02}:{:02}:{:06.3}", hours, minutes, seconds);

    let _ = writeln!(out, "\n-- Streams --");
    let _ = writeln!(out, "Total streams: {}", info.stream_count());
    let _ = writeln!(out, "Video streams: {}", info.video_streams);
    let _ = writeln!(out, "Audio streams: {}", info.audio_streams);

    if info.video_streams > 0 {
        let _ = writeln!(out, "\n-- Video --");
        for (i, stream) in info.streams.iter().enumerate() {
            if stream.type_tag != chunk::VIDS {
                continue;
            }
            let video = match &stream.format {
                StreamFormat::Video(v) => *v,
                _ => Default::default(),
            };
            let stream_fps = if stream.header.scale > 0 {
                stream.header.rate as f64 / stream.header.scale as f64
            } else {
                0.0
            };
            let _ = writeln!(out, "Stream {}:", i);
            let _ = writeln!(out, "  Codec: {}", info.video_codec);
            let _ = writeln!(out, "  Resolution: {}x{}", video.width, video.height);
            let _ = writeln!(out, "  Bits per pixel: {}", video.bit_count);
            let _ = writeln!(out, "  Frames: {}", stream.header.length);
            let _ = writeln!(out, "  Frame rate: {:.3} fps", stream_fps);
        }
    }

    if info.audio_streams > 0 {
        let _ = writeln!(out, "\n-- Audio --");
        for (i, stream) in info.streams.iter().enumerate() {
            if stream.type_tag != chunk::AUDS {
                continue;
            }
            let audio = match &stream.format {
                StreamFormat::Audio(a) => *a,
                _ => Default::default(),
            };
            let _ = writeln!(out, "Stream {}:", i);
            let _ = writeln!(out, "  Format tag: 0x{:04X}", audio.format_tag);
            let _ = writeln!(out, "  Channels: {}", audio.channels);
            let _ = writeln!(out, "  Sample rate: {} Hz", audio.samples_per_sec);
            let _ = writeln!(out, "  Bits per sample: {}", audio.bits_per_sample);
            let _ = writeln!(out, "  Byte rate: {} bytes/s", audio.avg_bytes_per_sec);
        }
    }

    let _ = writeln!(out, "\n-- Sizes --");
    let _ = writeln!(
        out,
        "Suggested buffer size: {} bytes",
        info.main_header.suggested_buffer_size
    );
    let _ = writeln!(
        out,
        "Max data rate: {} bytes/s",
        info.main_header.max_bytes_per_sec
    );
    let _ = writeln!(out, "Payload (movi) size: {} bytes", info.movi_size);

    out
}
