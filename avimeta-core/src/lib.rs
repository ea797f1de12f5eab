//! # avimeta-core
//!
//! RIFF/AVI container metadata inspection without decoding.
//!
//! Walks the nested chunk structure of an AVI file and collects dimensions,
//! frame rate, per-stream codec/format details and the location of the raw
//! media payload. Payload bytes are never decoded.

// ============================================================================
// Container Primitives
// ============================================================================
pub mod chunk;
pub mod reader;

// ============================================================================
// Header Layouts
// ============================================================================
pub mod headers;

// ============================================================================
// Walker + Reporting
// ============================================================================
pub mod parser;
pub mod report;

pub use chunk::{ChunkHeader, FourCc};
pub use headers::{AudioFormat, FrameRect, MainHeader, StreamHeader, VideoFormat};
pub use parser::{parse_avi, parse_avi_file, AviError, AviInfo, StreamFormat, StreamInfo, MAX_STREAMS};
pub use report::format_report;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
