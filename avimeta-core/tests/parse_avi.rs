//! End-to-end walks over synthetic AVI files built in memory.

use std::io::Cursor;

use avimeta_core::{parse_avi, AviError, FourCc, StreamFormat, MAX_STREAMS};

// ============================================================================
// Byte builders
// ============================================================================

fn chunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(tag);
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    if body.len() % 2 == 1 {
        out.push(0);
    }
    out
}

fn list(sub_type: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut inner = Vec::new();
    inner.extend_from_slice(sub_type);
    inner.extend_from_slice(body);
    chunk(b"LIST", &inner)
}

fn riff_avi(body: &[u8]) -> Vec<u8> {
    let mut inner = Vec::new();
    inner.extend_from_slice(b"AVI ");
    inner.extend_from_slice(body);
    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(inner.len() as u32).to_le_bytes());
    out.extend_from_slice(&inner);
    out
}

fn u32s(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn avih(micro_sec_per_frame: u32, total_frames: u32, streams: u32, width: u32, height: u32) -> Vec<u8> {
    let mut body = u32s(&[
        micro_sec_per_frame,
        500_000, // max_bytes_per_sec
        0,       // padding_granularity
        0x0010,  // flags
        total_frames,
        0, // initial_frames
        streams,
        65_536, // suggested_buffer_size
        width,
        height,
    ]);
    body.extend_from_slice(&[0u8; 16]); // reserved
    chunk(b"avih", &body)
}

fn strh(fcc_type: &[u8; 4], handler: &[u8; 4], scale: u32, rate: u32, length: u32) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(fcc_type);
    body.extend_from_slice(handler);
    body.extend(u32s(&[0, 0, 0, scale, rate, 0, length, 65_536, 0, 0]));
    for v in [0u16, 0, 640, 480] {
        body.extend_from_slice(&v.to_le_bytes());
    }
    chunk(b"strh", &body)
}

fn strf_video(width: u32, height: u32, bit_count: u16) -> Vec<u8> {
    let mut body = u32s(&[40, width, height]);
    body.extend_from_slice(&1u16.to_le_bytes());
    body.extend_from_slice(&bit_count.to_le_bytes());
    body.extend_from_slice(b"XVID");
    body.extend(u32s(&[width * height * 3, 0, 0, 0, 0]));
    chunk(b"strf", &body)
}

fn strf_audio(format_tag: u16, channels: u16, sample_rate: u32) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&format_tag.to_le_bytes());
    body.extend_from_slice(&channels.to_le_bytes());
    body.extend_from_slice(&sample_rate.to_le_bytes());
    body.extend_from_slice(&(sample_rate * 4).to_le_bytes());
    body.extend_from_slice(&4u16.to_le_bytes());
    body.extend_from_slice(&16u16.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes()); // cbSize
    chunk(b"strf", &body)
}

/// One video stream, one audio stream, a movi list with an odd-sized data
/// chunk, and a bare idx1 at the end.
fn minimal_avi() -> Vec<u8> {
    let vids = list(b"strl", &[strh(b"vids", b"xvid", 1001, 30_000, 300), strf_video(640, 480, 24)].concat());
    let auds = list(b"strl", &[strh(b"auds", b"\0\0\0\0", 1, 44_100, 441_000), strf_audio(0x0055, 2, 44_100)].concat());
    let hdrl = list(b"hdrl", &[avih(33_367, 300, 2, 640, 480), vids, auds].concat());
    let movi = list(b"movi", &chunk(b"00dc", &[1, 2, 3])); // odd body, padded
    let idx1 = chunk(b"idx1", &[]);
    riff_avi(&[hdrl, movi, idx1].concat())
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn round_trips_every_written_field() {
    let bytes = minimal_avi();
    let info = parse_avi(Cursor::new(bytes.clone())).expect("parse");

    assert_eq!(info.main_header.micro_sec_per_frame, 33_367);
    assert_eq!(info.main_header.total_frames, 300);
    assert_eq!(info.main_header.streams, 2);
    assert_eq!(info.main_header.width, 640);
    assert_eq!(info.main_header.height, 480);
    assert_eq!(info.main_header.max_bytes_per_sec, 500_000);
    assert_eq!(info.main_header.suggested_buffer_size, 65_536);

    assert_eq!(info.stream_count(), 2);
    assert_eq!(info.video_streams, 1);
    assert_eq!(info.audio_streams, 1);
    assert_eq!(info.video_codec, "xvid");
    assert!(info.has_index);

    let video = &info.streams[0];
    assert_eq!(video.type_tag, FourCc(*b"vids"));
    assert_eq!(video.header.scale, 1001);
    assert_eq!(video.header.rate, 30_000);
    assert_eq!(video.header.length, 300);
    match video.format {
        StreamFormat::Video(v) => {
            assert_eq!(v.width, 640);
            assert_eq!(v.height, 480);
            assert_eq!(v.bit_count, 24);
            assert_eq!(v.compression, FourCc(*b"XVID"));
        }
        other => panic!("expected video format, got {:?}", other),
    }

    let audio = &info.streams[1];
    assert_eq!(audio.type_tag, FourCc(*b"auds"));
    match audio.format {
        StreamFormat::Audio(a) => {
            assert_eq!(a.format_tag, 0x0055);
            assert_eq!(a.channels, 2);
            assert_eq!(a.samples_per_sec, 44_100);
            assert_eq!(a.bits_per_sample, 16);
        }
        other => panic!("expected audio format, got {:?}", other),
    }
}

#[test]
fn movi_location_points_at_sub_type_tag() {
    let bytes = minimal_avi();
    let info = parse_avi(Cursor::new(bytes.clone())).expect("parse");

    // The recorded offset must land on the 'movi' tag itself.
    let offset = info.movi_offset as usize;
    assert_eq!(&bytes[offset..offset + 4], b"movi");
    // Body: 'movi' tag + 8-byte chunk header + 3 data bytes + 1 pad,
    // minus the 4-byte tag excluded from the recorded size.
    assert_eq!(info.movi_size, 8 + 3 + 1);
}

#[test]
fn parsing_twice_is_idempotent() {
    let bytes = minimal_avi();
    let first = parse_avi(Cursor::new(bytes.clone())).expect("first");
    let second = parse_avi(Cursor::new(bytes)).expect("second");
    assert_eq!(first, second);
}

#[test]
fn declared_streams_without_strl_lists() {
    let hdrl = list(b"hdrl", &avih(0, 0, 0, 0, 0));
    let bytes = riff_avi(&hdrl);
    let info = parse_avi(Cursor::new(bytes)).expect("parse");
    assert_eq!(info.video_streams, 0);
    assert_eq!(info.audio_streams, 0);
    assert!(info.streams.is_empty());
}

#[test]
fn stream_counts_partition_stream_count() {
    // vids + auds + an unrecognized 'txts' stream.
    let vids = list(b"strl", &strh(b"vids", b"xvid", 1, 25, 100));
    let auds = list(b"strl", &strh(b"auds", b"\0\0\0\0", 1, 48_000, 1000));
    let txts = list(b"strl", &strh(b"txts", b"\0\0\0\0", 1, 1, 1));
    let hdrl = list(b"hdrl", &[avih(40_000, 100, 3, 320, 240), vids, auds, txts].concat());
    let info = parse_avi(Cursor::new(riff_avi(&hdrl))).expect("parse");

    assert_eq!(info.stream_count(), 3);
    assert_eq!(info.video_streams + info.audio_streams, 2);
    assert_eq!(info.streams[2].type_tag, FourCc(*b"txts"));
    assert_eq!(info.streams[2].format, StreamFormat::None);
    assert!(info.stream_count() as usize <= MAX_STREAMS);
}

#[test]
fn drops_streams_past_the_cap() {
    let mut lists = Vec::new();
    for _ in 0..MAX_STREAMS + 2 {
        lists.extend(list(b"strl", &strh(b"vids", b"mjpg", 1, 25, 10)));
    }
    let hdrl = list(b"hdrl", &[avih(40_000, 10, 12, 320, 240), lists].concat());
    let info = parse_avi(Cursor::new(riff_avi(&hdrl))).expect("parse");

    assert_eq!(info.stream_count() as usize, MAX_STREAMS);
    // Only recorded streams are counted, dropped ones leave no trace.
    assert_eq!(info.video_streams as usize, MAX_STREAMS);
}

#[test]
fn first_video_codec_wins() {
    let first = list(b"strl", &strh(b"vids", b"DIV3", 1, 25, 10));
    let second = list(b"strl", &strh(b"vids", b"H264", 1, 25, 10));
    let hdrl = list(b"hdrl", &[avih(40_000, 10, 2, 320, 240), first, second].concat());
    let info = parse_avi(Cursor::new(riff_avi(&hdrl))).expect("parse");
    assert_eq!(info.video_codec, "DIV3");
    assert_eq!(info.video_streams, 2);
}

#[test]
fn non_printable_codec_bytes_become_dots() {
    let strl = list(b"strl", &strh(b"vids", &[b'X', 2, b'D', 200], 1, 25, 10));
    let hdrl = list(b"hdrl", &[avih(40_000, 10, 1, 320, 240), strl].concat());
    let info = parse_avi(Cursor::new(riff_avi(&hdrl))).expect("parse");
    assert_eq!(info.video_codec, "X.D.");
}

#[test]
fn strf_before_strh_is_ignored() {
    let body = [strf_video(640, 480, 24), strh(b"vids", b"xvid", 1, 25, 10)].concat();
    let hdrl = list(b"hdrl", &[avih(40_000, 10, 1, 640, 480), list(b"strl", &body)].concat());
    let info = parse_avi(Cursor::new(riff_avi(&hdrl))).expect("parse");
    assert_eq!(info.stream_count(), 1);
    // Header still lands, but no format was decodable at strf time.
    assert_eq!(info.streams[0].type_tag, FourCc(*b"vids"));
    assert_eq!(info.streams[0].format, StreamFormat::None);
}

#[test]
fn unknown_chunks_and_lists_are_skipped() {
    let junk = chunk(b"JUNK", &[0xAB; 13]); // odd size, pad exercised
    let weird = list(b"wxyz", &chunk(b"abcd", &[1, 2]));
    let strl = list(b"strl", &[strh(b"vids", b"xvid", 1, 25, 10), strf_video(320, 240, 16)].concat());
    let hdrl = list(b"hdrl", &[avih(40_000, 10, 1, 320, 240), junk.clone(), strl].concat());
    let info = parse_avi(Cursor::new(riff_avi(&[junk, hdrl, weird].concat()))).expect("parse");
    assert_eq!(info.video_streams, 1);
    assert_eq!(info.main_header.width, 320);
}

#[test]
fn later_movi_list_overwrites_earlier() {
    let hdrl = list(b"hdrl", &avih(40_000, 10, 0, 320, 240));
    let movi_a = list(b"movi", &chunk(b"00dc", &[1, 2, 3, 4]));
    let movi_b = list(b"movi", &chunk(b"00dc", &[5, 6]));
    let bytes = riff_avi(&[hdrl, movi_a, movi_b].concat());
    let info = parse_avi(Cursor::new(bytes.clone())).expect("parse");

    let offset = info.movi_offset as usize;
    assert_eq!(&bytes[offset..offset + 4], b"movi");
    assert_eq!(info.movi_size, 8 + 2); // the second, smaller payload
}

#[test]
fn rejects_non_riff_input() {
    let err = parse_avi(Cursor::new(b"not a riff at all".to_vec())).unwrap_err();
    assert!(matches!(err, AviError::NotRiff));
}

#[test]
fn rejects_wave_form_type() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&36u32.to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(&[0u8; 32]);
    let err = parse_avi(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, AviError::NotAvi));
}

#[test]
fn report_matches_scenario_numbers() {
    let info = parse_avi(Cursor::new(minimal_avi())).expect("parse");
    let report = avimeta_core::format_report(&info);
    assert!(report.contains("Frame rate: 29.970 fps"));
    assert!(report.contains("Duration: 00:00:10.010"));
    assert!(report.contains("Codec: xvid"));
    assert!(report.contains("Resolution: 640x480"));
    assert!(report.contains("Sample rate: 44100 Hz"));
    assert!(report.contains("Payload (movi) size: 12 bytes"));
}
