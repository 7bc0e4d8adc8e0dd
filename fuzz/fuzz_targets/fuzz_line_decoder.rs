//! Fuzz target: `LineDecoder::push`
//!
//! Drives arbitrary byte sequences into the status-line decoder and
//! asserts that it never panics, never yields an empty or overlong line,
//! and starts clean after a reset.
//!
//! cargo fuzz run fuzz_line_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use petfeeder::bridge::line::{LineDecoder, MAX_LINE_LEN};

fuzz_target!(|data: &[u8]| {
    let mut decoder = LineDecoder::new();

    for &b in data {
        if let Some(line) = decoder.push(b) {
            assert!(!line.is_empty(), "decoder must not yield empty lines");
            assert!(line.len() <= MAX_LINE_LEN, "line exceeds MAX_LINE_LEN");
            assert!(!line.contains('\n'), "line must not contain its terminator");
        }
        assert!(decoder.buffered() <= MAX_LINE_LEN);
    }

    decoder.reset();
    assert_eq!(decoder.buffered(), 0);
    assert_eq!(decoder.push(b'\n'), None);
});
