#![no_main]

//! Fuzz target for the JPEG marker-segment walker
//!
//! Arbitrary bytes behind a valid SOI must never panic the walker, and every
//! segment it returns must lie inside the buffer.
//!
//! Run with: cargo +nightly fuzz run fuzz_jpeg_walk

use libfuzzer_sys::fuzz_target;
use unseal_core::jpeg;

fuzz_target!(|data: &[u8]| {
    let mut input = vec![0xFF, 0xD8];
    input.extend_from_slice(data);

    let walk = jpeg::walk(&input).expect("SOI is present");
    assert!(walk.end <= input.len());
    for segment in &walk.segments {
        assert!(segment.span().end() <= walk.end);
        let _ = segment.span().slice(&input);
    }
    if let Some(scan) = walk.scan {
        assert_eq!(scan.end(), input.len());
    }
});
