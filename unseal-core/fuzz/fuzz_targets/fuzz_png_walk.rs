#![no_main]

//! Fuzz target for the PNG chunk walker
//!
//! Run with: cargo +nightly fuzz run fuzz_png_walk

use libfuzzer_sys::fuzz_target;
use unseal_core::format::PNG_SIGNATURE;
use unseal_core::png;

fuzz_target!(|data: &[u8]| {
    let mut input = PNG_SIGNATURE.to_vec();
    input.extend_from_slice(data);

    let walk = png::walk(&input).expect("signature is present");
    let mut expected = PNG_SIGNATURE.len();
    for chunk in &walk.chunks {
        // Chunks are contiguous from the signature onwards
        assert_eq!(chunk.offset, expected);
        expected = chunk.span().end();
    }
    assert_eq!(walk.end, expected);
    assert!(walk.end <= input.len());
});
